//! Local document corpus.
//!
//! The corpus is a newline-delimited JSON file, one document per line.
//! Malformed lines are skipped with a warning rather than aborting the
//! load; a partially usable corpus beats no corpus.

use std::path::Path;

use medqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One corpus document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Document body used for retrieval and answering
    pub text: String,

    /// Optional human-readable origin (file name, record id)
    #[serde(default)]
    pub source: Option<String>,
}

/// In-memory document corpus.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<CorpusDocument>,
}

impl Corpus {
    /// Load a corpus from a JSONL file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Dataset(format!("Failed to read corpus file {:?}: {}", path, e))
        })?;

        let mut documents = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<CorpusDocument>(line) {
                Ok(doc) if !doc.text.trim().is_empty() => documents.push(doc),
                Ok(_) => tracing::warn!(line = line_no + 1, "skipping empty corpus document"),
                Err(e) => {
                    tracing::warn!(line = line_no + 1, "skipping malformed corpus line: {}", e)
                }
            }
        }

        tracing::info!(documents = documents.len(), "loaded corpus from {:?}", path);

        Ok(Self { documents })
    }

    /// Build a corpus from already-parsed documents.
    pub fn from_documents(documents: Vec<CorpusDocument>) -> Self {
        Self { documents }
    }

    /// All documents, in file order.
    pub fn documents(&self) -> &[CorpusDocument] {
        &self.documents
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");
        std::fs::write(
            &path,
            concat!(
                "{\"text\": \"Aspirin treats pain.\", \"source\": \"drugs.csv\"}\n",
                "\n",
                "{\"text\": \"Paracetamol reduces fever.\"}\n",
            ),
        )
        .unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.documents()[0].source.as_deref(), Some("drugs.csv"));
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");
        std::fs::write(
            &path,
            "{\"text\": \"good\"}\nnot json at all\n{\"text\": \"\"}\n",
        )
        .unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.documents()[0].text, "good");
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Corpus::load(Path::new("/nonexistent/corpus.jsonl")).is_err());
    }
}
