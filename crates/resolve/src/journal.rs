//! Best-effort interaction journal.
//!
//! Appends one JSON line per resolved interaction to an append-only log
//! file. Journaling is purely diagnostic: every failure (missing directory,
//! permission denied, full disk, serialization error) is swallowed so the
//! answering flow always completes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use medqa_core::AppResult;

/// Append-only JSONL journal of resolved interactions.
///
/// Each record has the shape `{"time": <ISO-8601 UTC>, "query": ..., "answer": ...}`.
/// The file is opened, written, and closed per call; no handle is kept open.
pub struct InteractionLogger {
    path: PathBuf,
}

impl InteractionLogger {
    /// Create a journal that appends to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one interaction record, best-effort.
    ///
    /// Never fails; write errors are reported at debug level and discarded.
    pub fn append(&self, query: &str, answer: &str) {
        if let Err(e) = self.try_append(query, answer) {
            tracing::debug!("interaction journal write skipped: {}", e);
        }
    }

    fn try_append(&self, query: &str, answer: &str) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let record = serde_json::json!({
            "time": Utc::now().to_rfc3339(),
            "query": query,
            "answer": answer,
        });

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_writes_one_json_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/answers.log");
        let journal = InteractionLogger::new(&path);

        journal.append("what is aspirin?", "An analgesic.");
        journal.append("second", "answer");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record["query"], "what is aspirin?");
        assert_eq!(record["answer"], "An analgesic.");
        assert!(record["time"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_append_never_fails_on_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();

        // Occupy the would-be parent directory with a regular file so
        // create_dir_all cannot succeed.
        let blocker = dir.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();

        let journal = InteractionLogger::new(blocker.join("answers.log"));
        journal.append("query", "answer");

        // The blocker file is untouched and no panic occurred.
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
    }
}
