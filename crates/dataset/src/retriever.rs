//! Keyword-overlap retrieval.
//!
//! Scores each corpus document by the fraction of distinct query terms it
//! contains, which keeps scores naturally within [0, 1]. Documents matching
//! no term are dropped; an empty retrieval routes the query externally.

use std::collections::HashSet;

use medqa_core::AppResult;
use medqa_resolve::{Retrieval, Retriever};

use crate::corpus::Corpus;

/// Term-overlap retriever over an in-memory corpus.
pub struct KeywordRetriever {
    corpus: Corpus,
}

impl KeywordRetriever {
    /// Create a retriever over the given corpus.
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    /// Score a document against the query terms: matched / total, in [0, 1].
    fn score(query_terms: &HashSet<String>, text: &str) -> f32 {
        if query_terms.is_empty() {
            return 0.0;
        }

        let doc_terms = terms(text);
        let matched = query_terms.iter().filter(|t| doc_terms.contains(*t)).count();

        matched as f32 / query_terms.len() as f32
    }
}

/// Lowercased alphabetic terms of a text.
fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[async_trait::async_trait]
impl Retriever for KeywordRetriever {
    async fn retrieve_top_k(&self, query: &str, k: usize) -> AppResult<Retrieval> {
        let query_terms = terms(query);

        let mut scored: Vec<(f32, &str)> = self
            .corpus
            .documents()
            .iter()
            .map(|doc| (Self::score(&query_terms, &doc.text), doc.text.as_str()))
            .filter(|(score, _)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        tracing::debug!(
            retrieved = scored.len(),
            max_score = scored.first().map(|(s, _)| *s),
            "keyword retrieval complete"
        );

        let (scores, docs): (Vec<f32>, Vec<String>) = scored
            .into_iter()
            .map(|(score, text)| (score, text.to_string()))
            .unzip();

        Ok(Retrieval::new(docs, scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusDocument;

    fn corpus(texts: &[&str]) -> Corpus {
        Corpus::from_documents(
            texts
                .iter()
                .map(|t| CorpusDocument {
                    text: t.to_string(),
                    source: None,
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_scores_descend_and_stay_in_unit_range() {
        let retriever = KeywordRetriever::new(corpus(&[
            "Aspirin treats headache and pain.",
            "Paracetamol reduces fever.",
            "Headache treatment often uses aspirin or rest.",
        ]));

        let retrieval = retriever
            .retrieve_top_k("treatment for headache", 3)
            .await
            .unwrap();

        assert!(!retrieval.is_empty());
        for pair in retrieval.scores.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        for score in &retrieval.scores {
            assert!((0.0..=1.0).contains(score));
        }
    }

    #[tokio::test]
    async fn test_top_k_caps_results() {
        let retriever = KeywordRetriever::new(corpus(&[
            "aspirin one",
            "aspirin two",
            "aspirin three",
            "aspirin four",
        ]));

        let retrieval = retriever.retrieve_top_k("aspirin", 2).await.unwrap();
        assert_eq!(retrieval.docs.len(), 2);
        assert_eq!(retrieval.scores.len(), 2);
    }

    #[tokio::test]
    async fn test_no_match_yields_empty_retrieval() {
        let retriever = KeywordRetriever::new(corpus(&["completely unrelated text"]));

        let retrieval = retriever.retrieve_top_k("quantum chromodynamics", 3).await.unwrap();
        assert!(retrieval.is_empty());
        assert_eq!(retrieval.max_score(), None);
    }

    #[tokio::test]
    async fn test_empty_corpus_yields_empty_retrieval() {
        let retriever = KeywordRetriever::new(Corpus::default());

        let retrieval = retriever.retrieve_top_k("anything", 3).await.unwrap();
        assert!(retrieval.is_empty());
    }

    #[tokio::test]
    async fn test_full_match_scores_one() {
        let retriever = KeywordRetriever::new(corpus(&["aspirin treats headache"]));

        let retrieval = retriever.retrieve_top_k("aspirin headache", 1).await.unwrap();
        assert_eq!(retrieval.scores, vec![1.0]);
    }
}
