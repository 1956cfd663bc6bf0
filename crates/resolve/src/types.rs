//! Resolution types and collaborator trait seams.

use medqa_core::AppResult;
use serde::{Deserialize, Serialize};

/// Caller-selected policy governing dataset-vs-external routing.
///
/// Immutable for the duration of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// Prefer the dataset when retrieval confidence is high, otherwise
    /// fall back to the external chain (the default)
    Hybrid,

    /// Dataset-preferred mode; shares the Hybrid routing predicate
    /// (low-confidence retrievals still fall back externally) and only
    /// affects how front-ends render the retrieved context
    DatasetOnly,

    /// Always answer through the external chain
    ApiOnly,
}

impl ResolutionMode {
    /// Parse a resolution mode from its CLI string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hybrid" => Some(Self::Hybrid),
            "dataset-only" | "dataset" => Some(Self::DatasetOnly),
            "api-only" | "api" => Some(Self::ApiOnly),
            _ => None,
        }
    }

    /// Get the canonical mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::DatasetOnly => "dataset-only",
            Self::ApiOnly => "api-only",
        }
    }
}

/// The result of one local retrieval: parallel ordered sequences of document
/// texts and their similarity scores, descending by relevance.
///
/// Created fresh per query, never persisted, discarded after rendering.
/// Scores are assumed to lie in [0, 1]; this is not enforced here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Retrieval {
    /// Retrieved document texts, most relevant first
    pub docs: Vec<String>,

    /// Similarity scores parallel to `docs`
    pub scores: Vec<f32>,
}

impl Retrieval {
    /// Create a retrieval from parallel document/score sequences.
    pub fn new(docs: Vec<String>, scores: Vec<f32>) -> Self {
        debug_assert_eq!(docs.len(), scores.len());
        Self { docs, scores }
    }

    /// An empty retrieval (no documents matched).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no documents were retrieved.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Highest similarity score, if any documents were retrieved.
    pub fn max_score(&self) -> Option<f32> {
        self.scores.iter().copied().reduce(f32::max)
    }
}

/// Local dataset retrieval collaborator.
///
/// Embedding/similarity internals live behind this seam; the resolver only
/// consumes the scored output.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve the top-k most relevant documents for a query.
    async fn retrieve_top_k(&self, query: &str, k: usize) -> AppResult<Retrieval>;
}

/// Generates a natural-language answer from retrieved context.
#[async_trait::async_trait]
pub trait ContextGenerator: Send + Sync {
    /// Generate an answer for `query` grounded in `docs`.
    async fn generate(&self, query: &str, docs: &[String]) -> AppResult<String>;
}

/// Total external fallback: always yields an answer string, never an error.
///
/// Implementations must catch every failure internally and degrade to a
/// user-displayable message.
#[async_trait::async_trait]
pub trait ExternalAnswerer: Send + Sync {
    /// Resolve a query through external services.
    async fn answer(&self, query: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(ResolutionMode::parse("hybrid"), Some(ResolutionMode::Hybrid));
        assert_eq!(
            ResolutionMode::parse("dataset-only"),
            Some(ResolutionMode::DatasetOnly)
        );
        assert_eq!(
            ResolutionMode::parse("dataset"),
            Some(ResolutionMode::DatasetOnly)
        );
        assert_eq!(ResolutionMode::parse("API-ONLY"), Some(ResolutionMode::ApiOnly));
        assert_eq!(ResolutionMode::parse("api"), Some(ResolutionMode::ApiOnly));
        assert_eq!(ResolutionMode::parse("oracle"), None);
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in [
            ResolutionMode::Hybrid,
            ResolutionMode::DatasetOnly,
            ResolutionMode::ApiOnly,
        ] {
            assert_eq!(ResolutionMode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn test_max_score() {
        let retrieval = Retrieval::new(
            vec!["a".to_string(), "b".to_string()],
            vec![0.9, 0.3],
        );
        assert_eq!(retrieval.max_score(), Some(0.9));

        assert_eq!(Retrieval::empty().max_score(), None);
    }
}
