//! Dataset-vs-API answer resolution.
//!
//! Implements the per-query routing decision: trust the local retrieval
//! result when confidence is high, otherwise delegate to the external
//! answer chain.

use std::sync::Arc;

use crate::types::{ContextGenerator, ExternalAnswerer, ResolutionMode, Retrieval};

/// Warning shown when the query is empty or whitespace-only.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter or speak a question.";

/// Decide whether a query routes to the external path.
///
/// The external path is taken when the mode is `ApiOnly`, when no documents
/// were retrieved, or when the best retrieval score falls below the
/// configured threshold. `ApiOnly` decides without inspecting scores.
pub fn routes_external(mode: ResolutionMode, scores: &[f32], threshold: f32) -> bool {
    if mode == ResolutionMode::ApiOnly {
        return true;
    }

    // An empty retrieval always routes external: there is no confidence
    // signal to compare against the threshold.
    match scores.iter().copied().reduce(f32::max) {
        None => true,
        Some(max_score) => max_score < threshold,
    }
}

/// Per-query answer resolver.
///
/// Holds the two delegation targets: a [`ContextGenerator`] for the dataset
/// path and an [`ExternalAnswerer`] for the fallback path. The resolver has
/// no side effects beyond delegation; interaction journaling is the caller's
/// responsibility.
pub struct AnswerResolver {
    generator: Arc<dyn ContextGenerator>,
    external: Arc<dyn ExternalAnswerer>,
}

impl AnswerResolver {
    /// Create a resolver over the given collaborators.
    pub fn new(generator: Arc<dyn ContextGenerator>, external: Arc<dyn ExternalAnswerer>) -> Self {
        Self {
            generator,
            external,
        }
    }

    /// Resolve a query to an answer string.
    ///
    /// Never fails: invalid input and collaborator errors all degrade to
    /// user-displayable strings.
    pub async fn resolve(
        &self,
        query: &str,
        mode: ResolutionMode,
        retrieval: &Retrieval,
        threshold: f32,
    ) -> String {
        let query = query.trim();
        if query.is_empty() {
            return EMPTY_QUERY_MESSAGE.to_string();
        }

        if routes_external(mode, &retrieval.scores, threshold) {
            tracing::debug!(
                mode = mode.as_str(),
                max_score = ?retrieval.max_score(),
                threshold,
                "routing query to the external path"
            );
            return self.external.answer(query).await;
        }

        tracing::debug!(
            mode = mode.as_str(),
            docs = retrieval.docs.len(),
            "routing query to the dataset path"
        );

        match self.generator.generate(query, &retrieval.docs).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("dataset answer generation failed: {}", e);
                format!("Dataset answer unavailable: {}", e)
            }
        }
    }
}
