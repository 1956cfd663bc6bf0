//! Search strategy abstraction and provider response types.
//!
//! Each tier of the SerpAPI resolution is a [`SearchStrategy`]: given a
//! query it either yields a provider-shaped response document or an error.
//! The chain driver in [`crate::provider`] tries strategies in order until
//! one succeeds.

use medqa_core::AppResult;
use serde::{Deserialize, Serialize};

/// Maximum number of organic results considered for snippets.
pub const SNIPPET_LIMIT: usize = 3;

/// Provider search response document.
///
/// Only the fields the answer rendering consumes are modeled; everything
/// else in the provider payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked organic search results
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,

    /// Provider's own direct answer, when present
    #[serde(default)]
    pub answer: Option<String>,

    /// Search metadata block
    #[serde(default)]
    pub search_information: Option<SearchInformation>,
}

/// One organic search result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub snippet: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub link: Option<String>,
}

impl OrganicResult {
    /// Best snippet-like field: `snippet`, else `title`, else `link`.
    pub fn snippet_text(&self) -> Option<&str> {
        [&self.snippet, &self.title, &self.link]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}

/// Provider search metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchInformation {
    #[serde(default)]
    pub query_displayed: Option<String>,
}

/// Extract up to [`SNIPPET_LIMIT`] snippet strings from a response.
pub fn extract_snippets(data: &SearchResponse) -> Vec<String> {
    data.organic_results
        .iter()
        .take(SNIPPET_LIMIT)
        .filter_map(|r| r.snippet_text())
        .map(str::to_string)
        .collect()
}

/// One tier of provider resolution.
///
/// Implementations must be side-effect free beyond the network call itself;
/// the chain driver owns fallback and error rendering.
#[async_trait::async_trait]
pub trait SearchStrategy: Send + Sync {
    /// Strategy name for diagnostics (e.g., "serpapi-client", "serpapi-http").
    fn name(&self) -> &str;

    /// Resolve a query to a provider response document.
    async fn resolve(&self, query: &str) -> AppResult<SearchResponse>;
}
