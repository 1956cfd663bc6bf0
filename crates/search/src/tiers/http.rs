//! Plain HTTP tier of provider resolution.
//!
//! Direct GET against the provider's REST search endpoint with a bounded
//! timeout. This is the last-resort tier: its failure surfaces to the user
//! as a descriptive error string.

use std::time::Duration;

use crate::strategy::{SearchResponse, SearchStrategy};
use crate::tiers::{RESULT_COUNT, SEARCH_ENGINE};
use medqa_core::{AppError, AppResult};

/// Request timeout for the HTTP tier.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP fallback tier of provider resolution.
pub struct HttpSearch {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpSearch {
    /// Create an HTTP tier against the given base URL.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl SearchStrategy for HttpSearch {
    fn name(&self) -> &str {
        "serpapi-http"
    }

    async fn resolve(&self, query: &str) -> AppResult<SearchResponse> {
        tracing::debug!("resolving query through the HTTP tier");

        let url = format!("{}/search", self.base_url);
        let num = RESULT_COUNT.to_string();
        let response = self
            .client
            .get(&url)
            .timeout(SEARCH_TIMEOUT)
            .query(&[
                ("q", query),
                ("engine", SEARCH_ENGINE),
                ("api_key", self.api_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Search(format!("search request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Search(format!("search returned an error status: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("search response was malformed: {}", e)))
    }
}
