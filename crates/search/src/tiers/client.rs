//! Preconfigured SerpAPI client tier.
//!
//! Mirrors the behavior of the provider's own client binding: a session
//! client built once at discovery time, speaking the `/search.json` API.
//! Timeouts are left to the client defaults (provider-controlled).

use crate::strategy::{SearchResponse, SearchStrategy};
use crate::tiers::{RESULT_COUNT, SEARCH_ENGINE};
use medqa_core::{AppError, AppResult};

/// Client-binding tier of provider resolution.
pub struct ClientSearch {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ClientSearch {
    /// Probe for a usable session client.
    ///
    /// Returns `None` when the underlying HTTP client cannot be
    /// constructed; discovery then leaves only the plain HTTP tier.
    pub fn probe(base_url: impl Into<String>, api_key: impl Into<String>) -> Option<Self> {
        let client = reqwest::Client::builder().build().ok()?;
        Some(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl SearchStrategy for ClientSearch {
    fn name(&self) -> &str {
        "serpapi-client"
    }

    async fn resolve(&self, query: &str) -> AppResult<SearchResponse> {
        tracing::debug!("resolving query through the client tier");

        let url = format!("{}/search.json", self.base_url);
        let num = RESULT_COUNT.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("engine", SEARCH_ENGINE),
                ("api_key", self.api_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Search(format!("client tier request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Search(format!("client tier returned an error: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("client tier response was malformed: {}", e)))
    }
}
