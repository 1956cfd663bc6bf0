//! Wikipedia summary client.
//!
//! Resolves a normalized topic to a short text extract via the REST summary
//! endpoint. A miss (non-200 status, missing extract) is a normal outcome,
//! not an error; the chain simply falls through to the provider tiers.

use std::time::Duration;

use medqa_core::{AppError, AppResult};
use serde::Deserialize;

/// Request timeout for summary lookups.
const SUMMARY_TIMEOUT: Duration = Duration::from_secs(5);

/// Summary response body; only the extract is consumed.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: Option<String>,
}

/// Wikipedia REST summary client.
pub struct EncyclopediaClient {
    base_url: String,
    client: reqwest::Client,
}

impl EncyclopediaClient {
    /// Create a client against the public Wikipedia REST API.
    pub fn new() -> Self {
        Self::with_base_url("https://en.wikipedia.org/api/rest_v1")
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Look up the summary extract for a topic.
    ///
    /// Returns `Ok(None)` when the topic has no page or the page has no
    /// extract; `Err` only on transport-level failures.
    pub async fn summary(&self, topic: &str) -> AppResult<Option<String>> {
        let url = format!("{}/page/summary/{}", self.base_url, topic);
        tracing::debug!(topic, "looking up encyclopedia summary");

        let response = self
            .client
            .get(&url)
            .timeout(SUMMARY_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("encyclopedia request failed: {}", e)))?;

        if response.status() != reqwest::StatusCode::OK {
            tracing::debug!(topic, status = %response.status(), "no encyclopedia summary");
            return Ok(None);
        }

        let body: SummaryResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("encyclopedia response was malformed: {}", e)))?;

        Ok(body.extract.filter(|extract| !extract.is_empty()))
    }
}

impl Default for EncyclopediaClient {
    fn default() -> Self {
        Self::new()
    }
}
