//! Provider chain driver.
//!
//! Assembles the ordered list of search tiers once (probe-once discovery)
//! and drives the fallback chain per query. The driver is total: missing
//! credentials and tier failures all render as answer strings.

use crate::strategy::{extract_snippets, SearchResponse, SearchStrategy};
use crate::tiers::{ClientSearch, HttpSearch, DEFAULT_BASE_URL};

/// Message returned when the provider credential is not configured.
pub const KEY_MISSING: &str = "SERPAPI_KEY missing. Add it to .env or the environment.";

/// Message returned when the provider yields no usable result fields.
pub const NO_ANSWER: &str = "No answer found.";

/// Multi-tier search provider client.
///
/// Constructed once at application start and passed by handle into the
/// chain; the discovered tier list is read-only afterwards.
pub struct ProviderClient {
    configured: bool,
    strategies: Vec<Box<dyn SearchStrategy>>,
}

impl ProviderClient {
    /// Discover the available search tiers for the default endpoint.
    pub fn discover(api_key: Option<String>) -> Self {
        Self::discover_at(DEFAULT_BASE_URL, api_key)
    }

    /// Discover the available search tiers against a custom base URL.
    ///
    /// Probing happens here, exactly once: the client tier joins the chain
    /// only when its probe succeeds; the HTTP tier is always appended as the
    /// last resort. Without a credential no tier is assembled at all.
    pub fn discover_at(base_url: &str, api_key: Option<String>) -> Self {
        let Some(key) = api_key.filter(|k| !k.trim().is_empty()) else {
            tracing::warn!("no SerpAPI credential configured; provider tiers disabled");
            return Self {
                configured: false,
                strategies: Vec::new(),
            };
        };

        let mut strategies: Vec<Box<dyn SearchStrategy>> = Vec::new();

        match ClientSearch::probe(base_url, key.clone()) {
            Some(client) => strategies.push(Box::new(client)),
            None => tracing::warn!("client tier probe failed; HTTP tier only"),
        }

        strategies.push(Box::new(HttpSearch::new(base_url, key)));

        tracing::debug!(tiers = strategies.len(), "provider discovery complete");

        Self {
            configured: true,
            strategies,
        }
    }

    /// Build a provider over explicit strategies (test seam).
    pub fn with_strategies(strategies: Vec<Box<dyn SearchStrategy>>) -> Self {
        Self {
            configured: true,
            strategies,
        }
    }

    /// Whether a credential was configured at discovery time.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Resolve a query through the tier chain.
    ///
    /// Total: returns the first successful tier's rendered answer, the
    /// configuration-missing message when no credential exists, or a
    /// composed error string when every tier fails.
    pub async fn answer(&self, query: &str) -> String {
        if !self.configured {
            return KEY_MISSING.to_string();
        }

        let mut last_error = None;

        for strategy in &self.strategies {
            match strategy.resolve(query).await {
                Ok(data) => {
                    tracing::debug!(tier = strategy.name(), "provider tier succeeded");
                    return render_answer(&data);
                }
                Err(e) => {
                    tracing::debug!(tier = strategy.name(), "provider tier failed: {}", e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => format!(
                "Search client unavailable and HTTP fallback failed. \
                 Check the SerpAPI credential and network connectivity. Error: {}",
                e
            ),
            None => NO_ANSWER.to_string(),
        }
    }
}

/// Render a provider response into a final answer string.
///
/// Snippets win; otherwise the provider's own `answer` field, then the
/// echoed query, then the literal no-answer message.
fn render_answer(data: &SearchResponse) -> String {
    let snippets = extract_snippets(data);
    if !snippets.is_empty() {
        return snippets.join("\n\n");
    }

    if let Some(answer) = data.answer.as_deref().filter(|a| !a.is_empty()) {
        return answer.to_string();
    }

    if let Some(echoed) = data
        .search_information
        .as_ref()
        .and_then(|info| info.query_displayed.as_deref())
        .filter(|q| !q.is_empty())
    {
        return echoed.to_string();
    }

    NO_ANSWER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{OrganicResult, SearchInformation};
    use medqa_core::{AppError, AppResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct RecordingStrategy {
        name: &'static str,
        outcome: Result<SearchResponse, &'static str>,
        calls: Arc<AtomicUsize>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingStrategy {
        fn ok(name: &'static str, data: SearchResponse) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let strategy = Self {
                name,
                outcome: Ok(data),
                calls: calls.clone(),
                queries: Arc::new(Mutex::new(Vec::new())),
            };
            (strategy, calls)
        }

        fn failing(name: &'static str, message: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let strategy = Self {
                name,
                outcome: Err(message),
                calls: calls.clone(),
                queries: Arc::new(Mutex::new(Vec::new())),
            };
            (strategy, calls)
        }
    }

    #[async_trait::async_trait]
    impl SearchStrategy for RecordingStrategy {
        fn name(&self) -> &str {
            self.name
        }

        async fn resolve(&self, query: &str) -> AppResult<SearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            match &self.outcome {
                Ok(data) => Ok(data.clone()),
                Err(message) => Err(AppError::Search(message.to_string())),
            }
        }
    }

    fn snippet_response(snippets: &[&str]) -> SearchResponse {
        SearchResponse {
            organic_results: snippets
                .iter()
                .map(|s| OrganicResult {
                    snippet: Some(s.to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_credential_skips_all_tiers() {
        let provider = ProviderClient::discover(None);
        assert!(!provider.is_configured());

        let answer = provider.answer("what is aspirin?").await;
        assert_eq!(answer, KEY_MISSING);
    }

    #[tokio::test]
    async fn test_blank_credential_counts_as_missing() {
        let provider = ProviderClient::discover(Some("   ".to_string()));
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_first_tier_success_short_circuits() {
        let (first, first_calls) = RecordingStrategy::ok("a", snippet_response(&["hit"]));
        let (second, second_calls) = RecordingStrategy::ok("b", snippet_response(&["miss"]));

        let provider = ProviderClient::with_strategies(vec![Box::new(first), Box::new(second)]);
        let answer = provider.answer("query").await;

        assert_eq!(answer, "hit");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_runs_second_tier_once_with_same_query() {
        let (first, _) = RecordingStrategy::failing("a", "client exploded");
        let (second, second_calls) = RecordingStrategy::ok("b", snippet_response(&["rescued"]));
        let second_queries = second.queries.clone();

        let provider = ProviderClient::with_strategies(vec![Box::new(first), Box::new(second)]);
        let answer = provider.answer("what is aspirin?").await;

        assert_eq!(answer, "rescued");
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            second_queries.lock().unwrap().as_slice(),
            &["what is aspirin?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_all_tiers_failing_composes_error_string() {
        let (first, _) = RecordingStrategy::failing("a", "client exploded");
        let (second, _) = RecordingStrategy::failing("b", "http timed out");

        let provider = ProviderClient::with_strategies(vec![Box::new(first), Box::new(second)]);
        let answer = provider.answer("query").await;

        assert!(answer.contains("Error"));
        assert!(answer.contains("http timed out"));
    }

    #[test]
    fn test_render_answer_prefers_snippets() {
        let mut data = snippet_response(&["one", "two"]);
        data.answer = Some("direct".to_string());

        assert_eq!(render_answer(&data), "one\n\ntwo");
    }

    #[test]
    fn test_render_answer_falls_back_to_answer_field() {
        let data = SearchResponse {
            answer: Some("direct".to_string()),
            ..Default::default()
        };
        assert_eq!(render_answer(&data), "direct");
    }

    #[test]
    fn test_render_answer_falls_back_to_echoed_query() {
        let data = SearchResponse {
            search_information: Some(SearchInformation {
                query_displayed: Some("aspirin".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(render_answer(&data), "aspirin");
    }

    #[test]
    fn test_render_answer_empty_response() {
        assert_eq!(render_answer(&SearchResponse::default()), NO_ANSWER);
    }
}
