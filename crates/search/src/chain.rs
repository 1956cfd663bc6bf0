//! The external-answer chain: Encyclopedia → Provider.
//!
//! One query resolution walks the chain until a tier yields an answer or
//! every tier is exhausted. The chain never lets an error escape: each
//! terminal outcome is a user-displayable string.

use crate::encyclopedia::EncyclopediaClient;
use crate::provider::ProviderClient;
use crate::topic::extract_topic;
use medqa_resolve::ExternalAnswerer;

/// Message returned when the query contains no alphabetic content at all.
pub const INVALID_QUESTION: &str = "Please enter a valid question.";

/// Source marker prefixed to encyclopedia answers.
const ENCYCLOPEDIA_MARKER: &str = "Wikipedia:";

/// Chained external resolution over the encyclopedia and provider tiers.
pub struct ExternalAnswerChain {
    encyclopedia: EncyclopediaClient,
    provider: ProviderClient,
}

impl ExternalAnswerChain {
    /// Build the chain over already-discovered clients.
    pub fn new(encyclopedia: EncyclopediaClient, provider: ProviderClient) -> Self {
        Self {
            encyclopedia,
            provider,
        }
    }

    /// Resolve a query through the chain.
    ///
    /// Terminal outcomes, in order:
    /// 1. no extractable topic → invalid-question message, no network call;
    /// 2. encyclopedia summary hit → marked extract;
    /// 3. provider tier hit → rendered snippets;
    /// 4. everything failed → the provider's composed error string.
    pub async fn answer(&self, query: &str) -> String {
        let Some(topic) = extract_topic(query) else {
            tracing::debug!("query has no alphabetic content; rejecting before lookup");
            return INVALID_QUESTION.to_string();
        };

        match self.encyclopedia.summary(&topic).await {
            Ok(Some(extract)) => {
                tracing::debug!(topic, "answered from the encyclopedia tier");
                return format!("{}\n\n{}", ENCYCLOPEDIA_MARKER, extract);
            }
            Ok(None) => {}
            Err(e) => tracing::debug!(topic, "encyclopedia tier failed: {}", e),
        }

        self.provider.answer(query).await
    }
}

#[async_trait::async_trait]
impl ExternalAnswerer for ExternalAnswerChain {
    async fn answer(&self, query: &str) -> String {
        ExternalAnswerChain::answer(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_chain() -> ExternalAnswerChain {
        // No credential, unroutable encyclopedia endpoint: only the
        // no-network code paths are reachable.
        ExternalAnswerChain::new(
            EncyclopediaClient::with_base_url("http://127.0.0.1:0"),
            ProviderClient::discover(None),
        )
    }

    #[tokio::test]
    async fn test_non_alphabetic_query_rejected_before_lookup() {
        let chain = offline_chain();
        assert_eq!(chain.answer("123 ??").await, INVALID_QUESTION);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_reports_missing_key() {
        // The invalid port makes the encyclopedia tier fail immediately,
        // so the chain falls through to the unconfigured provider.
        let chain = offline_chain();
        let answer = chain.answer("what is aspirin").await;
        assert_eq!(answer, crate::provider::KEY_MISSING);
    }
}
