//! External-answer chain for the MedQA CLI.
//!
//! This crate resolves a query through external services when the local
//! dataset cannot answer it. The chain runs two stages:
//!
//! 1. **Encyclopedia tier**: a topic keyword is extracted from the query and
//!    looked up against the Wikipedia REST summary endpoint.
//! 2. **Provider tiers**: an ordered list of search strategies against
//!    SerpAPI, tried until one succeeds (preconfigured client first, plain
//!    HTTP fallback second).
//!
//! The chain is total: every external failure degrades to a user-displayable
//! answer string, never an error.
//!
//! # Example
//! ```no_run
//! use medqa_search::{EncyclopediaClient, ExternalAnswerChain, ProviderClient};
//!
//! # async fn example() {
//! let provider = ProviderClient::discover(Some("secret".to_string()));
//! let chain = ExternalAnswerChain::new(EncyclopediaClient::new(), provider);
//! let answer = chain.answer("What is the treatment for headache?").await;
//! println!("{}", answer);
//! # }
//! ```

pub mod chain;
pub mod encyclopedia;
pub mod provider;
pub mod strategy;
pub mod tiers;
pub mod topic;

// Re-export main types
pub use chain::{ExternalAnswerChain, INVALID_QUESTION};
pub use encyclopedia::EncyclopediaClient;
pub use provider::{ProviderClient, KEY_MISSING, NO_ANSWER};
pub use strategy::{OrganicResult, SearchResponse, SearchStrategy};
pub use topic::extract_topic;
