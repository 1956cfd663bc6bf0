//! Concrete provider search tiers.
//!
//! Tiers are tried in the order the [`crate::provider::ProviderClient`]
//! discovery assembled them: the preconfigured client tier first, the plain
//! HTTP tier as the last resort.

pub mod client;
pub mod http;

pub use client::ClientSearch;
pub use http::HttpSearch;

/// Default SerpAPI base URL shared by all tiers.
pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Search engine requested from the provider.
pub const SEARCH_ENGINE: &str = "google";

/// Number of results requested per search.
pub const RESULT_COUNT: u32 = 3;
