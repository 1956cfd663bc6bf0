//! Local dataset collaborators for the MedQA CLI.
//!
//! Provides the dataset side of answer resolution behind the
//! `medqa-resolve` trait seams:
//!
//! - [`Corpus`]: newline-delimited JSON document store
//! - [`KeywordRetriever`]: term-overlap retrieval with scores in [0, 1]
//! - [`ExtractiveGenerator`]: composes answers directly from retrieved text
//! - [`OllamaGenerator`]: LLM-backed answer synthesis via a local Ollama
//!   runtime
//!
//! The similarity model here is deliberately simple; it lives entirely
//! behind the [`medqa_resolve::Retriever`] seam and can be swapped without
//! touching resolution.

pub mod corpus;
pub mod generator;
pub mod ollama;
pub mod retriever;

// Re-export main types
pub use corpus::{Corpus, CorpusDocument};
pub use generator::ExtractiveGenerator;
pub use ollama::OllamaGenerator;
pub use retriever::KeywordRetriever;
