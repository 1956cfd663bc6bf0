//! Answer-resolution crate for the MedQA CLI.
//!
//! This crate decides, per query, whether to trust the local dataset
//! retrieval result or fall back to an external answer chain. It defines the
//! narrow trait seams the resolver delegates through:
//!
//! - [`Retriever`]: produces scored documents for a query (local dataset)
//! - [`ContextGenerator`]: synthesizes an answer from retrieved context
//! - [`ExternalAnswerer`]: total fallback that always yields a string
//!
//! The resolver itself never fails: collaborator errors degrade to
//! user-displayable answer strings.
//!
//! # Example
//! ```no_run
//! use medqa_resolve::{routes_external, ResolutionMode};
//!
//! let scores = [0.82, 0.55, 0.31];
//! assert!(!routes_external(ResolutionMode::Hybrid, &scores, 0.4));
//! assert!(routes_external(ResolutionMode::ApiOnly, &scores, 0.4));
//! ```

pub mod journal;
pub mod resolver;
pub mod types;

// Re-export main types
pub use journal::InteractionLogger;
pub use resolver::{routes_external, AnswerResolver};
pub use types::{ContextGenerator, ExternalAnswerer, ResolutionMode, Retrieval, Retriever};
