//! Error types for the MedQA CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, query input, external
//! search, and dataset errors.

use thiserror::Error;

/// Unified error type for the MedQA CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input (empty query, no alphabetic content)
    #[error("Input error: {0}")]
    Input(String),

    /// External search errors (encyclopedia or provider tier)
    #[error("Search error: {0}")]
    Search(String),

    /// Local dataset and retrieval errors
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
