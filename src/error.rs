//! Error types for AnswerChain
//!
//! This module defines the error types used throughout the resolution
//! pipeline. Uses `thiserror` for ergonomic error handling with automatic
//! `Display` and `Error` trait implementations.
//!
//! Provider-level errors never escape a provider's public `answer` operation;
//! they are logged and converted to "no answer" at that boundary.

use thiserror::Error;

/// The primary error type for AnswerChain operations.
#[derive(Error, Debug)]
pub enum AnswerError {
    /// Configuration-related errors (missing credentials, unknown backend, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat-completion provider errors (non-success status, empty completion)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Search backend errors (non-success status, blocked request)
    #[error("Search error: {0}")]
    Search(String),

    /// Unexpected shape of an external response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Corpus file could not be loaded
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors (timeouts, DNS, connection failures)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized `Result` type for AnswerChain operations.
pub type Result<T> = std::result::Result<T, AnswerError>;
