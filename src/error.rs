//! Error types for ragstore-rs
//!
//! This module provides error handling for all ragstore operations,
//! including chunking, embedding provider calls, and storage.

use thiserror::Error;

/// Main error type for ragstore operations
#[derive(Error, Debug)]
pub enum RagstoreError {
    /// Text processing errors (chunking, front-matter)
    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// Embedding provider errors (failed call, empty or malformed vector)
    #[error("Embedding provider error: {0}")]
    Embedding(String),

    /// A vector whose length differs from the rest of the corpus
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Database/storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(String),
}

/// Result type alias for ragstore operations
pub type Result<T> = std::result::Result<T, RagstoreError>;

impl From<anyhow::Error> for RagstoreError {
    fn from(err: anyhow::Error) -> Self {
        RagstoreError::Generic(err.to_string())
    }
}
