//! Configuration for ragstore-rs

use crate::error::{RagstoreError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for sliding-window text chunking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,

    /// Overlap between consecutive windows in characters
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl ChunkingConfig {
    /// Validate the configuration.
    ///
    /// The window stride is `chunk_size - overlap`; an overlap greater than
    /// or equal to the chunk size would never advance, so it is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RagstoreError::Config(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(RagstoreError::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Configuration for the external embedding provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Base URL of an OpenAI-compatible API (e.g., "http://localhost:11434/v1" for Ollama)
    pub base_url: String,

    /// API key; may be empty for local providers
    pub api_key: String,

    /// Embedding model name
    pub model: String,

    /// Requested output dimensionality, if the provider supports it
    pub dimensions: Option<usize>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "text-embedding-3-small".to_string(),
            dimensions: None,
            timeout_secs: 30,
        }
    }
}

impl EmbeddingConfig {
    /// Build a configuration from `EMBEDDINGS_BASE_URL`, `EMBEDDINGS_API_KEY`
    /// and `EMBEDDINGS_MODEL`, falling back to defaults for unset variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("EMBEDDINGS_BASE_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("EMBEDDINGS_API_KEY").unwrap_or(defaults.api_key),
            model: std::env::var("EMBEDDINGS_MODEL").unwrap_or(defaults.model),
            dimensions: None,
            timeout_secs: defaults.timeout_secs,
        }
    }
}

/// Configuration for similarity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of results to return
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()
    }
}
