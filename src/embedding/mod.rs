//! Embedding provider abstraction for ragstore-rs
//!
//! Embeddings come from an external provider, one vector per chunk. The
//! trait seam keeps the ingestion pipeline testable with an in-memory fake.

pub mod openai;

use crate::error::Result;

/// Embedding vector type
pub type Embedding = Vec<f32>;

/// An external text-embedding provider.
///
/// One call embeds one text and returns exactly one vector. Calls are
/// synchronous request/response and stateless; there is no internal retry,
/// so a failed call surfaces to the caller.
pub trait EmbeddingProvider {
    /// Embed a single text into a vector
    fn embed(&self, text: &str) -> impl Future<Output = Result<Embedding>> + Send;
}

// Re-export main types
pub use openai::OpenAiEmbedder;
