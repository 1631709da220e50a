//! # ragstore-rs
//!
//! Document ingestion and brute-force cosine similarity search over a
//! SQLite-backed embedding store. Documents are split into overlapping
//! character windows, embedded through an external provider, and persisted;
//! search scans the whole corpus and returns the top-K records by cosine
//! similarity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ragstore_rs::{
//!     Config, EmbeddingProvider, OpenAiEmbedder, Store, ingest_directory, search,
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let mut store = Store::open("rag.db")?;
//!     let embedder = OpenAiEmbedder::new(&config.embedding)?;
//!
//!     // Ingest a knowledge directory of .md/.txt files
//!     let stats = ingest_directory(
//!         &mut store,
//!         &embedder,
//!         Path::new("knowledge"),
//!         &config.chunking,
//!     )
//!     .await?;
//!     println!("Stored {} chunks", stats.total_chunks);
//!
//!     // Embed a query and retrieve the most similar chunks
//!     let query = embedder.embed("How do I get started?").await?;
//!     for result in search(&store, &query, 5)? {
//!         println!("{:.3} [{}] {}", result.score, result.source, result.text);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod search;
pub mod storage;
pub mod text;

// Re-export main API types
pub use config::{ChunkingConfig, Config, EmbeddingConfig, SearchConfig};
pub use embedding::{Embedding, EmbeddingProvider, OpenAiEmbedder};
pub use error::{RagstoreError, Result};
pub use ingest::{IngestStats, ingest_directory, ingest_file};
pub use search::{SearchResult, cosine_similarity, search};
pub use storage::{ChunkRecord, NewChunk, Store, StoreStats};
pub use text::{TextChunker, split_front_matter};
