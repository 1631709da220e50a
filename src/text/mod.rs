//! Text processing for ragstore-rs
//!
//! This module provides the sliding-window chunker and front-matter parsing
//! used by the ingestion pipeline.

pub mod chunking;
pub mod frontmatter;

// Re-export main types and functions
pub use chunking::TextChunker;
pub use frontmatter::split_front_matter;
