//! Storage functionality for ragstore-rs
//!
//! This module provides the embedding store backed by embedded SQLite.

pub mod database;
pub mod schema;

// Re-export main types
pub use database::{ChunkRecord, NewChunk, Store, StoreStats, decode_embedding, encode_embedding};
