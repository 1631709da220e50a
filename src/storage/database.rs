//! SQLite embedding store for ragstore-rs
//!
//! This module provides append-only persistence of chunk records using
//! embedded SQLite, with embeddings packed as fixed-width binary blobs.

use crate::error::{RagstoreError, Result};
use crate::storage::schema::*;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

/// A stored chunk record, as returned by a full scan
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRecord {
    /// Row id, assigned at insert time, monotonically increasing
    pub id: i64,

    /// Identifier of the originating document (filename)
    pub source: String,

    /// Front-matter title, or empty string
    pub heading: String,

    /// The chunk text
    pub chunk: String,

    /// Decoded embedding vector
    pub embedding: Vec<f32>,
}

/// A chunk record about to be inserted (id is assigned by the store)
#[derive(Debug, Clone)]
pub struct NewChunk<'a> {
    pub source: &'a str,
    pub heading: &'a str,
    pub chunk: &'a str,
    pub embedding: &'a [f32],
}

/// Encode an embedding vector into its binary blob form (4 bytes per
/// component, little-endian single precision)
pub fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &val in embedding {
        bytes.extend_from_slice(&val.to_le_bytes());
    }
    bytes
}

/// Decode a binary blob back into an embedding vector
pub fn decode_embedding(blob: &[u8]) -> Result<Vec<f32>> {
    if blob.len() % 4 != 0 {
        return Err(RagstoreError::Storage(format!(
            "Embedding blob of {} bytes is not a multiple of 4",
            blob.len()
        )));
    }
    let mut embedding = Vec::with_capacity(blob.len() / 4);
    for chunk in blob.chunks_exact(4) {
        let bytes = [chunk[0], chunk[1], chunk[2], chunk[3]];
        embedding.push(f32::from_le_bytes(bytes));
    }
    Ok(embedding)
}

/// Embedding store connection and operations
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the store at the given path.
    ///
    /// Idempotent: reopening an existing store never destroys data.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| RagstoreError::Storage(format!("Failed to open database: {}", e)))?;

        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            RagstoreError::Storage(format!("Failed to create in-memory database: {}", e))
        })?;

        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Initialize database schema
    fn initialize(&mut self) -> Result<()> {
        // Enable WAL mode for better concurrency
        let _: String = self
            .conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(|e| RagstoreError::Storage(format!("Failed to enable WAL mode: {}", e)))?;

        self.conn
            .execute(CREATE_DOCS_TABLE, [])
            .map_err(|e| RagstoreError::Storage(format!("Failed to create docs table: {}", e)))?;

        self.conn.execute(CREATE_METADATA_TABLE, []).map_err(|e| {
            RagstoreError::Storage(format!("Failed to create metadata table: {}", e))
        })?;

        self.conn
            .execute(CREATE_DOCS_INDEXES, [])
            .map_err(|e| RagstoreError::Storage(format!("Failed to create source index: {}", e)))?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)",
                params![SCHEMA_VERSION.to_string()],
            )
            .map_err(|e| RagstoreError::Storage(format!("Failed to set schema version: {}", e)))?;

        log::info!("Store initialized with schema version {}", SCHEMA_VERSION);
        Ok(())
    }

    /// Dimensionality of the stored corpus, or `None` for an empty store
    pub fn embedding_dimension(&self) -> Result<Option<usize>> {
        let blob_len: Option<i64> = self
            .conn
            .query_row("SELECT length(embedding) FROM docs ORDER BY id LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| {
                RagstoreError::Storage(format!("Failed to query embedding dimension: {}", e))
            })?;

        Ok(blob_len.map(|len| len as usize / 4))
    }

    /// Append one chunk record. Returns the assigned row id.
    ///
    /// Rejects empty chunk text and empty embeddings, and rejects any
    /// embedding whose dimensionality differs from the existing corpus.
    /// The row is durable when this returns (autocommit).
    pub fn insert_chunk(&mut self, chunk: &NewChunk<'_>) -> Result<i64> {
        if chunk.chunk.is_empty() {
            return Err(RagstoreError::Storage(
                "Refusing to insert empty chunk text".to_string(),
            ));
        }
        if chunk.embedding.is_empty() {
            return Err(RagstoreError::Storage(
                "Refusing to insert empty embedding".to_string(),
            ));
        }
        if let Some(expected) = self.embedding_dimension()? {
            if chunk.embedding.len() != expected {
                return Err(RagstoreError::DimensionMismatch {
                    expected,
                    actual: chunk.embedding.len(),
                });
            }
        }

        let blob = encode_embedding(chunk.embedding);
        self.conn
            .execute(
                "INSERT INTO docs (source, heading, chunk, embedding) VALUES (?, ?, ?, ?)",
                params![chunk.source, chunk.heading, chunk.chunk, blob],
            )
            .map_err(|e| RagstoreError::Storage(format!("Failed to insert chunk: {}", e)))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Read every stored record in id order, decoding embeddings
    pub fn scan_all(&self) -> Result<Vec<ChunkRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, source, heading, chunk, embedding FROM docs ORDER BY id")
            .map_err(|e| RagstoreError::Storage(format!("Failed to prepare scan: {}", e)))?;

        let rows = stmt
            .query_map([], Self::row_to_raw)
            .map_err(|e| RagstoreError::Storage(format!("Failed to scan docs: {}", e)))?;

        let mut result = Vec::new();
        for row in rows {
            let (id, source, heading, chunk, blob) =
                row.map_err(|e| RagstoreError::Storage(format!("Failed to read row: {}", e)))?;
            result.push(ChunkRecord {
                id,
                source,
                heading,
                chunk,
                embedding: decode_embedding(&blob)?,
            });
        }

        Ok(result)
    }

    /// Total number of stored records
    pub fn chunk_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM docs", [], |row| row.get(0))
            .map_err(|e| RagstoreError::Storage(format!("Failed to count docs: {}", e)))?;

        Ok(count as usize)
    }

    /// Get store statistics
    pub fn stats(&self) -> Result<StoreStats> {
        let chunk_count = self.chunk_count()?;
        let dimension = self.embedding_dimension()?;

        let source_count: i64 = self
            .conn
            .query_row("SELECT COUNT(DISTINCT source) FROM docs", [], |row| {
                row.get(0)
            })
            .map_err(|e| RagstoreError::Storage(format!("Failed to count sources: {}", e)))?;

        let file_size: i64 = self
            .conn
            .query_row(
                "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
                [],
                |row| row.get(0),
            )
            .map_err(|e| RagstoreError::Storage(format!("Failed to get database size: {}", e)))?;

        Ok(StoreStats {
            chunk_count,
            source_count: source_count as usize,
            dimension,
            file_size_bytes: file_size as usize,
        })
    }

    fn row_to_raw(row: &Row) -> rusqlite::Result<(i64, String, String, String, Vec<u8>)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    }
}

/// Store statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub chunk_count: usize,
    pub source_count: usize,
    pub dimension: Option<usize>,
    pub file_size_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(
        source: &'static str,
        chunk: &'static str,
        embedding: &'static [f32],
    ) -> NewChunk<'static> {
        NewChunk {
            source,
            heading: "",
            chunk,
            embedding,
        }
    }

    #[test]
    fn test_insert_and_scan_round_trip() {
        let mut store = Store::memory().unwrap();
        let id = store
            .insert_chunk(&sample("a.md", "hello world", &[1.0, 2.0, 3.0]))
            .unwrap();
        assert_eq!(id, 1);

        let records = store.scan_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].source, "a.md");
        assert_eq!(records[0].heading, "");
        assert_eq!(records[0].chunk, "hello world");
        assert_eq!(records[0].embedding, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut store = Store::memory().unwrap();
        let first = store
            .insert_chunk(&sample("a.md", "one", &[1.0, 0.0]))
            .unwrap();
        let second = store
            .insert_chunk(&sample("a.md", "two", &[0.0, 1.0]))
            .unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_reingest_appends_rather_than_replacing() {
        let mut store = Store::memory().unwrap();
        store
            .insert_chunk(&sample("a.md", "same text", &[1.0, 0.0]))
            .unwrap();
        store
            .insert_chunk(&sample("a.md", "same text", &[1.0, 0.0]))
            .unwrap();
        assert_eq!(store.chunk_count().unwrap(), 2);
    }

    #[test]
    fn test_empty_chunk_rejected() {
        let mut store = Store::memory().unwrap();
        let result = store.insert_chunk(&sample("a.md", "", &[1.0]));
        assert!(matches!(result, Err(RagstoreError::Storage(_))));
    }

    #[test]
    fn test_empty_embedding_rejected() {
        let mut store = Store::memory().unwrap();
        let result = store.insert_chunk(&sample("a.md", "text", &[]));
        assert!(matches!(result, Err(RagstoreError::Storage(_))));
    }

    #[test]
    fn test_dimension_mismatch_rejected_at_insert() {
        let mut store = Store::memory().unwrap();
        store
            .insert_chunk(&sample("a.md", "first", &[1.0, 2.0, 3.0]))
            .unwrap();
        let result = store.insert_chunk(&sample("b.md", "second", &[1.0, 2.0]));
        assert!(matches!(
            result,
            Err(RagstoreError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_embedding_blob_round_trip() {
        let original = vec![0.0f32, -1.5, 3.25, f32::MIN_POSITIVE, 1e30, -0.0];
        let blob = encode_embedding(&original);
        assert_eq!(blob.len(), original.len() * 4);
        let decoded = decode_embedding(&blob).unwrap();
        for (a, b) in original.iter().zip(decoded.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_decode_rejects_truncated_blob() {
        let blob = vec![0u8; 7];
        assert!(decode_embedding(&blob).is_err());
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let mut store = Store::open(&path).unwrap();
            store
                .insert_chunk(&sample("a.md", "persisted", &[1.0, 2.0]))
                .unwrap();
        }

        // Reopening must preserve existing rows
        let store = Store::open(&path).unwrap();
        assert_eq!(store.chunk_count().unwrap(), 1);
        assert_eq!(store.embedding_dimension().unwrap(), Some(2));
    }

    #[test]
    fn test_empty_store_dimension_is_none() {
        let store = Store::memory().unwrap();
        assert_eq!(store.embedding_dimension().unwrap(), None);
        assert!(store.scan_all().unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let mut store = Store::memory().unwrap();
        store
            .insert_chunk(&sample("a.md", "one", &[1.0, 0.0]))
            .unwrap();
        store
            .insert_chunk(&sample("b.md", "two", &[0.0, 1.0]))
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.chunk_count, 2);
        assert_eq!(stats.source_count, 2);
        assert_eq!(stats.dimension, Some(2));
    }
}
