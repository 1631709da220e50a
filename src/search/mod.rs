//! Brute-force cosine similarity search
//!
//! Search scans every stored record and ranks by cosine similarity against
//! the query vector. Linear scan is the correctness baseline for small
//! corpora; an approximate index could sit behind the same contract.

use crate::error::{RagstoreError, Result};
use crate::storage::Store;

/// Search result carrying the full chunk record plus its similarity score
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Stored record id
    pub id: i64,

    /// Originating document
    pub source: String,

    /// Front-matter title, or empty string
    pub heading: String,

    /// The chunk text
    pub text: String,

    /// Cosine similarity against the query
    pub score: f32,
}

/// Cosine similarity between two vectors of equal length.
///
/// Returns 0.0 when either vector has zero norm; a text embedding should
/// never legitimately be all-zero, but search must not divide by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Return the `top_k` stored records most similar to the query vector,
/// ranked descending by cosine similarity.
///
/// An empty store yields an empty result. A store smaller than `top_k`
/// yields every record. Equal scores keep scan (id) order, so results are
/// deterministic across runs over identical data. Any stored vector whose
/// length differs from the query fails with a dimension mismatch.
pub fn search(store: &Store, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
    if query.is_empty() {
        return Err(RagstoreError::Config(
            "query embedding must not be empty".to_string(),
        ));
    }

    let records = store.scan_all()?;

    let mut results = Vec::with_capacity(records.len());
    for record in records {
        if record.embedding.len() != query.len() {
            return Err(RagstoreError::DimensionMismatch {
                expected: query.len(),
                actual: record.embedding.len(),
            });
        }
        let score = cosine_similarity(&record.embedding, query);
        results.push(SearchResult {
            id: record.id,
            source: record.source,
            heading: record.heading,
            text: record.chunk,
            score,
        });
    }

    // Stable sort: ties keep scan order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_k);

    log::debug!(
        "Search returned {} results for top_k={}",
        results.len(),
        top_k
    );
    Ok(results)
}
