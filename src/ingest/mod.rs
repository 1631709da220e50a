//! Document ingestion pipeline
//!
//! Turns a directory of `.md`/`.txt` documents into chunk records: split
//! front-matter, window the body, embed each window through the external
//! provider, and append each (chunk, vector) pair to the store.

use crate::config::ChunkingConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagstoreError, Result};
use crate::storage::{NewChunk, Store};
use crate::text::{TextChunker, split_front_matter};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;

/// Ingestion statistics
#[derive(Debug, Clone)]
pub struct IngestStats {
    /// Number of files ingested
    pub total_files: usize,

    /// Number of chunk records written
    pub total_chunks: usize,

    /// Total processing time in seconds
    pub processing_time: f64,
}

fn is_ingestible(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("md") | Some("txt")
    )
}

/// Ingest every `.md`/`.txt` file in a directory.
///
/// Files are processed in filename order so runs are deterministic. The
/// first failure (unreadable file, provider error, storage error) aborts
/// the run and propagates; there is no per-chunk retry or partial-success
/// bookkeeping. Re-ingesting a directory appends new rows.
pub async fn ingest_directory<P: EmbeddingProvider>(
    store: &mut Store,
    provider: &P,
    dir: &Path,
    chunking: &ChunkingConfig,
) -> Result<IngestStats> {
    let start = Instant::now();
    let chunker = TextChunker::new(chunking.clone())?;

    let mut files: Vec<_> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_ingestible(path))
        .collect();
    files.sort();

    let mut total_chunks = 0;
    for path in &files {
        total_chunks += ingest_file(store, provider, &chunker, path).await?;
    }

    let stats = IngestStats {
        total_files: files.len(),
        total_chunks,
        processing_time: start.elapsed().as_secs_f64(),
    };
    log::info!(
        "Ingested {} chunks from {} files in {:.2}s",
        stats.total_chunks,
        stats.total_files,
        stats.processing_time
    );
    Ok(stats)
}

/// Ingest a single document. Returns the number of chunks written.
pub async fn ingest_file<P: EmbeddingProvider>(
    store: &mut Store,
    provider: &P,
    chunker: &TextChunker,
    path: &Path,
) -> Result<usize> {
    let source = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            RagstoreError::TextProcessing(format!("Invalid file name: {}", path.display()))
        })?
        .to_string();

    let raw = std::fs::read_to_string(path)?;
    let (heading, body) = split_front_matter(&raw);
    let chunks = chunker.chunk(&body);

    let progress = ProgressBar::new(chunks.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
            .map_err(|e| RagstoreError::Generic(e.to_string()))?,
    );
    progress.set_message(source.clone());

    for chunk in &chunks {
        let embedding = provider.embed(chunk).await?;
        store.insert_chunk(&NewChunk {
            source: &source,
            heading: &heading,
            chunk,
            embedding: &embedding,
        })?;
        progress.inc(1);
    }
    progress.finish();

    log::info!("Ingested {} ({} chunks)", source, chunks.len());
    Ok(chunks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::Embedding;
    use std::io::Write;

    /// Deterministic fake provider: a fixed-dimension vector derived from
    /// the text bytes.
    struct FakeEmbedder {
        dimension: usize,
    }

    impl EmbeddingProvider for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Embedding> {
            let mut v = vec![0.0f32; self.dimension];
            for (i, b) in text.bytes().enumerate() {
                v[i % self.dimension] += b as f32 / 255.0;
            }
            Ok(v)
        }
    }

    /// Provider that always fails, for abort-path tests.
    struct FailingEmbedder;

    impl EmbeddingProvider for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Embedding> {
            Err(RagstoreError::Embedding("provider unavailable".to_string()))
        }
    }

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn test_ingest_directory_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.md", "markdown body");
        write_file(dir.path(), "b.txt", "plain text body");
        write_file(dir.path(), "c.pdf", "ignored");
        write_file(dir.path(), "d.json", "{}");

        let mut store = Store::memory().unwrap();
        let provider = FakeEmbedder { dimension: 8 };
        let stats = ingest_directory(
            &mut store,
            &provider,
            dir.path(),
            &ChunkingConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_chunks, 2);
        assert_eq!(store.chunk_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_front_matter_becomes_heading() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "faq.md",
            "---\ntitle: \"FAQ\"\n---\nSome answers live here.",
        );

        let mut store = Store::memory().unwrap();
        let provider = FakeEmbedder { dimension: 4 };
        ingest_directory(
            &mut store,
            &provider,
            dir.path(),
            &ChunkingConfig::default(),
        )
        .await
        .unwrap();

        let records = store.scan_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, "faq.md");
        assert_eq!(records[0].heading, "FAQ");
        assert_eq!(records[0].chunk, "Some answers live here.");
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.md", "body");

        let mut store = Store::memory().unwrap();
        let result = ingest_directory(
            &mut store,
            &FailingEmbedder,
            dir.path(),
            &ChunkingConfig::default(),
        )
        .await;

        assert!(matches!(result, Err(RagstoreError::Embedding(_))));
        assert_eq!(store.chunk_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_file_yields_no_chunks() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "empty.md", "");

        let mut store = Store::memory().unwrap();
        let provider = FakeEmbedder { dimension: 4 };
        let stats = ingest_directory(
            &mut store,
            &provider,
            dir.path(),
            &ChunkingConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.total_chunks, 0);
    }

    #[tokio::test]
    async fn test_reingest_appends() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.md", "same content");

        let mut store = Store::memory().unwrap();
        let provider = FakeEmbedder { dimension: 4 };
        let config = ChunkingConfig::default();
        ingest_directory(&mut store, &provider, dir.path(), &config)
            .await
            .unwrap();
        ingest_directory(&mut store, &provider, dir.path(), &config)
            .await
            .unwrap();

        assert_eq!(store.chunk_count().unwrap(), 2);
    }
}
