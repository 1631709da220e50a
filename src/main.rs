//! ragstore-rs CLI application
//!
//! Command-line interface for the ragstore-rs library.

use clap::{Parser, Subcommand};
use ragstore_rs::{
    ChunkingConfig, EmbeddingConfig, EmbeddingProvider, OpenAiEmbedder, Store, ingest_directory,
    search,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ragstore-rs")]
#[command(about = "Document ingestion and cosine similarity search over a SQLite embedding store")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Embedding store (SQLite database)
    #[arg(long, global = true, default_value = "rag.db")]
    db: PathBuf,

    /// Base URL of an OpenAI-compatible embeddings API
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Embedding model name
    #[arg(long, global = true)]
    model: Option<String>,

    /// API key (falls back to EMBEDDINGS_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a directory of .md/.txt documents into the store
    Ingest {
        /// Directory containing the documents
        dir: PathBuf,

        /// Chunk size in characters
        #[arg(long, default_value = "1000")]
        chunk_size: usize,

        /// Overlap between chunks in characters
        #[arg(long, default_value = "200")]
        overlap: usize,
    },

    /// Search the store for chunks similar to a query
    Search {
        /// Search query (embedded through the configured provider)
        query: String,

        /// Number of results to return
        #[arg(short = 'k', long, default_value = "5")]
        top_k: usize,
    },

    /// Print store statistics
    Stats,
}

impl Cli {
    fn embedding_config(&self) -> EmbeddingConfig {
        let mut config = EmbeddingConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Ingest {
            dir,
            chunk_size,
            overlap,
        } => {
            let chunking = ChunkingConfig {
                chunk_size: *chunk_size,
                overlap: *overlap,
            };
            let mut store = Store::open(&cli.db)?;
            let embedder = OpenAiEmbedder::new(&cli.embedding_config())?;

            let stats = ingest_directory(&mut store, &embedder, dir, &chunking).await?;
            println!(
                "Ingested {} chunks from {} files in {:.2}s",
                stats.total_chunks, stats.total_files, stats.processing_time
            );
        }
        Commands::Search { query, top_k } => {
            let store = Store::open(&cli.db)?;
            let embedder = OpenAiEmbedder::new(&cli.embedding_config())?;

            let query_embedding = embedder.embed(query).await?;
            let results = search(&store, &query_embedding, *top_k)?;

            if results.is_empty() {
                println!("No results (empty store?)");
            }
            for (rank, result) in results.iter().enumerate() {
                let heading = if result.heading.is_empty() {
                    String::new()
                } else {
                    format!(" — {}", result.heading)
                };
                println!(
                    "{}. [{:.4}] {}{}\n   {}",
                    rank + 1,
                    result.score,
                    result.source,
                    heading,
                    result.text.trim()
                );
            }
        }
        Commands::Stats => {
            let store = Store::open(&cli.db)?;
            let stats = store.stats()?;
            println!("Chunks:    {}", stats.chunk_count);
            println!("Sources:   {}", stats.source_count);
            println!(
                "Dimension: {}",
                stats
                    .dimension
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "(empty store)".to_string())
            );
            println!("File size: {} bytes", stats.file_size_bytes);
        }
    }

    Ok(())
}
