//! Sliding-window text chunking
//!
//! Documents are split into overlapping fixed-size character windows before
//! embedding. Window boundaries are fully determined by the configuration,
//! so re-chunking identical input always yields identical chunks.

use crate::config::ChunkingConfig;
use crate::error::Result;

/// Text chunker producing overlapping character windows
pub struct TextChunker {
    config: ChunkingConfig,
}

impl TextChunker {
    /// Create a new chunker, validating the configuration
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a chunker with default configuration (1000-char windows, 200-char overlap)
    pub fn with_default_config() -> Result<Self> {
        Self::new(ChunkingConfig::default())
    }

    /// Split text into overlapping windows.
    ///
    /// For window size `S` and overlap `O`, window `i` covers characters
    /// `[i*(S-O), i*(S-O)+S)`. The last window is truncated at the end of
    /// the text, never padded. Empty input yields no windows; windows are
    /// never empty.
    ///
    /// Windows are measured in characters, not bytes, so multi-byte UTF-8
    /// sequences are never split.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let char_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let total_chars = char_offsets.len();
        // validate() guarantees a positive stride
        let stride = self.config.chunk_size - self.config.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < total_chars {
            let end = std::cmp::min(start + self.config.chunk_size, total_chars);
            let byte_start = char_offsets[start];
            let byte_end = if end == total_chars {
                text.len()
            } else {
                char_offsets[end]
            };
            chunks.push(text[byte_start..byte_end].to_string());
            start += stride;
        }

        chunks
    }
}
