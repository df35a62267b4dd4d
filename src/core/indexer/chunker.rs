//! UTF-8 safe text chunking.
//!
//! Sizes are measured in characters, never bytes, so chunk boundaries
//! always fall on character boundaries. Offsets stored on each chunk
//! are byte offsets into the parent text.
//!
//! # Example
//!
//! ```
//! use gdocs_index::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(10, 3).unwrap();
//! let chunks = chunker.chunk_text("Hello 👋 World 🌍 of documents", &Default::default());
//!
//! for chunk in chunks {
//!     assert!(chunk.text.chars().count() <= 10);
//! }
//! ```

use crate::core::error::{GdocsError, Result};
use crate::core::types::{Chunk, TextDocument};
use std::collections::BTreeMap;

/// Default characters per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default overlap between consecutive chunks
pub const DEFAULT_CHUNK_OVERLAP: usize = 20;

/// Fixed-size character chunker with overlap.
///
/// Chunk `k` starts at character `k * (chunk_size - overlap)` and spans
/// up to `chunk_size` characters. The last chunk may be shorter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl Chunker {
    /// Create a chunker.
    ///
    /// Fails with `InvalidChunkConfig` when `chunk_size` is zero or
    /// `overlap >= chunk_size` (the stride would not advance).
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 || overlap >= chunk_size {
            return Err(GdocsError::InvalidChunkConfig {
                size: chunk_size,
                overlap,
            });
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split every document in order. Each chunk carries its own copy of
    /// the parent's metadata.
    pub fn split(&self, documents: &[TextDocument]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| self.chunk_document(doc))
            .collect()
    }

    pub fn chunk_document(&self, document: &TextDocument) -> Vec<Chunk> {
        self.chunk_text(&document.text, &document.metadata)
    }

    /// Chunk raw text, attaching `metadata` to every chunk
    pub fn chunk_text(&self, text: &str, metadata: &BTreeMap<String, String>) -> Vec<Chunk> {
        let char_indices: Vec<(usize, char)> = text.char_indices().collect();

        if char_indices.is_empty() {
            return Vec::new();
        }

        let stride = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut char_start = 0;

        while char_start < char_indices.len() {
            let char_end = (char_start + self.chunk_size).min(char_indices.len());

            let byte_start = char_indices[char_start].0;
            let byte_end = if char_end < char_indices.len() {
                char_indices[char_end].0
            } else {
                text.len()
            };

            chunks.push(Chunk {
                text: text[byte_start..byte_end].to_string(),
                metadata: metadata.clone(),
                start_offset: byte_start,
                end_offset: byte_end,
                chunk_index: chunks.len(),
            });

            char_start += stride;
        }

        chunks
    }
}
