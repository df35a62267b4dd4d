//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end indexing workflow:
//! 1. Chunk every document
//! 2. Insert the chunks into a fresh in-memory index
//! 3. Commit and report statistics

use std::time::Instant;

use crate::core::error::Result;
use crate::core::index::DocumentIndex;
use crate::core::indexer::Chunker;
use crate::core::types::{IndexStats, TextDocument};

/// Turns a batch of documents into a searchable index
pub struct IndexingPipeline {
    chunker: Chunker,
}

impl IndexingPipeline {
    /// Create a pipeline. Fails when `overlap >= chunk_size` or the
    /// size is zero.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        Ok(Self {
            chunker: Chunker::new(chunk_size, overlap)?,
        })
    }

    pub fn from_chunker(chunker: Chunker) -> Self {
        Self { chunker }
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Chunk and index `documents`.
    ///
    /// Documents with empty text contribute no chunks and are not
    /// counted as indexed.
    pub fn index_documents(&self, documents: &[TextDocument]) -> Result<(DocumentIndex, IndexStats)> {
        let start = Instant::now();
        tracing::info!("Indexing {} documents", documents.len());

        let mut index = DocumentIndex::create()?;
        let mut chunks_created = 0;
        let mut documents_indexed = 0;

        for (idx, document) in documents.iter().enumerate() {
            if idx % 100 == 0 && idx > 0 {
                tracing::info!("Progress: {}/{} documents chunked", idx, documents.len());
            }

            let chunks = self.chunker.chunk_document(document);
            tracing::debug!(
                title = document.title(),
                chunks = chunks.len(),
                "Chunked document"
            );
            if chunks.is_empty() {
                continue;
            }
            documents_indexed += 1;
            chunks_created += chunks.len();
            index.insert(&chunks)?;
        }

        index.commit()?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Indexing complete: {} documents, {} chunks in {}ms",
            documents_indexed,
            chunks_created,
            duration_ms
        );

        let stats = IndexStats {
            documents_indexed,
            chunks_created,
            duration_ms,
        };

        Ok((index, stats))
    }
}
