//! In-RAM Tantivy index over document chunks.
//!
//! The index lives only as long as the `DocumentIndex` value; nothing
//! is written to disk and every run rebuilds it.

use crate::core::error::{GdocsError, Result};
use crate::core::index::IndexBackend;
use crate::core::types::{
    Chunk, META_DATA_SOURCE, META_DOC_ID, META_FILE_ID, META_SOURCE_TYPE, META_TITLE,
};
use chrono::Utc;
use tantivy::schema::{Field, Schema, INDEXED, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexWriter};

/// Writer heap budget (Tantivy's minimum per thread is 15MB)
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Handles to every schema field
#[derive(Debug, Clone, Copy)]
pub(crate) struct IndexFields {
    pub text: Field,
    pub title: Field,
    pub doc_id: Field,
    pub data_source: Field,
    pub source_type: Field,
    pub chunk_index: Field,
    pub offset_start: Field,
    pub offset_end: Field,
    pub indexed_at: Field,
}

/// Create the chunk schema.
///
/// `text` and `title` are tokenized for BM25; ids and source tags are
/// stored verbatim.
pub fn create_schema() -> Schema {
    build_schema().0
}

fn build_schema() -> (Schema, IndexFields) {
    let mut builder = Schema::builder();

    let fields = IndexFields {
        text: builder.add_text_field("text", TEXT | STORED),
        title: builder.add_text_field("title", TEXT | STORED),
        doc_id: builder.add_text_field("doc_id", STRING | STORED),
        data_source: builder.add_text_field("data_source", STRING | STORED),
        source_type: builder.add_text_field("source_type", STRING | STORED),
        chunk_index: builder.add_u64_field("chunk_index", INDEXED | STORED),
        offset_start: builder.add_u64_field("offset_start", STORED),
        offset_end: builder.add_u64_field("offset_end", STORED),
        indexed_at: builder.add_date_field("indexed_at", STORED),
    };

    (builder.build(), fields)
}

/// Queryable handle over the indexed chunks
pub struct DocumentIndex {
    index: Index,
    fields: IndexFields,
    writer: IndexWriter,
    num_chunks: usize,
    pub(crate) default_k: usize,
    pub(crate) max_k: usize,
}

impl std::fmt::Debug for DocumentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentIndex")
            .field("num_chunks", &self.num_chunks)
            .field("default_k", &self.default_k)
            .field("max_k", &self.max_k)
            .finish()
    }
}

impl DocumentIndex {
    /// Create an empty in-memory index
    pub fn create() -> Result<Self> {
        let (schema, fields) = build_schema();
        let index = Index::create_in_ram(schema);

        let writer = index
            .writer_with_num_threads(1, WRITER_HEAP_BYTES)
            .map_err(|e| GdocsError::StorageError(format!("Failed to create writer: {e}")))?;

        Ok(Self {
            index,
            fields,
            writer,
            num_chunks: 0,
            default_k: 5,
            max_k: 50,
        })
    }

    /// Create an index holding `chunks`, committed and ready to search
    pub fn build(chunks: &[Chunk]) -> Result<Self> {
        let mut index = Self::create()?;
        index.insert(chunks)?;
        index.commit()?;
        Ok(index)
    }

    /// Set the result limits used by `search`
    pub fn with_limits(mut self, default_k: usize, max_k: usize) -> Self {
        self.max_k = max_k.max(1);
        self.default_k = default_k.clamp(1, self.max_k);
        self
    }

    /// Stage chunks for the next commit
    pub fn insert(&mut self, chunks: &[Chunk]) -> Result<()> {
        let IndexFields {
            text,
            title,
            doc_id: doc_id_field,
            data_source,
            source_type,
            chunk_index,
            offset_start,
            offset_end,
            indexed_at: indexed_at_field,
        } = self.fields;
        let indexed_at = tantivy::DateTime::from_timestamp_secs(Utc::now().timestamp());

        for chunk in chunks {
            let meta = |key: &str| chunk.metadata.get(key).map(String::as_str).unwrap_or("");
            let doc_id = chunk
                .metadata
                .get(META_DOC_ID)
                .or_else(|| chunk.metadata.get(META_FILE_ID))
                .map(String::as_str)
                .unwrap_or("");

            self.writer
                .add_document(doc!(
                    text => chunk.text.as_str(),
                    title => meta(META_TITLE),
                    doc_id_field => doc_id,
                    data_source => meta(META_DATA_SOURCE),
                    source_type => meta(META_SOURCE_TYPE),
                    chunk_index => chunk.chunk_index as u64,
                    offset_start => chunk.start_offset as u64,
                    offset_end => chunk.end_offset as u64,
                    indexed_at_field => indexed_at,
                ))
                .map_err(|e| GdocsError::StorageError(format!("Failed to add chunk: {e}")))?;
        }

        self.num_chunks += chunks.len();
        Ok(())
    }

    /// Make staged chunks visible to searches
    pub fn commit(&mut self) -> Result<()> {
        self.writer
            .commit()
            .map_err(|e| GdocsError::StorageError(format!("Failed to commit: {e}")))?;
        Ok(())
    }

    /// Number of chunks added so far
    pub fn num_chunks(&self) -> usize {
        self.num_chunks
    }

    pub fn is_empty(&self) -> bool {
        self.num_chunks == 0
    }

    pub(crate) fn index(&self) -> &Index {
        &self.index
    }

    pub(crate) fn fields(&self) -> &IndexFields {
        &self.fields
    }
}

impl IndexBackend for DocumentIndex {
    fn name(&self) -> &str {
        "tantivy-ram"
    }

    fn add_chunks(&mut self, chunks: &[Chunk]) -> Result<usize> {
        self.insert(chunks)?;
        self.commit()?;
        Ok(chunks.len())
    }
}
