//! Core data types for gdocs-index.
//!
//! Covers the structured document returned by the Docs API, the
//! flattened `TextDocument`, the `Chunk` handed to the index, and the
//! small result/statistics structs returned to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key for the document title
pub const META_TITLE: &str = "title";
/// Metadata key for a Docs document id
pub const META_DOC_ID: &str = "doc_id";
/// Metadata key for a Drive file id
pub const META_FILE_ID: &str = "file_id";
/// Metadata key for a Drive file name
pub const META_FILE_NAME: &str = "file_name";
/// Metadata key for the caller-supplied data source id
pub const META_DATA_SOURCE: &str = "data_source";
/// Metadata key for the source type tag
pub const META_SOURCE_TYPE: &str = "source_type";

/// `source_type` value for documents read by id
pub const SOURCE_GOOGLE_DOCS: &str = "google_docs";
/// `source_type` value for documents read from a Drive folder
pub const SOURCE_GOOGLE_DRIVE: &str = "google_drive";

/// A document as returned by `documents.get`.
///
/// Only the fields needed for text extraction are modelled; everything
/// else in the API response is ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

/// Document body: ordered structural elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// One block of the body. Tables, section breaks and the like carry no
/// paragraph and are skipped by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_run: Option<TextRun>,
}

/// Leaf unit holding literal text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StructuredDocument {
    /// Build a document with one paragraph per entry, each paragraph
    /// holding one text run per string.
    pub fn from_paragraphs(title: &str, paragraphs: &[&[&str]]) -> Self {
        let content = paragraphs
            .iter()
            .map(|runs| StructuralElement {
                paragraph: Some(Paragraph {
                    elements: runs
                        .iter()
                        .map(|run| ParagraphElement {
                            text_run: Some(TextRun {
                                content: Some((*run).to_string()),
                            }),
                        })
                        .collect(),
                }),
            })
            .collect();

        Self {
            document_id: None,
            title: Some(title.to_string()),
            body: Some(Body { content }),
        }
    }

    /// Title, or the empty string when the provider omitted it
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Flattened text of one document plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDocument {
    pub text: String,
    pub metadata: BTreeMap<String, String>,
}

impl TextDocument {
    pub fn new(text: impl Into<String>, metadata: BTreeMap<String, String>) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Title from metadata (empty if absent)
    pub fn title(&self) -> &str {
        self.metadata
            .get(META_TITLE)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Replace the metadata mapping wholesale
    pub fn replace_metadata(&mut self, metadata: BTreeMap<String, String>) {
        self.metadata = metadata;
    }
}

/// A bounded substring of a document's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Copy of the parent document's metadata
    pub metadata: BTreeMap<String, String>,

    /// Byte offset where chunk starts in the parent text
    pub start_offset: usize,

    /// Byte offset where chunk ends in the parent text
    pub end_offset: usize,

    /// Sequential chunk number within the document
    pub chunk_index: usize,
}

/// Entry of a Drive folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
}

/// Statistics from an index build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of documents that produced at least one chunk
    pub documents_indexed: usize,

    /// Total chunks created
    pub chunks_created: usize,

    /// Build duration in milliseconds
    pub duration_ms: u64,
}

/// Search result returned by a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// BM25 relevance score (higher = more relevant)
    pub score: f32,

    /// Chunk text content
    pub text: String,

    /// Title of the source document
    pub title: String,

    /// Docs document id or Drive file id
    pub doc_id: String,

    /// Chunk index within the document
    pub chunk_index: usize,
}

/// Response from a search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub count: usize,
    pub duration_ms: u64,
}

/// Outcome of a reader's `process` run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub documents: usize,
    pub chunks: usize,
    /// False when the backend could not accept chunks
    pub indexed: bool,
}
