//! Document chunking and indexing.
//!
//! - UTF-8 safe character-based chunking with overlap
//! - Pipeline from `TextDocument`s to a committed `DocumentIndex`
//!
//! # Safety
//!
//! The chunker slices on character boundaries via `char_indices()`, so
//! documents containing emoji or other multi-byte sequences never
//! cause a panic.

pub mod chunker;
pub mod pipeline;

pub use chunker::Chunker;
pub use pipeline::IndexingPipeline;
