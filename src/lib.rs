//! gdocs-index - read Google Docs into a searchable index
//!
//! Fetches documents from the Google Docs API (one by id, every document
//! in a Drive folder, or a declarative list filtered by title rules),
//! flattens them to plain text, splits the text into overlapping
//! character chunks and indexes the chunks for BM25 search via Tantivy.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - credentials, auth, provider (Google API access)
//!   - fetch, extract, rules, ids, reader (document reading)
//!   - indexer, index (chunking and search)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{GdocsError, Result};
pub use core::index::DocumentIndex;
pub use core::reader::{ConfigReader, DocumentReader, FolderReader, SingleDocumentReader};
pub use core::services::Services;
pub use core::types::*;
