//! Core domain logic (transport-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **credentials**: Service-account bundle validation and resolution
//! - **auth**: OAuth access tokens for the Google APIs
//! - **provider**: Document and folder backends (Google APIs, in-memory)
//! - **fetch**: Error-tolerant document fetching and folder listing
//! - **extract**: Structured document to plain text
//! - **rules**: Title inclusion/exclusion filtering
//! - **ids**: Document and folder id parsing
//! - **reader**: Single, folder and config-driven document readers
//! - **indexer**: Chunking and indexing pipeline
//! - **index**: In-memory BM25 index and search
//! - **services**: Unified service container

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod ids;
pub mod index;
pub mod indexer;
pub mod provider;
pub mod reader;
pub mod rules;
pub mod services;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{GdocsError, Result};
pub use services::Services;
