//! Process-local searchable index over chunks.
//!
//! - **backend**: the `IndexBackend` seam readers hand chunks to
//! - **tantivy**: in-RAM BM25 index (`DocumentIndex`)
//! - **query**: query preprocessing and field validation
//! - **search**: `DocumentIndex::search`

pub mod backend;
pub mod query;
pub mod search;
pub mod tantivy;

pub use backend::IndexBackend;
pub use query::{preprocess_query, validate_query_fields};
pub use self::tantivy::DocumentIndex;
