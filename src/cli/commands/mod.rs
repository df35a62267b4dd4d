//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for one
//! CLI command.

pub mod completions;
pub mod config;
pub mod folder;
pub mod index;
pub mod read;
pub mod search;
pub mod validate;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use folder::ListFolderArgs;
pub use index::{IndexDocumentsArgs, IndexFolderArgs};
pub use read::ReadArgs;
pub use search::SearchOpts;
pub use validate::ValidateArgs;
