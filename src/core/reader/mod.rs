//! Document readers.
//!
//! Every reader exposes the same capability set through
//! `DocumentReader`: produce `TextDocument`s, cut them into chunks, and
//! push the chunks into an `IndexBackend`. Callers depend on the trait,
//! never on a concrete reader.
//!
//! - **SingleDocumentReader**: one document by id
//! - **FolderReader**: every Docs document in a Drive folder
//! - **ConfigReader**: a declarative list of ids with title rules

pub mod config;
pub mod folder;
pub mod single;

use crate::core::error::{GdocsError, Result};
use crate::core::index::IndexBackend;
use crate::core::indexer::Chunker;
use crate::core::types::{Chunk, ProcessReport, TextDocument};
use async_trait::async_trait;

pub use config::{ConfigReader, ReaderConfig};
pub use folder::FolderReader;
pub use single::SingleDocumentReader;

/// Receives progress messages from `process`
pub trait ProgressNotifier: Send + Sync {
    fn notify(&self, task_id: &str, message: &str);
}

/// Notifier that forwards messages to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl ProgressNotifier for TracingNotifier {
    fn notify(&self, task_id: &str, message: &str) {
        tracing::info!(task_id, "{}", message);
    }
}

#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Fetch, filter and flatten the reader's documents
    async fn get_documents(&self) -> Result<Vec<TextDocument>>;

    /// Chunker used by `create_chunks`
    fn chunker(&self) -> &Chunker;

    fn create_chunks(&self, documents: &[TextDocument]) -> Result<Vec<Chunk>> {
        Ok(self.chunker().split(documents))
    }

    /// Read, chunk and hand everything to `backend`.
    ///
    /// A backend without add support is logged and skipped; the report
    /// then has `indexed == false`.
    async fn process(
        &self,
        backend: &mut dyn IndexBackend,
        notifier: Option<&dyn ProgressNotifier>,
        task_id: &str,
    ) -> Result<ProcessReport> {
        let documents = self.get_documents().await?;
        if documents.is_empty() {
            tracing::info!(task_id, "No documents to process");
            return Ok(ProcessReport::default());
        }

        let chunks = self.create_chunks(&documents)?;

        let indexed = match backend.add_chunks(&chunks) {
            Ok(added) => {
                tracing::debug!(task_id, backend = backend.name(), added, "Chunks indexed");
                true
            }
            Err(GdocsError::IndexBackendUnsupported(name)) => {
                tracing::warn!(
                    task_id,
                    backend = %name,
                    "Index backend does not support add, {} chunks not indexed",
                    chunks.len()
                );
                false
            }
            Err(e) => return Err(e),
        };

        if let Some(notifier) = notifier {
            notifier.notify(task_id, &format!("Processed {} chunks", chunks.len()));
        }

        Ok(ProcessReport {
            documents: documents.len(),
            chunks: chunks.len(),
            indexed,
        })
    }
}
