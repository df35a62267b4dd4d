//! Failure-containing wrappers around a `DocumentProvider`.
//!
//! A single bad document or folder never aborts a batch: errors are
//! logged with the offending id and turned into `None` or an empty
//! listing.

use crate::core::error::ProviderError;
use crate::core::provider::{DocumentProvider, DOCUMENT_MIME_TYPE};
use crate::core::types::{DriveFile, StructuredDocument};
use std::sync::Arc;

/// Fetches single documents, skipping the ones that fail
#[derive(Clone)]
pub struct DocumentFetcher {
    provider: Arc<dyn DocumentProvider>,
    fields: Option<String>,
}

impl DocumentFetcher {
    pub fn new(provider: Arc<dyn DocumentProvider>) -> Self {
        Self {
            provider,
            fields: None,
        }
    }

    /// Restrict the response to a field projection (e.g. `title,body/content`)
    pub fn with_fields(mut self, fields: Option<String>) -> Self {
        self.fields = fields;
        self
    }

    pub async fn fetch(&self, document_id: &str) -> Option<StructuredDocument> {
        match self
            .provider
            .get_document(document_id, self.fields.as_deref())
            .await
        {
            Ok(doc) => Some(doc),
            Err(ProviderError::NotFound) => {
                tracing::warn!(document_id, "Document not found, skipping");
                None
            }
            Err(ProviderError::Forbidden) => {
                tracing::warn!(
                    document_id,
                    "Permission denied for document, skipping (is it shared with the service account?)"
                );
                None
            }
            Err(e) => {
                tracing::error!(document_id, error = %e, "Failed to fetch document");
                None
            }
        }
    }
}

/// Lists the Docs documents directly inside a Drive folder
#[derive(Clone)]
pub struct FolderLister {
    provider: Arc<dyn DocumentProvider>,
}

impl FolderLister {
    pub fn new(provider: Arc<dyn DocumentProvider>) -> Self {
        Self { provider }
    }

    pub async fn list_documents(&self, folder_id: &str) -> Vec<DriveFile> {
        match self.provider.list_files(folder_id, DOCUMENT_MIME_TYPE).await {
            Ok(files) => {
                if files.is_empty() {
                    tracing::info!(folder_id, "No documents found in folder");
                } else {
                    tracing::debug!(folder_id, count = files.len(), "Listed folder");
                }
                files
            }
            Err(e) => {
                tracing::error!(folder_id, error = %e, "Failed to list folder");
                Vec::new()
            }
        }
    }
}
