//! Remote document service abstraction.
//!
//! `DocumentProvider` is the seam between the readers and the Google
//! APIs. `GoogleApiProvider` talks HTTP; `InMemoryProvider` serves
//! fixtures for tests and offline runs.
//!
//! Providers are built per batch by a `ProviderFactory` from a validated
//! `CredentialHandle`, so one token source is shared by every call in
//! the batch.

pub mod google;
pub mod memory;

use crate::core::credentials::CredentialHandle;
use crate::core::error::{ProviderError, Result};
use crate::core::types::{DriveFile, StructuredDocument};
use async_trait::async_trait;
use std::sync::Arc;

pub use google::{GoogleApiProvider, GoogleProviderFactory};
pub use memory::InMemoryProvider;

/// MIME type of native Google Docs documents in Drive
pub const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";

/// Access to documents and folder listings
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    /// Fetch one structured document.
    ///
    /// `fields` is an optional response projection such as
    /// `title,body/content`; `None` requests the full resource.
    async fn get_document(
        &self,
        document_id: &str,
        fields: Option<&str>,
    ) -> std::result::Result<StructuredDocument, ProviderError>;

    /// List the files of `mime_type` whose parent is `folder_id`.
    /// Single call, no pagination.
    async fn list_files(
        &self,
        folder_id: &str,
        mime_type: &str,
    ) -> std::result::Result<Vec<DriveFile>, ProviderError>;
}

/// Builds a provider bound to one credential
pub trait ProviderFactory: Send + Sync {
    fn create(
        &self,
        credentials: &CredentialHandle,
        scopes: &[&str],
    ) -> Result<Arc<dyn DocumentProvider>>;
}
