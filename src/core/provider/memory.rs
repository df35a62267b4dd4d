//! Fixture-backed provider.
//!
//! Serves documents and folder listings from memory. Clones share
//! state, so a test can hand one clone to a reader (as its factory)
//! and inspect the recorded calls through another.

use crate::core::credentials::{CredentialHandle, CredentialSource};
use crate::core::error::{GdocsError, ProviderError, Result};
use crate::core::provider::{DocumentProvider, ProviderFactory};
use crate::core::types::{DriveFile, StructuredDocument};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// On-disk fixture format for offline runs
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    documents: HashMap<String, StructuredDocument>,
    #[serde(default)]
    folders: HashMap<String, Vec<DriveFile>>,
}

#[derive(Debug, Default)]
struct State {
    documents: HashMap<String, StructuredDocument>,
    failures: HashMap<String, ProviderError>,
    folders: HashMap<String, Vec<DriveFile>>,
    folder_failures: HashMap<String, ProviderError>,
    fetched: Vec<String>,
    fields_seen: Vec<Option<String>>,
    listed: Vec<String>,
    credential_files: Vec<PathBuf>,
    providers_created: usize,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    state: Arc<Mutex<State>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON fixture: `{"documents": {id: doc}, "folders": {id: [file]}}`
    pub fn from_fixture_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GdocsError::ConfigError(format!("Failed to read fixture {}: {e}", path.display()))
        })?;
        let fixture: Fixture = serde_json::from_str(&contents)?;

        let provider = Self::new();
        {
            let mut state = provider.lock();
            state.documents = fixture.documents;
            state.folders = fixture.folders;
        }
        Ok(provider)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_document(self, id: &str, document: StructuredDocument) -> Self {
        self.lock().documents.insert(id.to_string(), document);
        self
    }

    /// Make fetching `id` fail with `error`
    pub fn with_failure(self, id: &str, error: ProviderError) -> Self {
        self.lock().failures.insert(id.to_string(), error);
        self
    }

    pub fn with_folder(self, folder_id: &str, files: Vec<DriveFile>) -> Self {
        self.lock().folders.insert(folder_id.to_string(), files);
        self
    }

    /// Make listing `folder_id` fail with `error`
    pub fn with_folder_failure(self, folder_id: &str, error: ProviderError) -> Self {
        self.lock()
            .folder_failures
            .insert(folder_id.to_string(), error);
        self
    }

    /// Document ids requested so far, in call order
    pub fn fetched(&self) -> Vec<String> {
        self.lock().fetched.clone()
    }

    /// Field projections passed to `get_document`, in call order
    pub fn fields_seen(&self) -> Vec<Option<String>> {
        self.lock().fields_seen.clone()
    }

    /// Folder ids listed so far
    pub fn listed(&self) -> Vec<String> {
        self.lock().listed.clone()
    }

    /// Credential files the factory was handed
    pub fn credential_files(&self) -> Vec<PathBuf> {
        self.lock().credential_files.clone()
    }

    /// Number of providers built through the factory
    pub fn providers_created(&self) -> usize {
        self.lock().providers_created
    }
}

#[async_trait]
impl DocumentProvider for InMemoryProvider {
    async fn get_document(
        &self,
        document_id: &str,
        fields: Option<&str>,
    ) -> std::result::Result<StructuredDocument, ProviderError> {
        let mut state = self.lock();
        state.fetched.push(document_id.to_string());
        state.fields_seen.push(fields.map(str::to_string));

        if let Some(err) = state.failures.get(document_id) {
            return Err(err.clone());
        }
        state
            .documents
            .get(document_id)
            .cloned()
            .ok_or(ProviderError::NotFound)
    }

    async fn list_files(
        &self,
        folder_id: &str,
        _mime_type: &str,
    ) -> std::result::Result<Vec<DriveFile>, ProviderError> {
        let mut state = self.lock();
        state.listed.push(folder_id.to_string());

        if let Some(err) = state.folder_failures.get(folder_id) {
            return Err(err.clone());
        }
        Ok(state.folders.get(folder_id).cloned().unwrap_or_default())
    }
}

impl ProviderFactory for InMemoryProvider {
    fn create(
        &self,
        credentials: &CredentialHandle,
        _scopes: &[&str],
    ) -> Result<Arc<dyn DocumentProvider>> {
        let mut state = self.lock();
        state.providers_created += 1;
        if let CredentialSource::File(path) = credentials.source() {
            state.credential_files.push(path.clone());
        }
        drop(state);

        Ok(Arc::new(self.clone()))
    }
}
