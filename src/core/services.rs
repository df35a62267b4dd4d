//! Unified service container for gdocs-index
//!
//! Wires configuration to provider construction, readers and the
//! indexing pipeline.

use crate::core::auth::DRIVE_READONLY_SCOPE;
use crate::core::config::Config;
use crate::core::credentials::{CredentialHandle, CredentialResolver};
use crate::core::error::Result;
use crate::core::fetch::FolderLister;
use crate::core::ids::{parse_document_id, parse_folder_id};
use crate::core::index::DocumentIndex;
use crate::core::indexer::{Chunker, IndexingPipeline};
use crate::core::provider::{GoogleProviderFactory, ProviderFactory};
use crate::core::reader::{ConfigReader, FolderReader, ReaderConfig, SingleDocumentReader};
use crate::core::rules::TitleRules;
use crate::core::types::{DriveFile, IndexStats, TextDocument};
use std::env;
use std::path::Path;
use std::sync::Arc;

/// Bearer token used instead of the service-account exchange when set
pub const ACCESS_TOKEN_ENV_VAR: &str = "GDOCS_ACCESS_TOKEN";

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Builds a document provider per batch
    pub factory: Arc<dyn ProviderFactory>,
}

impl Services {
    /// Create services talking to the Google APIs named in `config`
    pub fn new(config: Config) -> Self {
        let mut factory = GoogleProviderFactory::new(config.google.clone());
        if let Some(token) = env::var(ACCESS_TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
        {
            tracing::info!("Using bearer token from {}", ACCESS_TOKEN_ENV_VAR);
            factory = factory.with_static_token(token.trim());
        }

        Self::with_factory(config, Arc::new(factory))
    }

    /// Create services over an arbitrary provider factory
    pub fn with_factory(config: Config, factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            config: Arc::new(config),
            factory,
        }
    }

    pub fn chunker(&self) -> Result<Chunker> {
        Chunker::new(
            self.config.indexing.chunk_size,
            self.config.indexing.chunk_overlap,
        )
    }

    /// Resolve a credential file: explicit path, then the configured
    /// default filename, then the credentials environment variable.
    pub fn resolve_credentials(&self, explicit: Option<&Path>) -> Result<CredentialHandle> {
        let fallback = Path::new(&self.config.google.default_credentials_filename);
        CredentialResolver::new().resolve(explicit, Some(fallback))
    }

    /// Reader for one document; `document` may be an id or a Docs URL
    pub fn single_reader(
        &self,
        document: &str,
        credentials: CredentialHandle,
    ) -> Result<SingleDocumentReader> {
        Ok(SingleDocumentReader::new(
            parse_document_id(document)?,
            credentials,
            Arc::clone(&self.factory),
        )
        .with_chunker(self.chunker()?)
        .with_fields(self.config.google.document_fields.clone()))
    }

    /// Reader for a Drive folder; `folder` may be an id or a Drive URL
    pub fn folder_reader(
        &self,
        data_source_id: &str,
        folder: &str,
        credentials: CredentialHandle,
        rules: TitleRules,
    ) -> Result<FolderReader> {
        Ok(FolderReader::new(
            data_source_id,
            parse_folder_id(folder)?,
            credentials,
            Arc::clone(&self.factory),
        )
        .with_rules(rules)
        .with_chunker(self.chunker()?)
        .with_fields(self.config.google.document_fields.clone()))
    }

    /// Docs documents in a Drive folder, in listing order.
    ///
    /// A failed listing yields an empty list.
    pub async fn list_folder(
        &self,
        folder: &str,
        credentials: &CredentialHandle,
    ) -> Result<Vec<DriveFile>> {
        let folder_id = parse_folder_id(folder)?;
        let provider = self.factory.create(credentials, &[DRIVE_READONLY_SCOPE])?;
        Ok(FolderLister::new(provider).list_documents(&folder_id).await)
    }

    /// Reader over a validated reader config
    pub fn config_reader(&self, data_source_id: &str, config: ReaderConfig) -> Result<ConfigReader> {
        Ok(
            ConfigReader::from_config(data_source_id, config, Arc::clone(&self.factory))
                .with_chunker(self.chunker()?)
                .with_fields(self.config.google.document_fields.clone()),
        )
    }

    pub fn create_pipeline(&self) -> Result<IndexingPipeline> {
        Ok(IndexingPipeline::from_chunker(self.chunker()?))
    }

    /// Chunk and index `documents` with the configured search limits
    pub fn build_index(&self, documents: &[TextDocument]) -> Result<(DocumentIndex, IndexStats)> {
        let (index, stats) = self.create_pipeline()?.index_documents(documents)?;
        Ok((
            index.with_limits(self.config.search.default_k, self.config.search.max_k),
            stats,
        ))
    }
}
