//! Reader for exactly one document.

use crate::core::auth::DOCS_READONLY_SCOPE;
use crate::core::credentials::CredentialHandle;
use crate::core::error::{GdocsError, Result};
use crate::core::extract::extract_text;
use crate::core::fetch::DocumentFetcher;
use crate::core::indexer::Chunker;
use crate::core::provider::ProviderFactory;
use crate::core::reader::DocumentReader;
use crate::core::types::{TextDocument, META_DOC_ID, META_TITLE};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Title used when the document has none
pub const UNKNOWN_TITLE: &str = "Unknown Document";

/// Reads a single document.
///
/// Unlike the batch readers, a missing document or one without text
/// is an error here: there is nothing else to return.
pub struct SingleDocumentReader {
    document_id: String,
    credentials: CredentialHandle,
    factory: Arc<dyn ProviderFactory>,
    fields: Option<String>,
    chunker: Chunker,
}

impl SingleDocumentReader {
    pub fn new(
        document_id: impl Into<String>,
        credentials: CredentialHandle,
        factory: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            credentials,
            factory,
            fields: None,
            chunker: Chunker::default(),
        }
    }

    pub fn with_chunker(mut self, chunker: Chunker) -> Self {
        self.chunker = chunker;
        self
    }

    pub fn with_fields(mut self, fields: Option<String>) -> Self {
        self.fields = fields;
        self
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Fetch and flatten the document
    pub async fn read(&self) -> Result<TextDocument> {
        let provider = self
            .factory
            .create(&self.credentials, &[DOCS_READONLY_SCOPE])?;
        let fetcher = DocumentFetcher::new(provider).with_fields(self.fields.clone());

        let document = fetcher
            .fetch(&self.document_id)
            .await
            .ok_or_else(|| GdocsError::DocumentNotFound(self.document_id.clone()))?;

        let text = extract_text(&document);
        if text.is_empty() {
            return Err(GdocsError::EmptyDocument(self.document_id.clone()));
        }

        let title = document
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        let mut metadata = BTreeMap::new();
        metadata.insert(META_TITLE.to_string(), title);
        metadata.insert(META_DOC_ID.to_string(), self.document_id.clone());

        tracing::info!(
            document_id = %self.document_id,
            length = text.chars().count(),
            "Read document"
        );

        Ok(TextDocument::new(text, metadata))
    }
}

#[async_trait]
impl DocumentReader for SingleDocumentReader {
    async fn get_documents(&self) -> Result<Vec<TextDocument>> {
        Ok(vec![self.read().await?])
    }

    fn chunker(&self) -> &Chunker {
        &self.chunker
    }
}
