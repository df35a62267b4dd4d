//! Reader for every Docs document in a Drive folder.

use crate::core::auth::{DOCS_READONLY_SCOPE, DRIVE_READONLY_SCOPE};
use crate::core::credentials::CredentialHandle;
use crate::core::error::Result;
use crate::core::extract::extract_text;
use crate::core::fetch::{DocumentFetcher, FolderLister};
use crate::core::indexer::Chunker;
use crate::core::provider::ProviderFactory;
use crate::core::reader::DocumentReader;
use crate::core::rules::TitleRules;
use crate::core::types::{
    DriveFile, TextDocument, META_DATA_SOURCE, META_FILE_ID, META_FILE_NAME, META_SOURCE_TYPE,
    META_TITLE, SOURCE_GOOGLE_DRIVE,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct FolderReader {
    data_source_id: String,
    folder_id: String,
    credentials: CredentialHandle,
    factory: Arc<dyn ProviderFactory>,
    rules: TitleRules,
    fields: Option<String>,
    chunker: Chunker,
}

impl FolderReader {
    pub fn new(
        data_source_id: impl Into<String>,
        folder_id: impl Into<String>,
        credentials: CredentialHandle,
        factory: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            data_source_id: data_source_id.into(),
            folder_id: folder_id.into(),
            credentials,
            factory,
            rules: TitleRules::default(),
            fields: None,
            chunker: Chunker::default(),
        }
    }

    pub fn with_rules(mut self, rules: TitleRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_chunker(mut self, chunker: Chunker) -> Self {
        self.chunker = chunker;
        self
    }

    pub fn with_fields(mut self, fields: Option<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the metadata of a folder document wholesale. The title is
    /// the Drive listing name, the same string the title rules matched.
    pub fn customize_metadata(&self, document: &mut TextDocument, file: &DriveFile) {
        let mut metadata = BTreeMap::new();
        metadata.insert(META_TITLE.to_string(), file.name.clone());
        metadata.insert(META_FILE_NAME.to_string(), file.name.clone());
        metadata.insert(META_FILE_ID.to_string(), file.id.clone());
        metadata.insert(META_DATA_SOURCE.to_string(), self.data_source_id.clone());
        metadata.insert(META_SOURCE_TYPE.to_string(), SOURCE_GOOGLE_DRIVE.to_string());
        document.replace_metadata(metadata);
    }
}

#[async_trait]
impl DocumentReader for FolderReader {
    async fn get_documents(&self) -> Result<Vec<TextDocument>> {
        let provider = self
            .factory
            .create(&self.credentials, &[DOCS_READONLY_SCOPE, DRIVE_READONLY_SCOPE])?;
        let lister = FolderLister::new(Arc::clone(&provider));
        let fetcher = DocumentFetcher::new(provider).with_fields(self.fields.clone());

        let listed = lister.list_documents(&self.folder_id).await;
        let total = listed.len();
        let files = self.rules.apply(listed);

        tracing::info!(
            folder_id = %self.folder_id,
            listed = total,
            kept = files.len(),
            "Reading folder"
        );

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            let Some(structured) = fetcher.fetch(&file.id).await else {
                continue;
            };

            let text = extract_text(&structured);
            if text.is_empty() {
                tracing::warn!(file_id = %file.id, "Document has no text, skipping");
                continue;
            }

            let mut metadata = BTreeMap::new();
            metadata.insert(
                META_TITLE.to_string(),
                structured.title_or_empty().to_string(),
            );
            let mut document = TextDocument::new(text, metadata);
            self.customize_metadata(&mut document, file);

            tracing::debug!(file_id = %file.id, "Read folder document");
            documents.push(document);
        }

        Ok(documents)
    }

    fn chunker(&self) -> &Chunker {
        &self.chunker
    }
}
