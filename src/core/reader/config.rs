//! Configuration-driven multi-document reader.
//!
//! A reader config is a JSON object:
//!
//! ```json
//! {
//!   "service_account_dict": { "type": "service_account", ... },
//!   "document_ids": ["1AbC...", "https://docs.google.com/document/d/2XyZ.../edit"],
//!   "inclusion_rules": ["report"],
//!   "exclusion_rules": ["draft"]
//! }
//! ```
//!
//! All four keys are required. The config is validated when the reader
//! is built, so an invalid config never yields a reader.

use crate::core::auth::DOCS_READONLY_SCOPE;
use crate::core::credentials::{validate_bundle, CredentialHandle, CredentialResolver};
use crate::core::error::{GdocsError, Result};
use crate::core::extract::extract_text;
use crate::core::fetch::DocumentFetcher;
use crate::core::ids::parse_document_id;
use crate::core::indexer::Chunker;
use crate::core::provider::ProviderFactory;
use crate::core::reader::DocumentReader;
use crate::core::rules::TitleRules;
use crate::core::types::{
    TextDocument, META_DATA_SOURCE, META_DOC_ID, META_SOURCE_TYPE, META_TITLE, SOURCE_GOOGLE_DOCS,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Top-level keys every reader config must carry
pub const REQUIRED_CONFIG_KEYS: [&str; 4] = [
    "service_account_dict",
    "document_ids",
    "inclusion_rules",
    "exclusion_rules",
];

/// Validated reader configuration
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub service_account_dict: Value,
    pub document_ids: Vec<String>,
    pub inclusion_rules: Vec<String>,
    pub exclusion_rules: Vec<String>,
}

impl ReaderConfig {
    /// Validate a JSON config value.
    ///
    /// Every problem is reported as `InvalidDataSourceConfig`; a bad
    /// credential bundle lists all of its missing keys.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            return Err(GdocsError::InvalidDataSourceConfig(
                "config must be a JSON object".to_string(),
            ));
        };

        let missing: Vec<&str> = REQUIRED_CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect();
        if !missing.is_empty() {
            return Err(GdocsError::InvalidDataSourceConfig(format!(
                "missing required keys: {}",
                missing.join(", ")
            )));
        }

        let service_account_dict = map["service_account_dict"].clone();
        validate_bundle(&service_account_dict).map_err(|e| {
            GdocsError::InvalidDataSourceConfig(format!("service_account_dict: {e}"))
        })?;

        // Docs URLs are reduced to their id; anything else is kept as
        // written and left to the fetch stage to skip
        let document_ids: Vec<String> = string_list(&map["document_ids"], "document_ids")?
            .into_iter()
            .map(|raw| parse_document_id(&raw).unwrap_or(raw))
            .collect();
        if document_ids.is_empty() {
            return Err(GdocsError::InvalidDataSourceConfig(
                "document_ids must not be empty".to_string(),
            ));
        }

        Ok(Self {
            service_account_dict,
            document_ids,
            inclusion_rules: string_list(&map["inclusion_rules"], "inclusion_rules")?,
            exclusion_rules: string_list(&map["exclusion_rules"], "exclusion_rules")?,
        })
    }

    /// Read and validate a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GdocsError::InvalidDataSourceConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        let value: Value = serde_json::from_str(&contents).map_err(|e| {
            GdocsError::InvalidDataSourceConfig(format!("{} is not valid JSON: {e}", path.display()))
        })?;
        Self::from_value(&value)
    }

    pub fn rules(&self) -> TitleRules {
        TitleRules::new(&self.inclusion_rules, &self.exclusion_rules)
    }
}

fn string_list(value: &Value, key: &str) -> Result<Vec<String>> {
    let items = value.as_array().ok_or_else(|| {
        GdocsError::InvalidDataSourceConfig(format!("{key} must be a list of strings"))
    })?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                GdocsError::InvalidDataSourceConfig(format!(
                    "{key} must be a list of strings, found {item}"
                ))
            })
        })
        .collect()
}

/// Reads the documents named in a `ReaderConfig`
pub struct ConfigReader {
    data_source_id: String,
    config: ReaderConfig,
    rules: TitleRules,
    factory: Arc<dyn ProviderFactory>,
    fields: Option<String>,
    chunker: Chunker,
}

impl ConfigReader {
    pub fn new(
        data_source_id: impl Into<String>,
        config: &Value,
        factory: Arc<dyn ProviderFactory>,
    ) -> Result<Self> {
        Ok(Self::from_config(
            data_source_id,
            ReaderConfig::from_value(config)?,
            factory,
        ))
    }

    pub fn from_config(
        data_source_id: impl Into<String>,
        config: ReaderConfig,
        factory: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            data_source_id: data_source_id.into(),
            rules: config.rules(),
            config,
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

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    async fn read_all(&self, credentials: &CredentialHandle) -> Result<Vec<TextDocument>> {
        let provider = self.factory.create(credentials, &[DOCS_READONLY_SCOPE])?;
        let fetcher = DocumentFetcher::new(provider).with_fields(self.fields.clone());

        let mut documents = Vec::with_capacity(self.config.document_ids.len());
        for document_id in &self.config.document_ids {
            let Some(structured) = fetcher.fetch(document_id).await else {
                continue;
            };

            let title = structured.title_or_empty();
            if !self.rules.matches(title) {
                tracing::debug!(document_id = %document_id, title, "Filtered out by title rules");
                continue;
            }

            let text = extract_text(&structured);
            if text.is_empty() {
                tracing::warn!(document_id = %document_id, "Document has no text, skipping");
                continue;
            }

            let mut metadata = BTreeMap::new();
            metadata.insert(META_TITLE.to_string(), title.to_string());
            metadata.insert(META_DOC_ID.to_string(), document_id.clone());
            metadata.insert(META_DATA_SOURCE.to_string(), self.data_source_id.clone());
            metadata.insert(META_SOURCE_TYPE.to_string(), SOURCE_GOOGLE_DOCS.to_string());

            documents.push(TextDocument::new(text, metadata));
        }

        tracing::info!(
            data_source = %self.data_source_id,
            requested = self.config.document_ids.len(),
            read = documents.len(),
            "Read configured documents"
        );

        Ok(documents)
    }
}

#[async_trait]
impl DocumentReader for ConfigReader {
    /// The bundle is written to a private temp file for the duration of
    /// the batch; the file is removed however the batch ends.
    async fn get_documents(&self) -> Result<Vec<TextDocument>> {
        let mut resolver = CredentialResolver::without_env();
        let credential_file = resolver.persist(&self.config.service_account_dict)?;

        let result = match resolver.resolve(None, None) {
            Ok(credentials) => self.read_all(&credentials).await,
            Err(e) => Err(e),
        };

        credential_file.close();
        resolver.cleanup();
        result
    }

    fn chunker(&self) -> &Chunker {
        &self.chunker
    }
}
