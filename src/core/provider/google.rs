//! HTTP provider for the Google Docs and Drive REST APIs.

use crate::core::auth::{ServiceAccountTokenSource, StaticTokenSource, TokenSource};
use crate::core::config::GoogleConfig;
use crate::core::credentials::CredentialHandle;
use crate::core::error::{GdocsError, ProviderError, Result};
use crate::core::provider::{DocumentProvider, ProviderFactory};
use crate::core::types::{DriveFile, StructuredDocument};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Projection used for folder listings
pub const FOLDER_LIST_FIELDS: &str = "files(id, name)";

/// Build the Drive `q` expression selecting one folder's documents
pub fn folder_query(folder_id: &str, mime_type: &str) -> String {
    format!("'{folder_id}' in parents and mimeType='{mime_type}'")
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Provider backed by the public Google REST endpoints
pub struct GoogleApiProvider {
    client: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
    docs_base: Url,
    drive_base: Url,
}

impl std::fmt::Debug for GoogleApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleApiProvider")
            .field("docs_base", &self.docs_base.as_str())
            .field("drive_base", &self.drive_base.as_str())
            .finish_non_exhaustive()
    }
}

impl GoogleApiProvider {
    pub fn new(
        client: reqwest::Client,
        tokens: Arc<dyn TokenSource>,
        docs_api_base: &str,
        drive_api_base: &str,
    ) -> Result<Self> {
        let parse = |name: &str, raw: &str| {
            Url::parse(raw).map_err(|e| GdocsError::ConfigError(format!("Invalid {name}: {e}")))
        };

        Ok(Self {
            client,
            tokens,
            docs_base: parse("docs_api_base", docs_api_base)?,
            drive_base: parse("drive_api_base", drive_api_base)?,
        })
    }

    /// Append path segments to a base URL
    fn endpoint(
        base: &Url,
        segments: &[&str],
    ) -> std::result::Result<Url, ProviderError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Transport(format!("{base} cannot be a base URL")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> std::result::Result<T, ProviderError> {
        let token = self.tokens.access_token().await?;

        let resp = self.client.get(url).bearer_auth(token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl DocumentProvider for GoogleApiProvider {
    async fn get_document(
        &self,
        document_id: &str,
        fields: Option<&str>,
    ) -> std::result::Result<StructuredDocument, ProviderError> {
        let mut url = Self::endpoint(&self.docs_base, &["v1", "documents", document_id])?;
        if let Some(fields) = fields {
            url.query_pairs_mut().append_pair("fields", fields);
        }

        tracing::debug!(document_id, url = %url, "documents.get");
        self.get_json(url).await
    }

    async fn list_files(
        &self,
        folder_id: &str,
        mime_type: &str,
    ) -> std::result::Result<Vec<DriveFile>, ProviderError> {
        let mut url = Self::endpoint(&self.drive_base, &["drive", "v3", "files"])?;
        url.query_pairs_mut()
            .append_pair("q", &folder_query(folder_id, mime_type))
            .append_pair("fields", FOLDER_LIST_FIELDS);

        tracing::debug!(folder_id, url = %url, "files.list");
        let list: FileList = self.get_json(url).await?;
        Ok(list.files)
    }
}

/// Builds `GoogleApiProvider`s from config plus a credential
#[derive(Debug, Clone)]
pub struct GoogleProviderFactory {
    settings: GoogleConfig,
    static_token: Option<String>,
}

impl GoogleProviderFactory {
    pub fn new(settings: GoogleConfig) -> Self {
        Self {
            settings,
            static_token: None,
        }
    }

    /// Use a pre-minted bearer token instead of the JWT exchange
    pub fn with_static_token(mut self, token: impl Into<String>) -> Self {
        self.static_token = Some(token.into());
        self
    }

    fn client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.settings.request_timeout_sec))
            .build()
            .map_err(|e| GdocsError::ConfigError(format!("Failed to build HTTP client: {e}")))
    }
}

impl ProviderFactory for GoogleProviderFactory {
    fn create(
        &self,
        credentials: &CredentialHandle,
        scopes: &[&str],
    ) -> Result<Arc<dyn DocumentProvider>> {
        let client = self.client()?;

        let tokens: Arc<dyn TokenSource> = match &self.static_token {
            Some(token) => Arc::new(StaticTokenSource::new(token.clone())),
            None => Arc::new(ServiceAccountTokenSource::new(
                credentials.key(),
                scopes,
                self.settings.token_uri_override.as_deref(),
                client.clone(),
            )?),
        };

        tracing::debug!(
            client_email = credentials.client_email(),
            "built Google API provider"
        );

        Ok(Arc::new(GoogleApiProvider::new(
            client,
            tokens,
            &self.settings.docs_api_base,
            &self.settings.drive_api_base,
        )?))
    }
}
