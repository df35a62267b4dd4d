//! Error types and error handling for gdocs-index.
//!
//! `GdocsError` covers configuration, credential, chunking and index
//! failures that propagate to the caller. Per-document remote failures
//! use `ProviderError` and are contained at the fetch boundary (see
//! `core::fetch`), so a single bad document never aborts a batch.

use thiserror::Error;

/// Result type alias for gdocs-index operations
pub type Result<T> = std::result::Result<T, GdocsError>;

/// Main error type for gdocs-index
#[derive(Error, Debug)]
pub enum GdocsError {
    #[error("Invalid data source config: {0}")]
    InvalidDataSourceConfig(String),

    #[error("Credentials not found: {0}")]
    CredentialsNotFound(String),

    #[error("Invalid credentials: {reason}")]
    InvalidCredentials {
        reason: String,
        missing: Vec<String>,
    },

    #[error("Document not found or inaccessible: {0}")]
    DocumentNotFound(String),

    #[error("Document has no extractable text: {0}")]
    EmptyDocument(String),

    #[error("Invalid chunk config: chunk_overlap ({overlap}) must be less than chunk_size ({size}) and chunk_size must be non-zero")]
    InvalidChunkConfig { size: usize, overlap: usize },

    #[error("Index backend does not support adding chunks: {0}")]
    IndexBackendUnsupported(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl GdocsError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Names of the credential fields reported missing, if any
    pub fn missing_fields(&self) -> &[String] {
        match self {
            GdocsError::InvalidCredentials { missing, .. } => missing,
            _ => &[],
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GdocsError::DocumentNotFound(_) | GdocsError::CredentialsNotFound(_)
        )
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            GdocsError::InvalidDataSourceConfig(_)
                | GdocsError::InvalidCredentials { .. }
                | GdocsError::InvalidChunkConfig { .. }
                | GdocsError::InvalidId(_)
                | GdocsError::InvalidQuery(_)
                | GdocsError::ConfigError(_)
        )
    }
}

/// Failure classification for a single remote call.
///
/// Mirrors the HTTP status classes the Google APIs return. Callers in
/// `core::fetch` log these and turn them into `None`/empty results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("not found (404)")]
    NotFound,

    #[error("permission denied (403)")]
    Forbidden,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("token acquisition failed: {0}")]
    Auth(String),
}

impl ProviderError {
    /// Build the matching variant from an HTTP status and body.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ProviderError::NotFound,
            403 => ProviderError::Forbidden,
            _ => ProviderError::Status { status, body },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}
