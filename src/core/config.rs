//! Configuration management for gdocs-index.
//!
//! Settings come from a TOML file and `GDOCS_*` environment variables,
//! with defaults for everything.

use crate::core::error::{GdocsError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "gdocs-index.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Characters per chunk (not bytes)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

/// Remote API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// Base URL of the Docs API
    #[serde(default = "default_docs_api_base")]
    pub docs_api_base: String,

    /// Base URL of the Drive API
    #[serde(default = "default_drive_api_base")]
    pub drive_api_base: String,

    /// Replaces the `token_uri` of every credential bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri_override: Option<String>,

    /// Response projection for `documents.get` (unrestricted if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_fields: Option<String>,

    /// Credential file tried after the explicit path and the environment
    #[serde(default = "default_credentials_filename")]
    pub default_credentials_filename: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Maximum results per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,
}

fn default_chunk_size() -> usize {
    1024
}

fn default_chunk_overlap() -> usize {
    20
}

fn default_docs_api_base() -> String {
    "https://docs.googleapis.com".to_string()
}

fn default_drive_api_base() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_credentials_filename() -> String {
    "credentials.json".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_k() -> usize {
    5
}

fn default_max_k() -> usize {
    50
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            docs_api_base: default_docs_api_base(),
            drive_api_base: default_drive_api_base(),
            token_uri_override: None,
            document_fields: None,
            default_credentials_filename: default_credentials_filename(),
            request_timeout_sec: default_request_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            GdocsError::ConfigError(format!("Failed to read config file {path:?}: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        Self::load_with_xdg(&XdgDirs::new())
    }

    /// Load config with explicit XDG directories
    ///
    /// File lookup order:
    /// 1. `GDOCS_CONFIG` env var
    /// 2. XDG config file (~/.config/gdocs-index/config.toml)
    /// 3. ./gdocs-index.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("GDOCS_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new(LOCAL_CONFIG_FILE).exists() {
                Self::from_file(LOCAL_CONFIG_FILE)?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Apply `GDOCS_*` environment overrides
    pub fn merge_env(&mut self) {
        fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|v| v.parse().ok())
        }

        if let Some(size) = parsed("GDOCS_CHUNK_SIZE") {
            self.indexing.chunk_size = size;
        }
        if let Some(overlap) = parsed("GDOCS_CHUNK_OVERLAP") {
            self.indexing.chunk_overlap = overlap;
        }

        if let Ok(base) = env::var("GDOCS_DOCS_API_BASE") {
            self.google.docs_api_base = base;
        }
        if let Ok(base) = env::var("GDOCS_DRIVE_API_BASE") {
            self.google.drive_api_base = base;
        }
        if let Ok(uri) = env::var("GDOCS_TOKEN_URI") {
            self.google.token_uri_override = Some(uri);
        }
        if let Ok(fields) = env::var("GDOCS_DOCUMENT_FIELDS") {
            self.google.document_fields = Some(fields);
        }
        if let Ok(name) = env::var("GDOCS_CREDENTIALS_FILE") {
            self.google.default_credentials_filename = name;
        }
        if let Some(timeout) = parsed("GDOCS_REQUEST_TIMEOUT_SEC") {
            self.google.request_timeout_sec = timeout;
        }

        if let Some(k) = parsed("GDOCS_DEFAULT_K") {
            self.search.default_k = k;
        }
        if let Some(k) = parsed("GDOCS_MAX_K") {
            self.search.max_k = k;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.chunk_size == 0 {
            return Err(GdocsError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.indexing.chunk_overlap >= self.indexing.chunk_size {
            return Err(GdocsError::ConfigError(
                "Chunk overlap must be less than chunk size".to_string(),
            ));
        }

        for (name, base) in [
            ("docs_api_base", &self.google.docs_api_base),
            ("drive_api_base", &self.google.drive_api_base),
        ] {
            url::Url::parse(base)
                .map_err(|e| GdocsError::ConfigError(format!("Invalid {name} {base:?}: {e}")))?;
        }

        if self.google.request_timeout_sec == 0 {
            return Err(GdocsError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        if self.search.default_k == 0 {
            return Err(GdocsError::ConfigError(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.search.default_k > self.search.max_k {
            return Err(GdocsError::ConfigError(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration values
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Chunk size: {} chars", self.indexing.chunk_size);
        tracing::info!("  Chunk overlap: {} chars", self.indexing.chunk_overlap);
        tracing::info!("  Docs API: {}", self.google.docs_api_base);
        tracing::info!("  Drive API: {}", self.google.drive_api_base);
        if let Some(uri) = &self.google.token_uri_override {
            tracing::info!("  Token URI override: {}", uri);
        }
        tracing::info!(
            "  Default credentials file: {}",
            self.google.default_credentials_filename
        );
        tracing::info!("  Request timeout: {}s", self.google.request_timeout_sec);
        tracing::info!("  Default k: {}", self.search.default_k);
        tracing::info!("  Max k: {}", self.search.max_k);
    }
}
