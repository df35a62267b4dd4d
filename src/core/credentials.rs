//! Service-account credential resolution and validation.
//!
//! A `CredentialResolver` is a caller-owned value: the "current"
//! credential path it remembers belongs to that resolver only, so two
//! sessions never see each other's credentials. Bundles supplied in
//! memory can be persisted to a private temporary file for the length
//! of a batch; the returned `TempCredentialFile` removes the file when
//! dropped, on every exit path.

use crate::core::error::{GdocsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable consulted after the resolver's current path
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Required `type` value of a bundle
pub const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Keys every credential bundle must carry
pub const REQUIRED_SERVICE_ACCOUNT_KEYS: [&str; 11] = [
    "type",
    "project_id",
    "private_key_id",
    "private_key",
    "client_email",
    "client_id",
    "auth_uri",
    "token_uri",
    "auth_provider_x509_cert_url",
    "client_x509_cert_url",
    "universe_domain",
];

/// Validated service-account bundle
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub auth_provider_x509_cert_url: String,
    pub client_x509_cert_url: String,
    pub universe_domain: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// Validate a JSON bundle and convert it into a `ServiceAccountKey`.
///
/// Every missing (or null) required key is reported in one error so the
/// caller can fix the bundle in a single round-trip.
pub fn validate_bundle(value: &Value) -> Result<ServiceAccountKey> {
    let Some(map) = value.as_object() else {
        return Err(GdocsError::InvalidCredentials {
            reason: "credential bundle must be a JSON object".to_string(),
            missing: REQUIRED_SERVICE_ACCOUNT_KEYS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        });
    };

    let missing: Vec<String> = REQUIRED_SERVICE_ACCOUNT_KEYS
        .iter()
        .filter(|k| map.get(**k).map_or(true, Value::is_null))
        .map(|k| (*k).to_string())
        .collect();

    if !missing.is_empty() {
        return Err(GdocsError::InvalidCredentials {
            reason: format!("missing required keys: {}", missing.join(", ")),
            missing,
        });
    }

    let key_type = map.get("type").and_then(Value::as_str).unwrap_or_default();
    if key_type != SERVICE_ACCOUNT_TYPE {
        return Err(GdocsError::InvalidCredentials {
            reason: format!("'type' must be '{SERVICE_ACCOUNT_TYPE}', got '{key_type}'"),
            missing: Vec::new(),
        });
    }

    serde_json::from_value(value.clone()).map_err(|e| GdocsError::InvalidCredentials {
        reason: format!("malformed credential bundle: {e}"),
        missing: Vec::new(),
    })
}

/// Where a resolved credential came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    File(PathBuf),
    Inline,
}

/// A validated credential ready to be handed to a provider
#[derive(Debug, Clone)]
pub struct CredentialHandle {
    key: ServiceAccountKey,
    source: CredentialSource,
}

impl CredentialHandle {
    /// Read and validate a bundle from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            GdocsError::CredentialsNotFound(format!("failed to read {}: {e}", path.display()))
        })?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|e| GdocsError::InvalidCredentials {
                reason: format!("{} is not valid JSON: {e}", path.display()),
                missing: Vec::new(),
            })?;

        Ok(Self {
            key: validate_bundle(&value)?,
            source: CredentialSource::File(path.to_path_buf()),
        })
    }

    pub fn key(&self) -> &ServiceAccountKey {
        &self.key
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    /// Service account e-mail, handy for "share the doc with ..." hints
    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }
}

/// Credential bundle persisted for the duration of one batch.
///
/// The file is deleted when this guard is dropped. Deletion failures are
/// logged, never raised.
pub struct TempCredentialFile {
    path: Option<tempfile::TempPath>,
}

impl TempCredentialFile {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Remove the file now instead of waiting for drop
    pub fn close(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        let Some(temp_path) = self.path.take() else {
            return;
        };
        let removed = temp_path.to_path_buf();
        match temp_path.close() {
            Ok(()) => tracing::debug!("Removed temporary credentials {:?}", removed),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Temporary credentials {:?} already removed", removed)
            }
            Err(e) => tracing::warn!(
                "Failed to remove temporary credentials {:?}: {}",
                removed,
                e
            ),
        }
    }
}

impl Drop for TempCredentialFile {
    fn drop(&mut self) {
        self.remove();
    }
}

impl fmt::Debug for TempCredentialFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempCredentialFile")
            .field("path", &self.path())
            .finish()
    }
}

/// Resolves credential bundles for one session
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    /// Path set by the last successful persist/resolve
    current: Option<PathBuf>,

    /// File written by `persist`; the only path `cleanup` may delete
    created: Option<PathBuf>,

    /// Environment variable consulted as a fallback (None disables it)
    env_var: Option<String>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialResolver {
    pub fn new() -> Self {
        Self {
            current: None,
            created: None,
            env_var: Some(CREDENTIALS_ENV_VAR.to_string()),
        }
    }

    /// Resolver that ignores `GOOGLE_APPLICATION_CREDENTIALS`
    pub fn without_env() -> Self {
        Self {
            current: None,
            created: None,
            env_var: None,
        }
    }

    /// The path remembered by this resolver, if any
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Resolve a credential file.
    ///
    /// Order: explicit path, this resolver's current path, the fallback
    /// filename, then the credentials environment variable.
    /// Only candidates that exist on disk are considered.
    pub fn resolve(
        &mut self,
        explicit_path: Option<&Path>,
        fallback_filename: Option<&Path>,
    ) -> Result<CredentialHandle> {
        let from_env = self
            .env_var
            .as_deref()
            .and_then(|name| env::var_os(name))
            .map(PathBuf::from);

        let candidates: Vec<PathBuf> = [
            explicit_path.map(Path::to_path_buf),
            self.current.clone(),
            fallback_filename.map(Path::to_path_buf),
            from_env,
        ]
        .into_iter()
        .flatten()
        .collect();

        let Some(found) = candidates.iter().find(|p| p.is_file()) else {
            let tried = if candidates.is_empty() {
                "no candidate paths".to_string()
            } else {
                candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            return Err(GdocsError::CredentialsNotFound(format!("tried {tried}")));
        };

        tracing::debug!("Using credentials file {:?}", found);
        let handle = CredentialHandle::from_file(found)?;
        self.current = Some(found.clone());
        Ok(handle)
    }

    /// Validate an in-memory bundle
    pub fn resolve_from_dict(&self, value: &Value) -> Result<CredentialHandle> {
        Ok(CredentialHandle {
            key: validate_bundle(value)?,
            source: CredentialSource::Inline,
        })
    }

    /// Validate a bundle and write it to a private temporary file.
    ///
    /// The file gets a random name under the platform temp directory,
    /// owner-only permissions where supported, and becomes this
    /// resolver's current path.
    pub fn persist(&mut self, value: &Value) -> Result<TempCredentialFile> {
        validate_bundle(value)?;

        let mut file = tempfile::Builder::new()
            .prefix("gdocs_cfg_")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(file.as_file_mut(), value)?;
        file.as_file_mut().flush()?;

        let temp_path = file.into_temp_path();
        restrict_permissions(&temp_path);

        tracing::debug!("Persisted credentials to {:?}", &*temp_path);
        self.current = Some(temp_path.to_path_buf());
        self.created = Some(temp_path.to_path_buf());

        Ok(TempCredentialFile {
            path: Some(temp_path),
        })
    }

    /// Forget the current path. A file written by `persist` is removed if
    /// it still exists; files resolved from disk are never touched.
    pub fn cleanup(&mut self) {
        self.current = None;
        let Some(path) = self.created.take() else {
            return;
        };
        if !path.exists() {
            return;
        }
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("Failed to remove credentials {:?}: {}", path, e);
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Could not restrict permissions on {:?}: {}", path, e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
