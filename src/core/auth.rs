//! Bearer tokens for the Google APIs.
//!
//! `ServiceAccountTokenSource` implements the OAuth2 JWT-bearer grant:
//! an RS256-signed assertion built from the service-account key is
//! exchanged at the bundle's `token_uri` for a short-lived access token.
//! Tokens are cached until shortly before they expire.

use crate::core::credentials::ServiceAccountKey;
use crate::core::error::{GdocsError, ProviderError, Result};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Read-only access to Docs content
pub const DOCS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/documents.readonly";

/// Read-only access to Drive listings
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Supplies bearer tokens to the HTTP provider
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> std::result::Result<String, ProviderError>;
}

/// A pre-minted token, e.g. from `gcloud auth print-access-token`
#[derive(Debug, Clone)]
pub struct StaticTokenSource(String);

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn access_token(&self) -> std::result::Result<String, ProviderError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Token source backed by a service-account key
pub struct ServiceAccountTokenSource {
    client_email: String,
    private_key_id: String,
    encoding_key: EncodingKey,
    scopes: Vec<String>,
    token_uri: String,
    client: reqwest::Client,
    cache: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for ServiceAccountTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountTokenSource")
            .field("client_email", &self.client_email)
            .field("scopes", &self.scopes)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountTokenSource {
    /// Create a token source.
    ///
    /// Fails with `AuthError` if the private key is not a valid RSA PEM.
    /// `token_uri_override` replaces the bundle's `token_uri` (tests and
    /// private endpoints).
    pub fn new(
        key: &ServiceAccountKey,
        scopes: &[&str],
        token_uri_override: Option<&str>,
        client: reqwest::Client,
    ) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            GdocsError::AuthError(format!(
                "private key for {} is not a valid RSA PEM: {e}",
                key.client_email
            ))
        })?;

        Ok(Self {
            client_email: key.client_email.clone(),
            private_key_id: key.private_key_id.clone(),
            encoding_key,
            scopes: scopes.iter().map(|s| (*s).to_string()).collect(),
            token_uri: token_uri_override.unwrap_or(&key.token_uri).to_string(),
            client,
            cache: Mutex::new(None),
        })
    }

    /// Build the signed JWT assertion for the given issue time
    fn assertion(&self, now: i64) -> std::result::Result<String, ProviderError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.private_key_id.clone());

        let claims = Claims {
            iss: &self.client_email,
            scope: self.scopes.join(" "),
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ProviderError::Auth(format!("failed to sign assertion: {e}")))
    }

    async fn exchange(&self, now: i64) -> std::result::Result<CachedToken, ProviderError> {
        let assertion = self.assertion(now)?;
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", JWT_BEARER_GRANT)
            .append_pair("assertion", &assertion)
            .finish();

        let resp = self
            .client
            .post(&self.token_uri)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::Auth(format!("token request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!(
                "token endpoint returned HTTP {status}: {text}"
            )));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Auth(format!("malformed token response: {e}")))?;

        tracing::debug!(
            client_email = %self.client_email,
            expires_in = ?token.expires_in,
            "obtained access token"
        );

        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS),
        })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> std::result::Result<String, ProviderError> {
        let mut cache = self.cache.lock().await;
        let now = chrono::Utc::now().timestamp();

        if let Some(cached) = cache.as_ref() {
            if cached.expires_at - EXPIRY_MARGIN_SECS > now {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.exchange(now).await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }
}
