//! Credential providers
//!
//! A [`CredentialProvider`] turns a [`DriveConfig`] into an [`AccessToken`].
//! The drive client calls it once during construction and keeps the token for
//! its lifetime.

use async_trait::async_trait;
use bridge_traits::http::HttpRequest;
use core_runtime::config::DriveConfig;
use tracing::{debug, instrument, warn};

use crate::error::{AuthError, Result};
use crate::types::AccessToken;

/// Default environment variable read by [`EnvTokenProvider`]
pub const DEFAULT_TOKEN_ENV_VAR: &str = "DRIVE_ACCESS_TOKEN";

/// Token endpoint of the GCE metadata server for the default service account
pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Source of bearer tokens for the drive client.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Obtain an access token for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable token can be produced.
    async fn fetch_access_token(&self, config: &DriveConfig) -> Result<AccessToken>;
}

/// Hands out a token the host already holds.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn fetch_access_token(&self, _config: &DriveConfig) -> Result<AccessToken> {
        if self.token.is_blank() {
            return Err(AuthError::MissingCredential(
                "Static access token is empty".to_string(),
            ));
        }
        Ok(self.token.clone())
    }
}

/// Reads the token from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var_name: String,
}

impl EnvTokenProvider {
    /// Reads `DRIVE_ACCESS_TOKEN`
    pub fn new() -> Self {
        Self::with_var(DEFAULT_TOKEN_ENV_VAR)
    }

    pub fn with_var(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for EnvTokenProvider {
    async fn fetch_access_token(&self, _config: &DriveConfig) -> Result<AccessToken> {
        match std::env::var(&self.var_name) {
            Ok(value) if !value.trim().is_empty() => {
                debug!(var = %self.var_name, "Loaded access token from environment");
                Ok(AccessToken::new(value.trim()))
            }
            _ => Err(AuthError::MissingCredential(format!(
                "Environment variable {} is not set",
                self.var_name
            ))),
        }
    }
}

/// Fetches a token for the instance's default service account from the
/// Google Compute Engine metadata server.
#[derive(Debug, Clone)]
pub struct MetadataServerProvider {
    token_url: String,
}

impl MetadataServerProvider {
    pub fn new() -> Self {
        Self::with_url(METADATA_TOKEN_URL)
    }

    /// Point at a different token endpoint (emulators, tests)
    pub fn with_url(token_url: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
        }
    }
}

impl Default for MetadataServerProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for MetadataServerProvider {
    #[instrument(skip(self, config), fields(url = %self.token_url))]
    async fn fetch_access_token(&self, config: &DriveConfig) -> Result<AccessToken> {
        let request = HttpRequest::get(self.token_url.clone())
            .header("Metadata-Flavor", "Google")
            .timeout(config.request_timeout);

        let response = config
            .http_client
            .execute(request)
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            let status = response.status;
            let error_body = response
                .text()
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            warn!(status, error = %error_body, "Metadata server refused token request");

            return Err(AuthError::AuthenticationFailed {
                provider: "metadata-server".to_string(),
                reason: format!("Token endpoint returned {}: {}", status, error_body),
            });
        }

        let token: AccessToken = response
            .json()
            .map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;

        if token.is_blank() {
            return Err(AuthError::InvalidTokenResponse(
                "Token endpoint returned an empty access_token".to_string(),
            ));
        }

        debug!(expires_in = ?token.expires_in(), "Obtained access token from metadata server");
        Ok(token)
    }
}
