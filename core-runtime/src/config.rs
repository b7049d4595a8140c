//! # Drive Configuration Module
//!
//! Provides configuration management for the drive client.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `DriveConfig`
//! instance that holds the transport bridge and the settings the client needs.
//! It enforces fail-fast validation so a client is never constructed without a
//! root folder or a usable `HttpClient`.
//!
//! ## Required Settings
//!
//! - `root_folder_id` - The folder every path is resolved from
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//!
//! When the `desktop-shims` feature is enabled, a `ReqwestHttpClient` is
//! injected automatically if none is provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::DriveConfig;
//!
//! let config = DriveConfig::builder()
//!     .root_folder_id("0AbCdEfGhIjK")
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Environment
//!
//! [`DriveConfig::from_env`] reads:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `DRIVE_ROOT_FOLDER_ID` | Root folder identifier (required) |
//! | `DRIVE_API_BASE` | API base URL (default `https://www.googleapis.com/drive/v3`) |
//! | `DRIVE_REQUEST_TIMEOUT_SECS` | Per-request timeout for metadata and listing calls |

use crate::error::{Error, Result};
use bridge_traits::HttpClient;
use std::sync::Arc;
use std::time::Duration;

/// Default Google Drive API base URL
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Default timeout for metadata and listing requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for media downloads
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub const ENV_ROOT_FOLDER_ID: &str = "DRIVE_ROOT_FOLDER_ID";
pub const ENV_API_BASE: &str = "DRIVE_API_BASE";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "DRIVE_REQUEST_TIMEOUT_SECS";

/// Configuration for a drive client.
///
/// This struct holds the transport and settings required to construct a
/// client. Use [`DriveConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct DriveConfig {
    /// Identifier of the folder paths are resolved from
    pub root_folder_id: String,

    /// Base URL of the Drive v3 API, without trailing slash
    pub api_base: String,

    /// Timeout applied to metadata and listing requests
    pub request_timeout: Duration,

    /// Timeout applied to media downloads
    pub download_timeout: Duration,

    /// HTTP client for making API requests
    pub http_client: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for DriveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveConfig")
            .field("root_folder_id", &self.root_folder_id)
            .field("api_base", &self.api_base)
            .field("request_timeout", &self.request_timeout)
            .field("download_timeout", &self.download_timeout)
            .field("http_client", &"HttpClient { ... }")
            .finish()
    }
}

impl DriveConfig {
    /// Creates a new builder for constructing a `DriveConfig`.
    pub fn builder() -> DriveConfigBuilder {
        DriveConfigBuilder::default()
    }

    /// Builds a configuration from process environment variables.
    ///
    /// An explicit `HttpClient` can still be supplied; otherwise the platform
    /// default is used.
    pub fn from_env(http_client: Option<Arc<dyn HttpClient>>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), http_client)
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F, http_client: Option<Arc<dyn HttpClient>>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = DriveConfig::builder();

        if let Some(root) = lookup(ENV_ROOT_FOLDER_ID) {
            builder = builder.root_folder_id(root);
        }

        if let Some(base) = lookup(ENV_API_BASE) {
            builder = builder.api_base(base);
        }

        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_REQUEST_TIMEOUT_SECS, raw
                ))
            })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        if let Some(client) = http_client {
            builder = builder.http_client(client);
        }

        builder.build()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Root folder id is not blank and contains no path separator
    /// - API base is an http(s) URL
    /// - Timeouts are non-zero
    pub fn validate(&self) -> Result<()> {
        if self.root_folder_id.trim().is_empty() {
            return Err(Error::Config("Root folder id cannot be empty".to_string()));
        }

        if self.root_folder_id.contains('/') {
            return Err(Error::Config(format!(
                "Root folder id must be an identifier, not a path: '{}'",
                self.root_folder_id
            )));
        }

        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(Error::Config(format!(
                "API base must be an http(s) URL: '{}'",
                self.api_base
            )));
        }

        if self.request_timeout.is_zero() || self.download_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeouts must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default ReqwestHttpClient. \
                 Other hosts: inject a platform-native HttpClient."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_timeout(timeout)
        .map_err(|e| Error::Internal(format!("Failed to create default HttpClient: {}", e)))?;
    let client: Arc<dyn HttpClient> = Arc::new(client);
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

/// Builder for constructing [`DriveConfig`] instances.
///
/// Call [`build()`](DriveConfigBuilder::build) to validate and create the
/// final config.
#[derive(Default)]
pub struct DriveConfigBuilder {
    root_folder_id: Option<String>,
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    download_timeout: Option<Duration>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl DriveConfigBuilder {
    /// Sets the root folder identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::DriveConfig;
    ///
    /// let builder = DriveConfig::builder()
    ///     .root_folder_id("0AbCdEfGhIjK");
    /// ```
    pub fn root_folder_id(mut self, id: impl Into<String>) -> Self {
        self.root_folder_id = Some(id.into());
        self
    }

    /// Overrides the API base URL. A trailing slash is removed.
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Sets the timeout for metadata and listing requests.
    ///
    /// Default: 30 seconds
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the timeout for media downloads.
    ///
    /// Default: 60 seconds
    pub fn download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = Some(timeout);
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the final [`DriveConfig`], validating all settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No root folder id was provided
    /// - No `HttpClient` was provided and no platform default exists
    /// - Validation fails (see [`DriveConfig::validate`])
    pub fn build(self) -> Result<DriveConfig> {
        let root_folder_id = self.root_folder_id.ok_or_else(|| {
            Error::Config(format!(
                "Root folder id is required. Set it on the builder or via {}",
                ENV_ROOT_FOLDER_ID
            ))
        })?;

        let api_base = self
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let download_timeout = self.download_timeout.unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT);

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(download_timeout.max(request_timeout))?,
        };

        let config = DriveConfig {
            root_folder_id,
            api_base,
            request_timeout,
            download_timeout,
            http_client,
        };

        config.validate()?;
        Ok(config)
    }
}
