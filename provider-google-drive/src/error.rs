//! Error types for Google Drive provider

use thiserror::Error;

/// Google Drive provider errors
///
/// Items or path segments that do not exist are not errors; lookups report
/// them as `None`.
#[derive(Error, Debug)]
pub enum GoogleDriveError {
    /// API request returned a non-success status
    #[error("Google Drive API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Credential provider could not produce a token
    #[error(transparent)]
    Auth(#[from] core_auth::AuthError),

    /// Invalid client configuration
    #[error(transparent)]
    Config(#[from] core_runtime::Error),

    /// Transport failure
    #[error(transparent)]
    BridgeError(#[from] bridge_traits::error::BridgeError),
}

impl GoogleDriveError {
    /// HTTP status of an API error, if this is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GoogleDriveError::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Result type for Google Drive operations
pub type Result<T> = std::result::Result<T, GoogleDriveError>;
