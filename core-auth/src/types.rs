use serde::{Deserialize, Serialize};
use std::fmt;

/// A bearer token used to authorize drive API requests.
///
/// Deserializes from the common token endpoint shape
/// `{ "access_token": "...", "token_type": "Bearer", "expires_in": 3599 }`;
/// only `access_token` is required.
///
/// # Examples
///
/// ```
/// use core_auth::AccessToken;
///
/// let token = AccessToken::new("ya29.a0...");
/// assert_eq!(token.secret(), "ya29.a0...");
/// assert!(!format!("{:?}", token).contains("ya29"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    access_token: String,
    /// Seconds until expiry, when the issuer reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_in: Option<i64>,
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in: None,
        }
    }

    pub fn with_expires_in(mut self, seconds: i64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    /// The raw token value. Never log this.
    pub fn secret(&self) -> &str {
        &self.access_token
    }

    pub fn expires_in(&self) -> Option<i64> {
        self.expires_in
    }

    pub fn is_blank(&self) -> bool {
        self.access_token.trim().is_empty()
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
