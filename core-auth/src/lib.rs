//! # Authentication Module
//!
//! Credential providers that hand the drive client a bearer token.
//!
//! ## Overview
//!
//! The client asks its [`CredentialProvider`] for an access token exactly once,
//! when it is constructed. How the token is obtained is up to the provider:
//!
//! - [`StaticTokenProvider`] - a token the host already holds
//! - [`EnvTokenProvider`] - a token exported in an environment variable
//! - [`MetadataServerProvider`] - the default service account of a Google
//!   Compute Engine / Cloud Run instance
//!
//! Token refresh is not handled here. A client whose token expires must be
//! rebuilt with a fresh one.

pub mod error;
pub mod provider;
pub mod types;

pub use error::{AuthError, Result};
pub use provider::{CredentialProvider, EnvTokenProvider, MetadataServerProvider, StaticTokenProvider};
pub use types::AccessToken;
