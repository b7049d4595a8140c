//! Runtime errors shared by the drive crates

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Drive or logging settings that fail validation
    #[error("Invalid drive configuration: {0}")]
    Config(String),

    /// A host service (e.g. the HTTP transport) was neither injected nor
    /// available from a default shim
    #[error("No {capability} available: {message}")]
    CapabilityMissing { capability: String, message: String },

    /// A default shim exists but could not be constructed
    #[error("Failed to set up drive runtime: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
