//! Workspace facade crate.
//!
//! Re-exports the Drive path client so host applications can depend on
//! `drive-paths-workspace` alone. The default `desktop-shims` feature wires
//! the reqwest-backed HTTP client into `DriveConfig::builder()`.

pub use provider_google_drive::*;
