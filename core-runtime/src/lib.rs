//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the drive client:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the other crates depend on.
//! It establishes the configuration and logging conventions used throughout
//! the workspace.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{DriveConfig, DriveConfigBuilder};
pub use error::{Error, Result};
