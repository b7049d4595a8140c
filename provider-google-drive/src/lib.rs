//! # Google Drive Provider
//!
//! Path-aware client for Google Drive API v3.
//!
//! ## Overview
//!
//! This crate provides:
//! - Item metadata lookups and raw content downloads
//! - Folder listings that follow `nextPageToken` until exhausted
//! - A per-client cache of folder listings, filled at most once per folder
//! - Recursive listings with path-qualified names (`photos/2023/trip.jpg`)
//! - Resolution of slash-separated paths to items
//!
//! Not provided: uploads or other writes, retry and backoff, quota handling,
//! token refresh.
//!
//! ## Caching
//!
//! Listings are snapshots taken the first time a folder is listed and are
//! never refreshed while the client lives. Build a new [`DriveClient`] to see
//! remote changes.

pub mod cache;
pub mod client;
pub mod connector;
pub mod error;
pub mod pagination;
pub mod recursion;
pub mod resolver;
pub mod types;

pub use client::DriveClient;
pub use connector::DriveConnector;
pub use error::{GoogleDriveError, Result};
pub use recursion::RecursionSpec;
pub use types::{DriveItem, FetchOptions, ImageMediaMetadata, ItemContent, Listing, FOLDER_MIME_TYPE};
