//! # Host Bridge Traits
//!
//! Transport abstraction the drive core is written against.
//!
//! ## Overview
//!
//! The core never talks to the network directly. Every request goes through an
//! [`HttpClient`](http::HttpClient) supplied by the host, so the same path
//! resolution and listing logic runs against `reqwest` on desktop, a platform
//! fetch API elsewhere, or an in-memory fake in tests.
//!
//! ## Error Handling
//!
//! Transport implementations convert their native failures into
//! [`BridgeError`](error::BridgeError). The core does not retry; a failed
//! request surfaces to the caller unchanged.
//!
//! ## Thread Safety
//!
//! `HttpClient` requires `Send + Sync` so one client can be shared across the
//! concurrent folder expansions the core performs.
//!
//! ## Examples
//!
//! ### Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         // Implementation
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
