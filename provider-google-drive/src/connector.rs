//! Google Drive API connector implementation
//!
//! Thin authenticated transport over the Drive v3 `files.get` and
//! `files.list` endpoints. Every call is a single request: no caching, no
//! retry.

use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_auth::AccessToken;
use core_runtime::config::{DriveConfig, DEFAULT_DOWNLOAD_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::{GoogleDriveError, Result};
use crate::types::{ApiErrorEnvelope, DriveItem, FilesListResponse, Listing};

/// Maximum results per page (Google Drive API limit)
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Fields to request for file resources
pub const ITEM_FIELDS: &str = "id,name,mimeType,size,imageMediaMetadata";

/// Google Drive API connector
///
/// # Example
///
/// ```ignore
/// use provider_google_drive::DriveConnector;
///
/// let connector = DriveConnector::new(http_client, access_token, DEFAULT_API_BASE);
/// let page = connector.fetch_listings("folder-id", None).await?;
/// ```
pub struct DriveConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// OAuth 2.0 access token
    access_token: AccessToken,

    /// API base URL without trailing slash
    api_base: String,

    request_timeout: Duration,
    download_timeout: Duration,
}

impl DriveConnector {
    /// Create a new Google Drive connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `access_token` - OAuth 2.0 access token with `drive.readonly` scope
    /// * `api_base` - Drive v3 base URL
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        access_token: AccessToken,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            access_token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    /// Create a connector using the transport and settings of `config`
    pub fn from_config(config: &DriveConfig, access_token: AccessToken) -> Self {
        Self {
            http_client: Arc::clone(&config.http_client),
            access_token,
            api_base: config.api_base.clone(),
            request_timeout: config.request_timeout,
            download_timeout: config.download_timeout,
        }
    }

    /// Build the `q` filter selecting non-trashed children of `parent_id`
    ///
    /// Single quotes and backslashes in the id are escaped as the Drive query
    /// language requires.
    pub fn children_query(parent_id: &str) -> String {
        let escaped = parent_id.replace('\\', "\\\\").replace('\'', "\\'");
        format!("'{}' in parents and trashed = false", escaped)
    }

    fn list_url(&self, parent_id: &str, page_token: Option<&str>) -> String {
        let mut url = format!(
            "{}/files?q={}&pageSize={}&supportsAllDrives=true&includeItemsFromAllDrives=true&fields={}",
            self.api_base,
            urlencoding::encode(&Self::children_query(parent_id)),
            MAX_PAGE_SIZE,
            urlencoding::encode(&format!("nextPageToken,files({})", ITEM_FIELDS))
        );

        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }

        url
    }

    fn item_url(&self, item_id: &str) -> String {
        format!(
            "{}/files/{}?supportsAllDrives=true&fields={}",
            self.api_base,
            urlencoding::encode(item_id),
            urlencoding::encode(ITEM_FIELDS)
        )
    }

    fn media_url(&self, item_id: &str) -> String {
        format!(
            "{}/files/{}?alt=media&supportsAllDrives=true",
            self.api_base,
            urlencoding::encode(item_id)
        )
    }

    /// Execute an authenticated GET and reject non-success statuses
    async fn get(&self, url: String, timeout: Duration, accept_json: bool) -> Result<HttpResponse> {
        let mut request = HttpRequest::get(url)
            .bearer_token(self.access_token.secret())
            .timeout(timeout);

        if accept_json {
            request = request.header("Accept", "application/json");
        }

        let response = self.http_client.execute(request).await?;

        if response.is_success() {
            debug!("API request succeeded: status={}", response.status);
            Ok(response)
        } else {
            let message = error_message(&response);
            warn!(status = response.status, %message, "API request failed");
            Err(GoogleDriveError::ApiError {
                status_code: response.status,
                message,
            })
        }
    }

    /// Fetch one item's metadata
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn fetch_item_metadata(&self, item_id: &str) -> Result<DriveItem> {
        debug!("Fetching metadata for item: {}", item_id);

        let response = self.get(self.item_url(item_id), self.request_timeout, true).await?;

        serde_json::from_slice(&response.body).map_err(|e| {
            GoogleDriveError::ParseError(format!("Failed to parse item metadata: {}", e))
        })
    }

    /// Download one item's raw content
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn download_item(&self, item_id: &str) -> Result<Bytes> {
        debug!("Downloading item: {}", item_id);

        let response = self
            .get(self.media_url(item_id), self.download_timeout, false)
            .await?;

        debug!(
            bytes = response.body.len(),
            content_type = response.header("content-type").unwrap_or("unknown"),
            "Download complete"
        );
        Ok(response.body)
    }

    /// Fetch a single page of `parent_id`'s children
    ///
    /// Returns the page's items and, when more remain, the token for the next
    /// page.
    #[instrument(skip(self), fields(parent_id = %parent_id))]
    pub async fn fetch_listings(&self, parent_id: &str, page_token: Option<&str>) -> Result<Listing> {
        let response = self
            .get(self.list_url(parent_id, page_token), self.request_timeout, true)
            .await?;

        let list_response: FilesListResponse =
            serde_json::from_slice(&response.body).map_err(|e| {
                GoogleDriveError::ParseError(format!("Failed to parse files list response: {}", e))
            })?;

        debug!(
            "Listed {} items (more pages: {})",
            list_response.files.len(),
            list_response.next_page_token.is_some()
        );

        Ok(list_response.into())
    }
}

/// Message from Google's `{"error": {"message": ..}}` envelope, or the raw body
fn error_message(response: &HttpResponse) -> String {
    match serde_json::from_slice::<ApiErrorEnvelope>(&response.body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => String::from_utf8_lossy(&response.body).trim().to_string(),
    }
}
