//! Google Drive API response types
//!
//! Data structures for deserializing Google Drive API v3 responses, plus the
//! [`Listing`] the cache and resolver work with.

use serde::{Deserialize, Serialize};

/// MIME type Google Drive uses for folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Google Drive API file resource, restricted to the fields this crate requests
///
/// See: https://developers.google.com/drive/api/v3/reference/files#resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    /// File ID
    pub id: String,

    /// File name. Bare as returned by the API, or path-qualified when the
    /// item came out of a prefixed listing or path resolution.
    pub name: String,

    /// MIME type
    pub mime_type: String,

    /// File size in bytes (omitted for folders and Google Docs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Image metadata (images only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_media_metadata: Option<ImageMediaMetadata>,
}

impl DriveItem {
    /// Whether this item is a folder
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }

    /// Size in bytes, when present and well-formed
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Image dimensions reported by Drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMediaMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Clockwise rotation in quarter turns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
}

/// Google Drive API files.list response
///
/// See: https://developers.google.com/drive/api/v3/reference/files/list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesListResponse {
    /// List of files
    #[serde(default)]
    pub files: Vec<DriveItem>,

    /// Token for next page
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Error body returned by Google APIs alongside a non-2xx status
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Contents of one folder, possibly spanning several pages.
///
/// While pages are being collected `next_page_token` holds the token for the
/// next request. A completed listing has no token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub items: Vec<DriveItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl Listing {
    /// Whether more pages remain to be fetched
    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }

    /// First item whose name equals `name` exactly
    pub fn find_by_name(&self, name: &str) -> Option<&DriveItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Iterator over the folder items of this listing
    pub fn folders(&self) -> impl Iterator<Item = &DriveItem> {
        self.items.iter().filter(|item| item.is_folder())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<FilesListResponse> for Listing {
    fn from(response: FilesListResponse) -> Self {
        Self {
            items: response.files,
            next_page_token: response.next_page_token,
        }
    }
}

/// What [`fetch_item`](crate::DriveClient::fetch_item) should return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Download the raw content instead of the metadata
    pub download: bool,
}

/// Result of [`fetch_item`](crate::DriveClient::fetch_item)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemContent {
    Metadata(DriveItem),
    Bytes(bytes::Bytes),
}
