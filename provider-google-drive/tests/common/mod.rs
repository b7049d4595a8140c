//! In-memory stand-in for the Drive v3 files endpoints.
#![allow(dead_code)]

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_auth::StaticTokenProvider;
use core_runtime::DriveConfig;
use provider_google_drive::{DriveClient, DriveItem, ImageMediaMetadata, FOLDER_MIME_TYPE};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

pub const FAKE_API_BASE: &str = "https://fake.drive/drive/v3";
pub const TOKEN: &str = "test-token";

pub struct FakeDrive {
    root_id: String,
    items: HashMap<String, DriveItem>,
    children: HashMap<String, Vec<String>>,
    content: HashMap<String, Vec<u8>>,
    page_size: usize,
    list_calls: Mutex<HashMap<String, usize>>,
    failures: Mutex<HashMap<String, usize>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeDrive {
    pub fn new(root_id: &str, root_name: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(root_id.to_string(), folder_item(root_id, root_name));

        Self {
            root_id: root_id.to_string(),
            items,
            children: HashMap::new(),
            content: HashMap::new(),
            page_size: 1000,
            list_calls: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn folder(mut self, parent: &str, id: &str, name: &str) -> Self {
        self.add(parent, folder_item(id, name));
        self
    }

    pub fn file(mut self, parent: &str, id: &str, name: &str, data: &[u8]) -> Self {
        self.add(
            parent,
            DriveItem {
                id: id.to_string(),
                name: name.to_string(),
                mime_type: "application/octet-stream".to_string(),
                size: Some(data.len().to_string()),
                image_media_metadata: None,
            },
        );
        self.content.insert(id.to_string(), data.to_vec());
        self
    }

    pub fn image(mut self, parent: &str, id: &str, name: &str, width: u32, height: u32) -> Self {
        self.add(
            parent,
            DriveItem {
                id: id.to_string(),
                name: name.to_string(),
                mime_type: "image/jpeg".to_string(),
                size: Some("4".to_string()),
                image_media_metadata: Some(ImageMediaMetadata {
                    width: Some(width),
                    height: Some(height),
                    rotation: Some(0),
                }),
            },
        );
        self.content.insert(id.to_string(), b"JPEG".to_vec());
        self
    }

    /// Make the next `times` listing requests for `folder` answer 500
    pub fn fail_listing(self, folder: &str, times: usize) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(folder.to_string(), times);
        self
    }

    fn add(&mut self, parent: &str, item: DriveItem) {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(item.id.clone());
        self.items.insert(item.id.clone(), item);
    }

    /// Listing page requests received for `folder`
    pub fn list_calls(&self, folder: &str) -> usize {
        self.list_calls
            .lock()
            .unwrap()
            .get(folder)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_list_calls(&self) -> usize {
        self.list_calls.lock().unwrap().values().sum()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    fn list(&self, query: &HashMap<String, String>) -> HttpResponse {
        let q = query.get("q").cloned().unwrap_or_default();
        let Some(parent) = q
            .strip_prefix('\'')
            .and_then(|rest| rest.split("' in parents").next())
            .map(str::to_string)
        else {
            return respond(400, format!("bad query: {}", q));
        };

        if !q.ends_with("and trashed = false")
            || query.get("pageSize").map(String::as_str) != Some("1000")
            || query.get("supportsAllDrives").map(String::as_str) != Some("true")
            || query.get("includeItemsFromAllDrives").map(String::as_str) != Some("true")
        {
            return respond(400, "missing required listing parameters".to_string());
        }

        *self
            .list_calls
            .lock()
            .unwrap()
            .entry(parent.clone())
            .or_default() += 1;

        {
            let mut failures = self.failures.lock().unwrap();
            if let Some(remaining) = failures.get_mut(&parent) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return respond(500, "backend error".to_string());
                }
            }
        }

        let offset: usize = query
            .get("pageToken")
            .and_then(|token| token.strip_prefix("offset-"))
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);

        let ids = self.children.get(&parent).cloned().unwrap_or_default();
        let end = (offset + self.page_size).min(ids.len());
        let files: Vec<&DriveItem> = ids[offset.min(end)..end]
            .iter()
            .filter_map(|id| self.items.get(id))
            .collect();

        let body = if end < ids.len() {
            serde_json::json!({ "files": files, "nextPageToken": format!("offset-{}", end) })
        } else {
            serde_json::json!({ "files": files })
        };

        respond(200, body.to_string())
    }

    fn get(&self, id: &str, query: &HashMap<String, String>) -> HttpResponse {
        if query.get("alt").map(String::as_str) == Some("media") {
            return match self.content.get(id) {
                Some(data) => HttpResponse {
                    status: 200,
                    headers: HashMap::new(),
                    body: Bytes::from(data.clone()),
                },
                None => respond(404, format!("no content for {}", id)),
            };
        }

        match self.items.get(id) {
            Some(item) => respond(200, serde_json::to_string(item).unwrap()),
            None => respond(404, format!("File not found: {}", id)),
        }
    }
}

#[async_trait]
impl HttpClient for FakeDrive {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        // Give sibling tasks a chance to interleave
        tokio::task::yield_now().await;

        self.requests.lock().unwrap().push(request.clone());

        if request.headers.get("Authorization") != Some(&format!("Bearer {}", TOKEN)) {
            return Ok(respond(401, "missing bearer token".to_string()));
        }

        let url = Url::parse(&request.url)
            .map_err(|e| BridgeError::OperationFailed(format!("bad url: {}", e)))?;
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

        let path = url.path();
        let Some(rest) = path.strip_prefix("/drive/v3/files") else {
            return Ok(respond(404, format!("unknown endpoint {}", path)));
        };

        if rest.is_empty() {
            Ok(self.list(&query))
        } else {
            let id = urlencoding::decode(rest.trim_start_matches('/'))
                .map_err(|e| BridgeError::OperationFailed(e.to_string()))?;
            Ok(self.get(&id, &query))
        }
    }
}

fn folder_item(id: &str, name: &str) -> DriveItem {
    DriveItem {
        id: id.to_string(),
        name: name.to_string(),
        mime_type: FOLDER_MIME_TYPE.to_string(),
        size: None,
        image_media_metadata: None,
    }
}

fn respond(status: u16, body: String) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::new(),
        body: Bytes::from(body),
    }
}

/// ```text
/// My Drive (root)
/// ├── photos/
/// │   ├── 2023/
/// │   │   ├── trip.jpg
/// │   │   └── beach.jpg
/// │   └── cover.png
/// ├── docs/
/// │   ├── a.txt
/// │   └── deep/
/// │       └── deeper/
/// │           └── bottom.txt
/// ├── readme.md
/// ├── x            (first)
/// └── x            (second)
/// ```
pub fn sample_drive() -> FakeDrive {
    FakeDrive::new("root", "My Drive")
        .folder("root", "photos", "photos")
        .folder("root", "docs", "docs")
        .file("root", "readme", "readme.md", b"# readme")
        .file("root", "x1", "x", b"first")
        .file("root", "x2", "x", b"second")
        .folder("photos", "y2023", "2023")
        .file("photos", "cover", "cover.png", b"PNG")
        .image("y2023", "trip", "trip.jpg", 4000, 3000)
        .image("y2023", "beach", "beach.jpg", 800, 600)
        .file("docs", "a", "a.txt", b"aaa")
        .folder("docs", "deep", "deep")
        .folder("deep", "deeper", "deeper")
        .file("deeper", "bottom", "bottom.txt", b"bottom")
}

pub async fn connect(drive: &Arc<FakeDrive>) -> DriveClient {
    let http: Arc<dyn HttpClient> = drive.clone();
    let config = DriveConfig::builder()
        .root_folder_id(drive.root_id())
        .api_base(FAKE_API_BASE)
        .http_client(http)
        .build()
        .expect("valid config");

    DriveClient::connect(config, &StaticTokenProvider::new(TOKEN))
        .await
        .expect("client connects")
}

pub fn names(items: &[DriveItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}
