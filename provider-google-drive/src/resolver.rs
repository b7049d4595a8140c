//! Path resolution
//!
//! Paths are `/`-separated names relative to the client's root folder. Only
//! the empty string names the root. Any other path is split on `/` as
//! written, so a leading, trailing or doubled slash produces an empty segment,
//! which never matches a name. Matching is exact and case-sensitive. Drive
//! allows several items with the same name in one folder; the first one in
//! listing order wins, every time.

use bytes::Bytes;
use tracing::{debug, instrument};

use crate::client::DriveClient;
use crate::error::Result;
use crate::types::DriveItem;

/// Join a parent path and a name; `None` or an empty parent yields the bare name
pub fn join_path(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{}/{}", parent, name),
        _ => name.to_string(),
    }
}

/// Copies of `items` with names qualified by `prefix`
pub fn qualify_items(items: &[DriveItem], prefix: Option<&str>) -> Vec<DriveItem> {
    items
        .iter()
        .map(|item| DriveItem {
            name: join_path(prefix, &item.name),
            ..item.clone()
        })
        .collect()
}

impl DriveClient {
    /// Find a direct child of `parent_id` (default: root) by bare name.
    ///
    /// Uses the cached listing of the parent. Returns the first match in
    /// listing order, or `None` if no child has that name.
    pub async fn get_item(&self, name: &str, parent_id: Option<&str>) -> Result<Option<DriveItem>> {
        let parent_id = parent_id.unwrap_or(self.root_folder_id());
        let listing = self.base_listing(parent_id).await?;

        Ok(listing.find_by_name(name).cloned())
    }

    /// Resolve a slash-separated path to an item.
    ///
    /// An empty path returns the root folder's own metadata. Otherwise each
    /// segment is looked up among the children of the previous one; the
    /// resolved item comes back with `name` set to the full path. A segment
    /// that does not exist (including an empty one), or a non-folder in the
    /// middle of the path, yields `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn resolve_path(&self, path: &str) -> Result<Option<DriveItem>> {
        if path.is_empty() {
            return self.fetch_item_metadata(self.root_folder_id()).await.map(Some);
        }

        let mut segments = path.split('/').peekable();
        let mut parent_id = self.root_folder_id().to_string();
        let mut resolved_path: Option<String> = None;

        while let Some(segment) = segments.next() {
            if segment.is_empty() {
                debug!(path, "Empty path segment");
                return Ok(None);
            }

            let Some(item) = self.get_item(segment, Some(&parent_id)).await? else {
                debug!(segment, parent_id = %parent_id, "Path segment not found");
                return Ok(None);
            };

            resolved_path = Some(join_path(resolved_path.as_deref(), &item.name));

            if segments.peek().is_none() {
                return Ok(Some(DriveItem {
                    name: resolved_path.unwrap_or_default(),
                    ..item
                }));
            }

            if !item.is_folder() {
                debug!(segment, "Path continues below a non-folder");
                return Ok(None);
            }

            parent_id = item.id;
        }

        Ok(None)
    }

    /// Resolve `path` and download the item it names.
    ///
    /// `Ok(None)` when the path does not resolve.
    pub async fn download_path(&self, path: &str) -> Result<Option<Bytes>> {
        match self.resolve_path(path).await? {
            Some(item) => self.download_item(&item.id).await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> DriveItem {
        DriveItem {
            id: format!("id-{}", name),
            name: name.to_string(),
            mime_type: "text/plain".to_string(),
            size: Some("1".to_string()),
            image_media_metadata: None,
        }
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(None, "a"), "a");
        assert_eq!(join_path(Some(""), "a"), "a");
        assert_eq!(join_path(Some("photos"), "2023"), "photos/2023");
        assert_eq!(join_path(Some("photos/2023"), "trip.jpg"), "photos/2023/trip.jpg");
    }

    #[test]
    fn test_qualify_items_keeps_everything_but_name() {
        let items = vec![item("a.txt"), item("b.txt")];

        let bare = qualify_items(&items, None);
        assert_eq!(bare, items);

        let qualified = qualify_items(&items, Some("docs"));
        assert_eq!(qualified[0].name, "docs/a.txt");
        assert_eq!(qualified[1].name, "docs/b.txt");
        assert_eq!(qualified[0].id, items[0].id);
        assert_eq!(qualified[0].size, items[0].size);

        // Source untouched
        assert_eq!(items[0].name, "a.txt");
    }
}
