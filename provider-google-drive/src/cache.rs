//! Per-client memo of folder listings
//!
//! Each folder id maps to a completed [`Listing`] with bare item names. An
//! entry, once filled, is served for the lifetime of the owning client; there
//! is no expiry and no invalidation, so a listing is a snapshot taken at first
//! access.
//!
//! Concurrent callers asking for the same unfilled folder share one fetch:
//! the map hands out a per-folder [`OnceCell`] and only the first caller runs
//! the fetch future while the others wait on the cell. A fetch that fails
//! leaves the cell empty, so the next caller tries again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::error::Result;
use crate::types::Listing;

type Slot = Arc<OnceCell<Arc<Listing>>>;

#[derive(Default)]
pub struct ListingCache {
    entries: Mutex<HashMap<String, Slot>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached listing for `folder_id`, running `fetch` to fill it
    /// if this is the first request for that folder.
    pub async fn get_or_fetch<F, Fut>(&self, folder_id: &str, fetch: F) -> Result<Arc<Listing>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Listing>>,
    {
        // The map lock only guards slot lookup; it is released before any
        // network await.
        let slot = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(folder_id.to_string()).or_default())
        };

        if let Some(listing) = slot.get() {
            debug!(folder_id, "Listing cache hit");
            return Ok(Arc::clone(listing));
        }

        let listing = slot
            .get_or_try_init(|| async move {
                debug!(folder_id, "Listing cache miss, fetching");
                fetch().await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(listing))
    }

    /// Cached listing for `folder_id`, without fetching
    #[cfg(test)]
    pub async fn peek(&self, folder_id: &str) -> Option<Arc<Listing>> {
        let entries = self.entries.lock().await;
        entries.get(folder_id).and_then(|slot| slot.get().cloned())
    }

    /// Number of folders with a completed listing
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
