//! Drive client facade
//!
//! [`DriveClient`] owns the connector and the listing cache. The cache lives
//! exactly as long as the client; dropping the client drops every cached
//! listing with it.

use bytes::Bytes;
use core_auth::{AccessToken, CredentialProvider};
use core_runtime::config::DriveConfig;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::cache::ListingCache;
use crate::connector::DriveConnector;
use crate::error::Result;
use crate::pagination::fetch_all_pages;
use crate::recursion::RecursionSpec;
use crate::resolver::qualify_items;
use crate::types::{DriveItem, FetchOptions, ItemContent, Listing};

/// Path-aware Google Drive client
///
/// # Example
///
/// ```ignore
/// use core_auth::EnvTokenProvider;
/// use core_runtime::DriveConfig;
/// use provider_google_drive::{DriveClient, RecursionSpec};
///
/// let config = DriveConfig::from_env(None)?;
/// let client = DriveClient::connect(config, &EnvTokenProvider::new()).await?;
///
/// if let Some(photo) = client.resolve_path("photos/2023/trip.jpg").await? {
///     let bytes = client.download_item(&photo.id).await?;
/// }
///
/// let everything = client.get_listings(None, None, true).await?;
/// ```
pub struct DriveClient {
    connector: DriveConnector,
    root_folder_id: String,
    pub(crate) cache: ListingCache,
}

impl DriveClient {
    /// Obtain a token from `credentials` and build a client.
    ///
    /// The credential provider is consulted once; the token is kept for the
    /// lifetime of the client.
    #[instrument(skip(config, credentials), fields(root_folder_id = %config.root_folder_id))]
    pub async fn connect(config: DriveConfig, credentials: &dyn CredentialProvider) -> Result<Self> {
        config.validate()?;

        let token = credentials.fetch_access_token(&config).await?;
        info!("Drive client connected");

        Ok(Self::with_token(&config, token))
    }

    /// Build a client around a token the caller already holds
    pub fn with_token(config: &DriveConfig, token: AccessToken) -> Self {
        Self {
            connector: DriveConnector::from_config(config, token),
            root_folder_id: config.root_folder_id.clone(),
            cache: ListingCache::new(),
        }
    }

    /// Id of the folder that paths and default listings start from
    pub fn root_folder_id(&self) -> &str {
        &self.root_folder_id
    }

    /// Whether `item` is a folder
    pub fn is_folder(item: &DriveItem) -> bool {
        item.is_folder()
    }

    /// Fetch an item's metadata
    pub async fn fetch_item_metadata(&self, item_id: &str) -> Result<DriveItem> {
        self.connector.fetch_item_metadata(item_id).await
    }

    /// Download an item's raw content
    pub async fn download_item(&self, item_id: &str) -> Result<Bytes> {
        self.connector.download_item(item_id).await
    }

    /// Fetch metadata or content depending on `options.download`
    pub async fn fetch_item(&self, item_id: &str, options: FetchOptions) -> Result<ItemContent> {
        if options.download {
            self.download_item(item_id).await.map(ItemContent::Bytes)
        } else {
            self.fetch_item_metadata(item_id).await.map(ItemContent::Metadata)
        }
    }

    /// Fetch a single page of a folder's children, bypassing the cache.
    ///
    /// `parent_id` defaults to the root folder.
    pub async fn fetch_listings(
        &self,
        parent_id: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<Listing> {
        let parent_id = parent_id.unwrap_or(&self.root_folder_id);
        self.connector.fetch_listings(parent_id, page_token).await
    }

    /// List a folder through the cache, optionally descending into subfolders.
    ///
    /// `parent_id` defaults to the root folder. With a non-empty
    /// `path_prefix`, every returned name is qualified as `prefix/name`.
    /// Items found by expansion follow their parent level's items, in the
    /// order of the folders they came from, with names qualified by the full
    /// relative path of their folder.
    ///
    /// Expansion of sibling folders runs concurrently. If any of them fails
    /// the whole call fails; no partial result is returned.
    #[instrument(skip(self, recursion))]
    pub async fn get_listings(
        &self,
        parent_id: Option<&str>,
        path_prefix: Option<&str>,
        recursion: impl Into<RecursionSpec>,
    ) -> Result<Listing> {
        let recursion = recursion.into();

        let folder_id = parent_id.unwrap_or(&self.root_folder_id).to_string();
        let prefix = path_prefix
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string);

        let listing = self.listing_tree(folder_id, prefix, recursion).await?;
        debug!(items = listing.len(), ?recursion, "Listing assembled");

        Ok(listing)
    }

    /// Number of folders whose listing is cached
    pub async fn cached_folder_count(&self) -> usize {
        self.cache.len().await
    }

    /// The cached, bare-name listing of one folder
    pub(crate) async fn base_listing(&self, folder_id: &str) -> Result<Arc<Listing>> {
        self.cache
            .get_or_fetch(folder_id, || fetch_all_pages(&self.connector, folder_id))
            .await
    }

    fn listing_tree(
        &self,
        folder_id: String,
        prefix: Option<String>,
        recursion: RecursionSpec,
    ) -> BoxFuture<'_, Result<Listing>> {
        async move {
            let base = self.base_listing(&folder_id).await?;
            let mut listing = Listing {
                items: qualify_items(&base.items, prefix.as_deref()),
                next_page_token: None,
            };

            if recursion.expands() {
                let next = recursion.next();
                let subtrees = try_join_all(
                    listing
                        .folders()
                        .map(|folder| self.listing_tree(folder.id.clone(), Some(folder.name.clone()), next)),
                )
                .await?;

                for subtree in subtrees {
                    listing.items.extend(subtree.items);
                }
            }

            Ok(listing)
        }
        .boxed()
    }
}
