//! Page walking for folder listings

use tracing::{debug, instrument};

use crate::connector::DriveConnector;
use crate::error::Result;
use crate::types::Listing;

/// Fetch every page of `folder_id`'s children and concatenate them.
///
/// Pages are requested strictly one after another because each request
/// needs the previous page's token. The walk ends at the first page without
/// a `nextPageToken`; there is no iteration cap, so a server that keeps
/// returning tokens keeps this loop running.
#[instrument(skip(connector), fields(folder_id = %folder_id))]
pub async fn fetch_all_pages(connector: &DriveConnector, folder_id: &str) -> Result<Listing> {
    let mut listing = Listing::default();
    let mut pages = 0usize;

    loop {
        let page = connector
            .fetch_listings(folder_id, listing.next_page_token.as_deref())
            .await?;
        pages += 1;

        listing.items.extend(page.items);
        listing.next_page_token = page.next_page_token;

        debug!(page = pages, total = listing.items.len(), "Fetched listing page");

        if !listing.has_more() {
            break;
        }
    }

    Ok(listing)
}
