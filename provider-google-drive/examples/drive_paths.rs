//! Resolve a path in a real Drive, or print a folder tree.
//!
//! Run with:
//! ```bash
//! export DRIVE_ROOT_FOLDER_ID=<folder id>
//! export DRIVE_ACCESS_TOKEN=$(gcloud auth print-access-token)
//!
//! # Metadata of one item
//! cargo run -p provider-google-drive --example drive_paths -- photos/2023/trip.jpg
//!
//! # Every item below the root, two levels deep
//! cargo run -p provider-google-drive --example drive_paths -- --tree 2
//! ```

use anyhow::Context;
use bridge_desktop::ReqwestHttpClient;
use core_auth::EnvTokenProvider;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::DriveConfig;
use provider_google_drive::{DriveClient, RecursionSpec};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_filter("provider_google_drive=debug,core_auth=info"),
    )?;

    let args: Vec<String> = env::args().skip(1).collect();

    let config = DriveConfig::from_env(Some(Arc::new(ReqwestHttpClient::new()?)))
        .context("DRIVE_ROOT_FOLDER_ID must be set")?;
    let client = DriveClient::connect(config, &EnvTokenProvider::new()).await?;

    match args.first().map(String::as_str) {
        Some("--tree") => {
            let recursion = match args.get(1) {
                Some(depth) => RecursionSpec::from(depth.parse::<u32>().context("depth must be a number")?),
                None => RecursionSpec::Unbounded,
            };

            let listing = client.get_listings(None, None, recursion).await?;
            for item in &listing.items {
                let marker = if item.is_folder() { "/" } else { "" };
                println!("{}{}", item.name, marker);
            }
            println!("{} items in {} folders", listing.len(), client.cached_folder_count().await);
        }
        path => {
            let path = path.unwrap_or("");
            match client.resolve_path(path).await? {
                Some(item) => println!("{}", serde_json::to_string_pretty(&item)?),
                None => println!("{}: not found", path),
            }
        }
    }

    Ok(())
}
