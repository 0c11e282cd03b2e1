//! Steps shared by the build and check commands.

use crate::asset::FsAssetRegistry;
use crate::config::SiteConfig;
use crate::content::{ContentStore, FsContentStore, Post};
use anyhow::{Context, Result};
use tokio::runtime::Runtime;

/// Load every post of the configured collection, drafts included.
pub fn load_posts(config: &SiteConfig) -> Result<Vec<Post>> {
    FsContentStore::new(&config.content.dir)
        .collection(&config.content.collection)
        .with_context(|| format!("failed to load collection `{}`", config.content.collection))
}

/// Scan the configured image tree.
pub fn scan_images(config: &SiteConfig) -> FsAssetRegistry {
    FsAssetRegistry::scan(config)
}

/// Single-threaded runtime driving the registry lookups.
pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to start async runtime")
}
