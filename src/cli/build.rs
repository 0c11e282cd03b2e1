//! Feed building orchestration.
//!
//! Build phases:
//! - **Load** - Read and validate the content collection
//! - **Scan** - Register every image under `images.dir`
//! - **Assemble** - Render, resolve images and sanitize every post
//! - **Write** - Serialize the channel to `{build.output}/{feed.path}`

use super::common::{load_posts, runtime, scan_images};
use crate::{
    asset::AssetRegistry,
    config::SiteConfig,
    generator::feed::{FeedConfig, build_feed, write_feed},
    log,
    pipeline::SanitizePolicy,
    utils::plural_count,
};
use anyhow::Result;
use std::path::PathBuf;

/// Build the feed file. Returns the written path, or `None` when the
/// feed is disabled.
pub fn build_feed_file(config: &SiteConfig) -> Result<Option<PathBuf>> {
    if !config.feed.enable {
        log!("feed"; "disabled in config, nothing to build");
        return Ok(None);
    }

    let posts = load_posts(config)?;
    let registry = scan_images(config);
    log!(
        "build";
        "{}, {} registered",
        plural_count(posts.len(), "post"),
        plural_count(registry.len(), "image")
    );

    let feed_config = FeedConfig::from_site(config);
    let policy = SanitizePolicy::with_extra_tags(&config.feed.extra_tags);
    let doc = runtime()?.block_on(build_feed(&posts, &feed_config, &registry, &policy))?;

    let skipped = posts.len() - doc.items.len();
    if skipped > 0 {
        log!("build"; "{} skipped", plural_count(skipped, "draft"));
    }

    let path = config.feed_output_path();
    write_feed(&doc, &path, config.build.minify)?;
    log!("done"; "{} written to {}", plural_count(doc.items.len(), "item"), path.display());

    Ok(Some(path))
}
