//! `[feed]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::pipeline::FORBIDDEN_TAGS;
use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

/// How posts marked `draft: true` are treated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftPolicy {
    /// Drafts never reach the public feed (default).
    #[default]
    Exclude,
    /// Drafts are published like any other post.
    Include,
}

/// Order of items in the feed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ItemOrder {
    /// Content-store order, untouched (default).
    #[default]
    Collection,
    /// Newest date first.
    Newest,
    /// Oldest date first.
    Oldest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSectionConfig {
    /// Enable feed generation.
    pub enable: bool,

    /// Output path of the feed, relative to `build.output`.
    pub path: PathBuf,

    /// Draft handling.
    pub drafts: DraftPolicy,

    /// Item ordering.
    pub order: ItemOrder,

    /// Keep the trailing slash on item and channel links.
    pub trailing_slash: bool,

    /// Tags allowed in item content on top of the default allow-list.
    pub extra_tags: Vec<String>,
}

impl Default for FeedSectionConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "rss.xml".into(),
            drafts: DraftPolicy::Exclude,
            order: ItemOrder::Collection,
            trailing_slash: false,
            extra_tags: Vec::new(),
        }
    }
}

impl FeedSectionConfig {
    pub const PATH: FieldPath = FieldPath::new("feed.path");
    pub const EXTRA_TAGS: FieldPath = FieldPath::new("feed.extra_tags");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let escapes = self
            .path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if self.path.as_os_str().is_empty() || escapes {
            diag.error_with_hint(
                Self::PATH,
                format!("invalid feed path '{}'", self.path.display()),
                "use a path inside the output directory, e.g.: \"rss.xml\"",
            );
        }

        for tag in &self.extra_tags {
            if FORBIDDEN_TAGS.contains(&tag.to_ascii_lowercase().as_str()) {
                diag.error(
                    Self::EXTRA_TAGS,
                    format!("'{tag}' can not be allowed in feed content"),
                );
            }
        }
    }
}
