//! `[content]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where authored posts live and how their links are formed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root; each collection is a subdirectory.
    pub dir: PathBuf,

    /// Collection the feed is built from.
    pub collection: String,

    /// Site-relative prefix of post links (`/blog/` → `/blog/<slug>/`).
    pub permalink: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "src/content".into(),
            collection: "blog".into(),
            permalink: "/blog/".into(),
        }
    }
}

impl ContentConfig {
    pub const COLLECTION: FieldPath = FieldPath::new("content.collection");
    pub const PERMALINK: FieldPath = FieldPath::new("content.permalink");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.collection.trim().is_empty() || self.collection.contains(['/', '\\']) {
            diag.error_with_hint(
                Self::COLLECTION,
                format!("invalid collection name '{}'", self.collection),
                "use a directory name under content.dir, e.g.: \"blog\"",
            );
        }
        if !self.permalink.starts_with('/') {
            diag.error_with_hint(
                Self::PERMALINK,
                "must be a site-relative path",
                "start it with '/', e.g.: \"/blog/\"",
            );
        }
    }
}
