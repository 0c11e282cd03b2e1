//! `[site]` configuration.
//!
//! Basic site information used for the feed channel.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site metadata for feed generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title, used as the channel title.
    pub title: String,

    /// Site description, used as the channel description.
    pub description: String,

    /// Absolute site URL (e.g., "https://example.com").
    ///
    /// Every item link, image URL and the feed self-link derive from it.
    pub url: Option<String>,

    /// Language code (e.g., "en", "en-ca").
    pub language: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
        }
    }
}

impl SiteInfoConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const DESCRIPTION: FieldPath = FieldPath::new("site.description");
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `feed_enabled`, `url`, `title` and `description` must be set
    /// - `url` must be a valid http(s) URL with a host
    pub fn validate(&self, feed_enabled: bool, diag: &mut ConfigDiagnostics) {
        if feed_enabled {
            if self.url.is_none() {
                diag.error_with_hint(
                    Self::URL,
                    format!("feed is enabled but {} is not configured", Self::URL),
                    format!("set {}, e.g.: \"https://example.com\"", Self::URL),
                );
            }
            if self.title.trim().is_empty() {
                diag.error(Self::TITLE, "feed channel requires a title");
            }
            if self.description.trim().is_empty() {
                diag.error(Self::DESCRIPTION, "feed channel requires a description");
            }
        }

        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::URL,
                        format!("invalid URL: {}", e),
                        "use format like https://example.com",
                    );
                }
            }
        }
    }
}
