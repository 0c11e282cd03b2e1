//! `[images]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The image tree scanned into the asset registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Directory scanned once at start-up (relative to project root).
    pub dir: PathBuf,

    /// Prefix prepended to a post's relative image reference to form its
    /// registry key (`../images/cat.png` → `/src/images/cat.png`).
    pub key_prefix: String,

    /// File extensions registered (case-insensitive).
    pub extensions: Vec<String>,

    /// Output subdirectory that receives optimized assets.
    pub output: PathBuf,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: "src/images".into(),
            key_prefix: "/src/".into(),
            extensions: ["jpeg", "jpg", "png", "gif"].map(String::from).to_vec(),
            output: "_assets".into(),
        }
    }
}

impl ImagesConfig {
    pub const KEY_PREFIX: FieldPath = FieldPath::new("images.key_prefix");
    pub const EXTENSIONS: FieldPath = FieldPath::new("images.extensions");
    pub const OUTPUT: FieldPath = FieldPath::new("images.output");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.key_prefix.starts_with('/') {
            diag.error_with_hint(
                Self::KEY_PREFIX,
                "must be rooted at the project",
                "start it with '/', e.g.: \"/src/\"",
            );
        }
        if self.extensions.is_empty() {
            diag.error(Self::EXTENSIONS, "at least one image extension is required");
        }
        if self.output.is_absolute() {
            diag.error(Self::OUTPUT, "must be relative to build.output");
        }
    }

    /// Whether `ext` is one of the registered extensions.
    pub fn accepts(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_case_insensitive() {
        let config = ImagesConfig::default();
        assert!(config.accepts("png"));
        assert!(config.accepts("JPG"));
        assert!(!config.accepts("svg"));
    }

    #[test]
    fn test_validate() {
        let mut diag = ConfigDiagnostics::new();
        ImagesConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());

        let bad = ImagesConfig {
            key_prefix: "src/".into(),
            extensions: vec![],
            ..ImagesConfig::default()
        };
        bad.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
