//! Content and config validation without output.
//!
//! Loads everything a build would load, then reports what the feed would
//! contain and which image references would stay unresolved.

use super::common::{load_posts, scan_images};
use crate::{
    asset::AssetRegistry,
    config::{DraftPolicy, SiteConfig},
    content::Post,
    debug, log,
    pipeline::{MarkdownRenderer, image_keys},
    utils::plural_count,
};
use anyhow::Result;

/// What a build would see.
#[derive(Debug, Default, PartialEq)]
pub struct CheckReport {
    pub posts: usize,
    pub drafts: usize,
    pub images: usize,
    /// `(slug, key)` of image references missing from the registry
    pub unresolved: Vec<(String, String)>,
}

impl CheckReport {
    /// Posts the feed would publish under the configured draft policy.
    pub fn published(&self, drafts: DraftPolicy) -> usize {
        match drafts {
            DraftPolicy::Include => self.posts,
            DraftPolicy::Exclude => self.posts - self.drafts,
        }
    }
}

/// Run all checks and log the report.
pub fn run_check(config: &SiteConfig) -> Result<()> {
    let report = inspect(config)?;

    log!(
        "check";
        "{} ({} draft), {} registered",
        plural_count(report.posts, "post"),
        report.drafts,
        plural_count(report.images, "image")
    );
    for (slug, key) in &report.unresolved {
        log!("warning"; "{}: no registered image for {}", slug, key);
    }

    if config.feed.enable {
        log!(
            "done";
            "{} would be written to {}",
            plural_count(report.published(config.feed.drafts), "item"),
            config.feed_output_path().display()
        );
    } else {
        log!("done"; "feed disabled, config and content are valid");
    }
    Ok(())
}

/// Load posts and images, and collect image references the registry misses.
pub fn inspect(config: &SiteConfig) -> Result<CheckReport> {
    let posts = load_posts(config)?;
    let registry = scan_images(config);
    let renderer = MarkdownRenderer::default();

    let mut unresolved = Vec::new();
    for post in &posts {
        for key in missing_images(post, &renderer, &config.images.key_prefix, &registry) {
            unresolved.push((post.slug.clone(), key));
        }
    }

    Ok(CheckReport {
        posts: posts.len(),
        drafts: posts.iter().filter(|p| p.meta.draft).count(),
        images: registry.len(),
        unresolved,
    })
}

fn missing_images<R: AssetRegistry>(
    post: &Post,
    renderer: &MarkdownRenderer,
    key_prefix: &str,
    registry: &R,
) -> Vec<String> {
    let keys = image_keys(&renderer.render(&post.body), key_prefix);
    debug!("check"; "{}: {}", post.slug, plural_count(keys.len(), "image reference"));
    keys.into_iter().filter(|key| !registry.contains(key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::write_png;
    use crate::config::test_parse_config;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn site(root: &Path) -> SiteConfig {
        let mut config = test_parse_config("");
        config.set_root(root);
        config.content.dir = root.join("src/content");
        config.images.dir = root.join("src/images");
        config.build.output = root.join("dist");
        config
    }

    fn write_post(root: &Path, name: &str, content: &str) {
        let path = root.join("src/content/blog").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_inspect_reports_counts_and_missing_images() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_png(&root.join("src/images/cat.png"), 1, 1);
        write_post(
            root,
            "a.md",
            "---\ntitle: A\ndate: 2024-01-01\n---\n![](../images/cat.png) ![](../images/dog.png)",
        );
        write_post(root, "b.md", "+++\ntitle = \"B\"\ndate = \"2024-02-01\"\ndraft = true\n+++\nbody");

        let report = inspect(&site(root)).unwrap();
        assert_eq!(
            report,
            CheckReport {
                posts: 2,
                drafts: 1,
                images: 1,
                unresolved: vec![("a".to_string(), "/src/images/dog.png".to_string())],
            }
        );
        assert_eq!(report.published(DraftPolicy::Exclude), 1);
        assert_eq!(report.published(DraftPolicy::Include), 2);
    }

    #[test]
    fn test_check_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_png(&root.join("src/images/cat.png"), 1, 1);
        write_post(root, "a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n![](../images/cat.png)");

        run_check(&site(root)).unwrap();
        assert!(!root.join("dist").exists());
    }

    #[test]
    fn test_inspect_fails_on_duplicate_slug() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_post(root, "Hello.md", "---\ntitle: A\ndate: 2024-01-01\n---\n");
        write_post(root, "hello.markdown", "---\ntitle: B\ndate: 2024-01-02\n---\n");

        let err = inspect(&site(root)).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate slug"));
    }
}
