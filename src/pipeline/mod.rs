//! Post body → feed-ready HTML.
//!
//! ```text
//! body ──▶ MarkdownRenderer ──▶ ImageResolver ──▶ Sanitizer ──▶ html
//! ```
//!
//! Every stage is built once and shared by all posts of a run.

pub mod images;
pub mod markdown;
pub mod sanitize;

pub use images::{ImageResolver, image_keys};
pub use markdown::{MarkdownOptions, MarkdownRenderer};
pub use sanitize::{DEFAULT_TAGS, FORBIDDEN_TAGS, SanitizePolicy, Sanitizer};

use crate::asset::AssetRegistry;

/// The three content stages bound to one registry.
#[derive(Debug)]
pub struct ContentPipeline<'a, R> {
    renderer: MarkdownRenderer,
    resolver: ImageResolver,
    sanitizer: Sanitizer<'a>,
    registry: &'a R,
}

impl<'a, R: AssetRegistry> ContentPipeline<'a, R> {
    pub fn new(
        renderer: MarkdownRenderer,
        resolver: ImageResolver,
        sanitizer: Sanitizer<'a>,
        registry: &'a R,
    ) -> Self {
        Self {
            renderer,
            resolver,
            sanitizer,
            registry,
        }
    }

    /// Render, resolve images, sanitize.
    pub async fn transform(&self, body: &str) -> String {
        let html = self.renderer.render(body);
        let html = self.resolver.resolve_images(&html, self.registry).await;
        self.sanitizer.sanitize(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::StaticAssetRegistry;
    use url::Url;

    fn pipeline<'a>(
        policy: &'a SanitizePolicy,
        registry: &'a StaticAssetRegistry,
    ) -> ContentPipeline<'a, StaticAssetRegistry> {
        ContentPipeline::new(
            MarkdownRenderer::default(),
            ImageResolver::new(Url::parse("https://example.com").unwrap(), "/src/"),
            Sanitizer::new(policy),
            registry,
        )
    }

    #[tokio::test]
    async fn test_transform_end_to_end() {
        let policy = SanitizePolicy::default();
        let registry =
            StaticAssetRegistry::new().with("/src/images/cat.png", "img/cat.optimized.png");

        let html = pipeline(&policy, &registry)
            .transform("# Hi\n![pic](../images/cat.png)")
            .await;
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains(r#"src="https://example.com/img/cat.optimized.png""#));
    }

    #[tokio::test]
    async fn test_transform_strips_raw_html_attacks() {
        let policy = SanitizePolicy::default();
        let registry = StaticAssetRegistry::new();

        let html = pipeline(&policy, &registry)
            .transform("Hello\n\n<script>alert(1)</script>\n\n<img src=\"x.png\" onerror=\"alert(1)\">\n\n[x](javascript:alert(1))")
            .await;
        assert!(!html.contains("<script"));
        assert!(!html.contains("onerror"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r#"<img src="x.png">"#));
    }

    #[tokio::test]
    async fn test_raw_link_query_unchanged_next_to_resolved_image() {
        let policy = SanitizePolicy::default();
        let registry = StaticAssetRegistry::new().with("/src/images/cat.png", "/img/cat.png");
        let body = "<a href=\"https://ex.com/?a=1&b=2\">link</a>\n\n![cat](../images/cat.png)";

        let with_image = pipeline(&policy, &registry).transform(body).await;
        let without_image = pipeline(&policy, &StaticAssetRegistry::new())
            .transform(body)
            .await;

        assert!(with_image.contains(r#"src="https://example.com/img/cat.png""#));
        assert!(!with_image.contains("b=2;"));
        assert_eq!(
            with_image.replace("https://example.com/img/cat.png", "../images/cat.png"),
            without_image
        );
    }
}
