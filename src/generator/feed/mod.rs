//! Feed assembly.
//!
//! Selects the posts that belong in the feed, runs each body through the
//! content pipeline and collects the results into a [`FeedDocument`].
//! Serialization lives in [`rss`].

pub mod rss;

use crate::asset::AssetRegistry;
use crate::config::{DraftPolicy, ItemOrder, SiteConfig};
use crate::content::Post;
use crate::logger::ProgressLine;
use crate::pipeline::{ContentPipeline, ImageResolver, MarkdownRenderer, SanitizePolicy, Sanitizer};
use crate::utils::{date::DateTimeUtc, path::route::site_join};
use crate::{debug, log};
use futures::future::join_all;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Feed generation errors.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("site URL is not set; item links and the feed self-link are derived from it")]
    MissingSite,

    #[error("RSS validation failed")]
    Validation(#[from] ::rss::validation::ValidationError),

    #[error("failed to serialize feed")]
    Xml(#[from] ::rss::Error),

    #[error("IO error when writing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Everything the assembler needs to know about the channel.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub title: String,
    pub description: String,
    /// Absolute site URL. Generation fails without it.
    pub site: Option<Url>,
    pub language: String,
    /// Site-relative path of the feed file (`rss.xml`)
    pub path: String,
    /// Site-relative prefix of item links (`/blog/`)
    pub permalink: String,
    /// Registry key prefix for relative image sources (`/src/`)
    pub key_prefix: String,
    pub drafts: DraftPolicy,
    pub order: ItemOrder,
    /// Keep trailing slashes on absolute item links
    pub trailing_slash: bool,
}

impl FeedConfig {
    pub fn from_site(config: &SiteConfig) -> Self {
        Self {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            site: config.site_url(),
            language: config.site.language.clone(),
            path: config
                .feed
                .path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            permalink: config.content.permalink.clone(),
            key_prefix: config.images.key_prefix.clone(),
            drafts: config.feed.drafts,
            order: config.feed.order,
            trailing_slash: config.feed.trailing_slash,
        }
    }

    /// Site-relative link of a post (always ends with `/`).
    pub fn post_link(&self, slug: &str) -> String {
        let prefix = self.permalink.trim_end_matches('/');
        format!("{prefix}/{slug}/")
    }
}

/// One published post, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    /// Site-relative, e.g. `/blog/hello-world/`
    pub link: String,
    /// Sanitized HTML
    pub description: String,
    /// Sanitized HTML (same as `description`)
    pub content: String,
    /// `None` when the post date does not parse
    pub pub_date: Option<DateTimeUtc>,
}

/// The assembled feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    pub site: Url,
    pub language: String,
    /// Absolute URL of the feed itself
    pub self_link: String,
    pub trailing_slash: bool,
    pub items: Vec<FeedItem>,
}

/// Assemble the feed for `posts`.
///
/// Fails before any post is processed when the site URL is unset. Asset
/// misses and optimization failures only leave image sources unresolved.
pub async fn build_feed<R: AssetRegistry>(
    posts: &[Post],
    config: &FeedConfig,
    registry: &R,
    policy: &SanitizePolicy,
) -> Result<FeedDocument, FeedError> {
    let site = config.site.clone().ok_or(FeedError::MissingSite)?;

    let selected = select_posts(posts, config.drafts, config.order);
    debug!("feed"; "{} of {} posts selected", selected.len(), posts.len());

    let pipeline = ContentPipeline::new(
        MarkdownRenderer::default(),
        ImageResolver::new(site.clone(), config.key_prefix.clone()),
        Sanitizer::new(policy),
        registry,
    );

    let progress = ProgressLine::new(&[("posts", selected.len())]);
    let items = {
        let (pipeline, progress) = (&pipeline, &progress);
        join_all(selected.iter().map(|post| async move {
            let html = pipeline.transform(&post.body).await;
            progress.inc("posts");
            to_item(post, config, html)
        }))
        .await
    };
    progress.finish();

    Ok(FeedDocument {
        title: config.title.clone(),
        description: config.description.clone(),
        self_link: site_join(&site, &config.path),
        site,
        language: config.language.clone(),
        trailing_slash: config.trailing_slash,
        items,
    })
}

/// Apply the draft policy and item order.
///
/// Sorting is stable; posts whose date does not parse go last.
fn select_posts(posts: &[Post], drafts: DraftPolicy, order: ItemOrder) -> Vec<&Post> {
    let mut selected: Vec<(Option<DateTimeUtc>, &Post)> = posts
        .iter()
        .filter(|post| drafts == DraftPolicy::Include || !post.meta.draft)
        .map(|post| (DateTimeUtc::parse(&post.meta.date), post))
        .collect();

    match order {
        ItemOrder::Collection => {}
        ItemOrder::Newest => selected.sort_by(|a, b| by_date(a.0, b.0, |x, y| y.cmp(x))),
        ItemOrder::Oldest => selected.sort_by(|a, b| by_date(a.0, b.0, |x, y| x.cmp(y))),
    }

    selected.into_iter().map(|(_, post)| post).collect()
}

fn by_date(
    a: Option<DateTimeUtc>,
    b: Option<DateTimeUtc>,
    cmp: impl Fn(&DateTimeUtc, &DateTimeUtc) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Explicit metadata mapping: title → title, date → pubDate.
fn to_item(post: &Post, config: &FeedConfig, html: String) -> FeedItem {
    let pub_date = DateTimeUtc::parse(&post.meta.date);
    if pub_date.is_none() {
        log!("warning"; "post `{}` has an unparseable date '{}', pubDate omitted", post.slug, post.meta.date);
    }

    FeedItem {
        title: post.meta.title.clone(),
        link: config.post_link(&post.slug),
        description: html.clone(),
        content: html,
        pub_date,
    }
}

/// Serialize `doc` and write it to `path`, creating parent directories.
pub fn write_feed(doc: &FeedDocument, path: &Path, minify: bool) -> Result<(), FeedError> {
    let xml = doc.to_xml(minify)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| FeedError::Io(parent.to_path_buf(), err))?;
    }
    std::fs::write(path, xml).map_err(|err| FeedError::Io(path.to_path_buf(), err))?;

    Ok(())
}
