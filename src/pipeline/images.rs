//! Image reference resolution.
//!
//! Rewrites the `src` of every `<img>` in rendered HTML whose source is a
//! registered image to the absolute URL of its optimized asset. Sources
//! that miss the registry (or fail to optimize) are left exactly as
//! authored, and so is every byte outside the rewritten `src` values.

use crate::asset::AssetRegistry;
use crate::utils::html::unescape;
use crate::utils::path::route::{is_external_link, site_join, strip_leading_slash};
use crate::{debug, log};
use futures::future::join_all;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;
use url::Url;

/// Leading `../` and `./` segments of a relative source.
static RELATIVE_SEGMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\.\.?/)+").unwrap());

/// Map an image source to its registry key.
///
/// `../images/cat.png` with prefix `/src/` becomes `/src/images/cat.png`.
/// Returns `None` for sources that are never looked up: empty ones and
/// absolute URLs (with a scheme or protocol-relative).
pub fn normalize_image_key(src: &str, key_prefix: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || is_external_link(src) {
        return None;
    }

    let relative = strip_leading_slash(&RELATIVE_SEGMENTS.replace(src, "")).to_string();
    if relative.is_empty() {
        return None;
    }

    let mut key = String::with_capacity(key_prefix.len() + relative.len() + 1);
    key.push_str(key_prefix);
    if !key.ends_with('/') {
        key.push('/');
    }
    key.push_str(&relative);
    Some(key)
}

/// Distinct registry keys of all `<img>` sources, in document order.
pub fn image_keys(html: &str, key_prefix: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let scanned = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img[src]", |el| {
                if let Some(src) = el.get_attribute("src")
                    && let Some(key) = normalize_image_key(&unescape(&src), key_prefix)
                    && !keys.contains(&key)
                {
                    keys.push(key);
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    );

    if let Err(err) = scanned {
        log!("warning"; "cannot scan images: {}", err);
        return Vec::new();
    }
    keys
}

/// Rewrites image references against one site and key prefix.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    site: Url,
    key_prefix: String,
}

impl ImageResolver {
    pub fn new(site: Url, key_prefix: impl Into<String>) -> Self {
        Self {
            site,
            key_prefix: key_prefix.into(),
        }
    }

    /// Resolve every `<img>` in `html` through `registry`.
    ///
    /// Each distinct key is looked up once; all lookups complete before
    /// the document is written back out.
    pub async fn resolve_images<R: AssetRegistry>(&self, html: &str, registry: &R) -> String {
        let keys = image_keys(html, &self.key_prefix);
        if keys.is_empty() {
            return html.to_string();
        }

        let lookups = keys.iter().map(|key| registry.lookup(key));
        let results = join_all(lookups).await;

        let mut resolved: FxHashMap<String, String> = FxHashMap::default();
        for (key, result) in keys.into_iter().zip(results) {
            match result {
                Ok(Some(asset)) => {
                    let url = site_join(&self.site, &asset.src);
                    resolved.insert(key, url);
                }
                Ok(None) => debug!("images"; "no registered image for {}", key),
                Err(err) => log!("warning"; "image {} left unresolved: {:#}", key, anyhow::Error::from(err)),
            }
        }

        if resolved.is_empty() {
            return html.to_string();
        }
        self.rewrite(html, &resolved)
    }

    /// Swap resolved image sources into `html`. Only the `src` value of a
    /// resolved `<img>` changes; all other markup streams through as is.
    fn rewrite(&self, html: &str, resolved: &FxHashMap<String, String>) -> String {
        let rewritten = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("img[src]", |el| {
                    let url = el
                        .get_attribute("src")
                        .and_then(|src| normalize_image_key(&unescape(&src), &self.key_prefix))
                        .and_then(|key| resolved.get(&key));
                    if let Some(url) = url {
                        el.set_attribute("src", url)?;
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        );

        rewritten.unwrap_or_else(|err| {
            log!("warning"; "cannot rewrite images: {}", err);
            html.to_string()
        })
    }
}
