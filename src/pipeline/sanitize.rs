//! Allow-list HTML sanitizer for feed content.
//!
//! The default policy is the conventional conservative tag set (block,
//! inline and table markup) plus `img`. Disallowed elements are unwrapped,
//! except the non-text ones below whose content is dropped entirely.

use ammonia::Builder;
use std::collections::{HashMap, HashSet};

/// Tags that may appear in feed content unless configured otherwise.
pub const DEFAULT_TAGS: &[&str] = &[
    // sections and blocks
    "address", "article", "aside", "footer", "header", "h1", "h2", "h3", "h4", "h5", "h6",
    "hgroup", "main", "nav", "section", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "hr", "li", "ol", "p", "pre", "ul",
    // inline
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em", "i", "kbd",
    "mark", "q", "rb", "rp", "rt", "rtc", "ruby", "s", "samp", "small", "span", "strong", "sub",
    "sup", "time", "u", "var", "wbr",
    // tables
    "caption", "col", "colgroup", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
    // media
    "img",
];

/// Tags that can never be allow-listed.
pub const FORBIDDEN_TAGS: &[&str] = &["script", "style"];

/// Disallowed tags removed together with their content.
const NON_TEXT_TAGS: &[&str] = &["script", "style", "textarea", "option", "noscript"];

const A_ATTRIBUTES: &[&str] = &["href", "name", "target"];
const IMG_ATTRIBUTES: &[&str] = &["src", "srcset", "alt", "title", "width", "height", "loading"];

/// URL schemes allowed in `href`/`src`. Relative URLs always pass.
const URL_SCHEMES: &[&str] = &["http", "https", "ftp", "mailto", "tel"];

/// Which markup survives sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    tags: Vec<String>,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl SanitizePolicy {
    /// Default policy plus `extra` tags. Forbidden tags are ignored.
    pub fn with_extra_tags<S: AsRef<str>>(extra: &[S]) -> Self {
        let mut policy = Self::default();
        for tag in extra {
            let tag = tag.as_ref().trim().to_ascii_lowercase();
            if tag.is_empty() || FORBIDDEN_TAGS.contains(&tag.as_str()) || policy.allows(&tag) {
                continue;
            }
            policy.tags.push(tag);
        }
        policy
    }

    pub fn allows(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Sanitizer configured from a [`SanitizePolicy`].
pub struct Sanitizer<'a> {
    builder: Builder<'a>,
}

impl<'a> Sanitizer<'a> {
    pub fn new(policy: &'a SanitizePolicy) -> Self {
        let tags: HashSet<&str> = policy
            .tags
            .iter()
            .map(String::as_str)
            .filter(|t| !FORBIDDEN_TAGS.contains(t))
            .collect();
        let clean_content: HashSet<&str> = NON_TEXT_TAGS
            .iter()
            .copied()
            .filter(|t| !tags.contains(t))
            .collect();
        let tag_attributes = HashMap::from([
            ("a", A_ATTRIBUTES.iter().copied().collect::<HashSet<_>>()),
            ("img", IMG_ATTRIBUTES.iter().copied().collect()),
        ]);

        let mut builder = Builder::default();
        builder
            .tags(tags)
            .clean_content_tags(clean_content)
            .tag_attributes(tag_attributes)
            .generic_attributes(HashSet::new())
            .url_schemes(URL_SCHEMES.iter().copied().collect())
            .link_rel(None)
            .strip_comments(true);

        Self { builder }
    }

    /// Sanitize `html`. Deterministic and idempotent; never fails.
    pub fn sanitize(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl std::fmt::Debug for Sanitizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(html: &str) -> String {
        let policy = SanitizePolicy::default();
        Sanitizer::new(&policy).sanitize(html)
    }

    #[test]
    fn test_strips_script_onerror_and_javascript() {
        let out = sanitize(
            r#"<p>hi<script>alert(1)</script><img src="x.png" onerror="alert(1)"><a href="javascript:alert(1)">x</a></p>"#,
        );
        assert!(!out.contains("script"));
        assert!(!out.contains("alert"));
        assert!(!out.contains("onerror"));
        assert!(!out.contains("javascript:"));
        assert!(out.contains(r#"<img src="x.png">"#));
        assert!(out.contains("<a>x</a>"));
    }

    #[test]
    fn test_drops_style_content() {
        let out = sanitize("<style>p { color: red }</style><p>text</p>");
        assert_eq!(out, "<p>text</p>");
    }

    #[test]
    fn test_unwraps_disallowed_elements() {
        let out = sanitize(r#"<div><font color="red">kept text</font><iframe src="https://x"></iframe></div>"#);
        assert_eq!(out, "<div>kept text</div>");
    }

    #[test]
    fn test_keeps_allowed_markup() {
        let html = r#"<h1>Title</h1><p>Some <strong>bold</strong> and <a href="https://example.com" target="_blank">a link</a>.</p><img src="https://example.com/img/cat.png" alt="cat" width="10" height="20">"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn test_removes_unlisted_attributes() {
        let out = sanitize(r#"<p class="lead" style="color:red" id="x">text</p><a href="/rel" rel="me">r</a>"#);
        assert_eq!(out, r#"<p>text</p><a href="/rel">r</a>"#);
    }

    #[test]
    fn test_allowed_schemes() {
        let out = sanitize(r#"<a href="mailto:me@example.com">m</a><a href="tel:+123">t</a><a href="data:text/html,x">d</a>"#);
        assert!(out.contains(r#"href="mailto:me@example.com""#));
        assert!(out.contains(r#"href="tel:+123""#));
        assert!(!out.contains("data:"));
    }

    #[test]
    fn test_idempotent() {
        let html = r#"<p>a &amp; b <em>c</em><img src="https://example.com/a.png" alt="x &quot;y&quot;"><span onclick="x()">s</span></p><pre><code>let x = 1 &lt; 2;
</code></pre>"#;
        let once = sanitize(html);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_extra_tags() {
        let policy = SanitizePolicy::with_extra_tags(&["details", "summary", "script", " STYLE "]);
        assert!(policy.allows("details"));
        assert!(!policy.allows("script"));
        assert!(!policy.allows("style"));

        let out = Sanitizer::new(&policy)
            .sanitize("<details><summary>More</summary>body</details><script>x</script>");
        assert_eq!(out, "<details><summary>More</summary>body</details>");
    }

    #[test]
    fn test_extra_non_text_tag_keeps_content() {
        let policy = SanitizePolicy::with_extra_tags(&["noscript"]);
        let out = Sanitizer::new(&policy).sanitize("<noscript>fallback</noscript>");
        assert_eq!(out, "<noscript>fallback</noscript>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }
}
