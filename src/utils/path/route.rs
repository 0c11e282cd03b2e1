//! URL processing utilities.
//!
//! Provides consistent URL handling for feed output:
//! - Link type detection (external vs site-relative)
//! - Joining site-relative paths onto the site URL without double slashes
//! - Canonical item links with the trailing-slash policy applied

use url::Url;

/// Strip leading slash from a URL path
///
/// # Examples
/// ```ignore
/// assert_eq!(strip_leading_slash("/blog/post"), "blog/post");
/// assert_eq!(strip_leading_slash("blog/post"), "blog/post");
/// assert_eq!(strip_leading_slash("/"), "");
/// ```
#[inline]
pub fn strip_leading_slash(url: &str) -> &str {
    url.trim_start_matches('/')
}

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// Protocol-relative links (`//cdn.example.com/a.png`) count as external too.
///
/// # Examples
/// ```ignore
/// assert!(is_external_link("https://example.com"));
/// assert!(is_external_link("mailto:user@example.com"));
/// assert!(!is_external_link("/about"));
/// assert!(!is_external_link("./file.txt"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Join a site-relative path onto the site URL.
///
/// The site URL always ends up with exactly one `/` before `path`, so
/// `https://example.com` + `/img/cat.png` is `https://example.com/img/cat.png`.
pub fn site_join(site: &Url, path: &str) -> String {
    let base = site.as_str();
    let mut joined = String::with_capacity(base.len() + path.len() + 1);
    joined.push_str(base);
    if !joined.ends_with('/') {
        joined.push('/');
    }
    joined.push_str(strip_leading_slash(path));
    joined
}

/// Absolute link for a feed item.
///
/// External links are returned unchanged. With `trailing_slash = false`
/// trailing slashes of the path are dropped (`/blog/post/` becomes
/// `https://example.com/blog/post`).
pub fn canonical_link(site: &Url, link: &str, trailing_slash: bool) -> String {
    if is_external_link(link) {
        return link.to_string();
    }
    let path = if trailing_slash {
        link
    } else {
        link.trim_end_matches('/')
    };
    site_join(site, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_strip_leading_slash() {
        assert_eq!(strip_leading_slash("/blog/post"), "blog/post");
        assert_eq!(strip_leading_slash("blog/post"), "blog/post");
        assert_eq!(strip_leading_slash("//img/a.png"), "img/a.png");
        assert_eq!(strip_leading_slash("/"), "");
        assert_eq!(strip_leading_slash(""), "");
    }

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("http://example.com"));
        assert!(is_external_link("mailto:user@example.com"));
        assert!(is_external_link("data:image/png;base64,AAAA"));
        assert!(is_external_link("//cdn.example.com/cat.png"));
        assert!(!is_external_link("/about"));
        assert!(!is_external_link("./file.txt"));
        assert!(!is_external_link("../images/cat.png"));
        assert!(!is_external_link("#section"));
    }

    #[test]
    fn test_site_join_no_double_slash() {
        let base = site("https://example.com");
        assert_eq!(
            site_join(&base, "/img/cat.optimized.png"),
            "https://example.com/img/cat.optimized.png"
        );
        assert_eq!(
            site_join(&base, "img/cat.png"),
            "https://example.com/img/cat.png"
        );
        assert_eq!(site_join(&base, "rss.xml"), "https://example.com/rss.xml");
    }

    #[test]
    fn test_site_join_keeps_base_path() {
        let base = site("https://example.com/notes");
        assert_eq!(
            site_join(&base, "/rss.xml"),
            "https://example.com/notes/rss.xml"
        );
    }

    #[test]
    fn test_canonical_link_trailing_slash() {
        let base = site("https://example.com");
        assert_eq!(
            canonical_link(&base, "/blog/hello-world/", false),
            "https://example.com/blog/hello-world"
        );
        assert_eq!(
            canonical_link(&base, "/blog/hello-world/", true),
            "https://example.com/blog/hello-world/"
        );
        assert_eq!(
            canonical_link(&base, "https://other.dev/post", false),
            "https://other.dev/post"
        );
    }
}
