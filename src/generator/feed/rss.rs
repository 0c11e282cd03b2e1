//! RSS 2.0 serialization.
//!
//! Emits the channel with an Atom self-link and one `<item>` per feed item
//! carrying the sanitized HTML as both `<description>` and
//! `<content:encoded>`.

use super::{FeedDocument, FeedError, FeedItem};
use crate::utils::path::route::canonical_link;
use rss::extension::atom::{AtomExtension, Link};
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder, validation::Validate};
use std::collections::BTreeMap;

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
const GENERATOR: &str = concat!("blogfeed ", env!("CARGO_PKG_VERSION"));

impl FeedDocument {
    /// Build the `rss` channel for this document.
    pub fn to_channel(&self) -> Channel {
        let items: Vec<_> = self.items.iter().map(|item| self.to_rss_item(item)).collect();

        let namespaces = BTreeMap::from([
            ("atom".to_string(), ATOM_NAMESPACE.to_string()),
            ("content".to_string(), CONTENT_NAMESPACE.to_string()),
        ]);

        let mut self_link = Link::default();
        self_link.set_href(self.self_link.clone());
        self_link.set_rel("self");
        self_link.set_mime_type(Some("application/rss+xml".to_string()));
        let mut atom = AtomExtension::default();
        atom.set_links(vec![self_link]);

        let language = (!self.language.trim().is_empty()).then(|| self.language.clone());

        ChannelBuilder::default()
            .namespaces(namespaces)
            .title(&self.title)
            .link(canonical_link(&self.site, "/", self.trailing_slash))
            .description(&self.description)
            .language(language)
            .generator(GENERATOR.to_string())
            .atom_ext(Some(atom))
            .items(items)
            .build()
    }

    fn to_rss_item(&self, item: &FeedItem) -> Item {
        let link = canonical_link(&self.site, &item.link, self.trailing_slash);

        ItemBuilder::default()
            .title(item.title.clone())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(item.description.clone())
            .content(item.content.clone())
            .pub_date(item.pub_date.map(|d| d.to_rfc2822()))
            .build()
    }

    /// Validate and serialize. Pretty-printed unless `minify`.
    pub fn to_xml(&self, minify: bool) -> Result<String, FeedError> {
        let channel = self.to_channel();
        channel.validate()?;

        let buf = if minify {
            channel.write_to(Vec::new())?
        } else {
            channel.pretty_write_to(Vec::new(), b' ', 2)?
        };
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;
    use url::Url;

    fn item(link: &str, content: &str, date: &str) -> FeedItem {
        FeedItem {
            title: "Hello World".into(),
            link: link.into(),
            description: content.into(),
            content: content.into(),
            pub_date: DateTimeUtc::parse(date),
        }
    }

    fn doc(items: Vec<FeedItem>) -> FeedDocument {
        FeedDocument {
            title: "Ethan Denny".into(),
            description: "Writing about my projects".into(),
            site: Url::parse("https://ethandenny.dev").unwrap(),
            language: "en-ca".into(),
            self_link: "https://ethandenny.dev/rss.xml".into(),
            trailing_slash: false,
            items,
        }
    }

    #[test]
    fn test_channel_header() {
        let xml = doc(vec![]).to_xml(false).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"version="2.0""#));
        assert!(xml.contains(r#"xmlns:atom="http://www.w3.org/2005/Atom""#));
        assert!(xml.contains("<title>Ethan Denny</title>"));
        assert!(xml.contains("<link>https://ethandenny.dev/</link>"));
        assert!(xml.contains("<language>en-ca</language>"));
        assert!(xml.contains("atom:link"));
        assert!(xml.contains(r#"href="https://ethandenny.dev/rss.xml""#));
        assert!(xml.contains(r#"rel="self""#));
        assert!(xml.contains(r#"type="application/rss+xml""#));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_item_fields() {
        let html = r#"<p>Hi <img src="https://ethandenny.dev/img/cat.png"></p>"#;
        let channel = doc(vec![item("/blog/hello-world/", html, "2024-01-01")]).to_channel();
        let rss_item = &channel.items()[0];

        assert_eq!(rss_item.title(), Some("Hello World"));
        assert_eq!(rss_item.link(), Some("https://ethandenny.dev/blog/hello-world"));
        let guid = rss_item.guid().unwrap();
        assert!(guid.is_permalink());
        assert_eq!(guid.value(), "https://ethandenny.dev/blog/hello-world");
        assert_eq!(rss_item.description(), Some(html));
        assert_eq!(rss_item.content(), Some(html));
        assert_eq!(rss_item.pub_date(), Some("Mon, 01 Jan 2024 00:00:00 GMT"));
    }

    #[test]
    fn test_trailing_slash_kept_when_enabled() {
        let mut feed = doc(vec![item("/blog/hello-world/", "<p>x</p>", "2024-01-01")]);
        feed.trailing_slash = true;

        let channel = feed.to_channel();
        assert_eq!(
            channel.items()[0].link(),
            Some("https://ethandenny.dev/blog/hello-world/")
        );
    }

    #[test]
    fn test_undated_item_has_no_pub_date() {
        let channel = doc(vec![item("/blog/x/", "<p>x</p>", "not a date")]).to_channel();
        assert_eq!(channel.items()[0].pub_date(), None);
        assert!(channel.validate().is_ok());
    }

    #[test]
    fn test_content_round_trips() {
        let html = "<p>a &amp; b</p>";
        let xml = doc(vec![item("/blog/x/", html, "2024-01-01")])
            .to_xml(false)
            .unwrap();
        assert!(xml.contains("<content:encoded>"));
        assert!(xml.contains(r#"xmlns:content="http://purl.org/rss/1.0/modules/content/""#));
        assert!(!xml.contains("<p>a &amp; b</p></description>"));

        let channel = Channel::read_from(xml.as_bytes()).unwrap();
        assert_eq!(channel.items()[0].description(), Some(html));
        assert_eq!(channel.items()[0].content(), Some(html));
    }

    #[test]
    fn test_minified_has_no_newlines() {
        let xml = doc(vec![item("/blog/x/", "<p>x</p>", "2024-01-01")])
            .to_xml(true)
            .unwrap();
        assert!(!xml.contains('\n'));
        assert!(xml.contains("<item>"));
    }

    #[test]
    fn test_output_parses_back() {
        let xml = doc(vec![
            item("/blog/a/", "<p>a</p>", "2024-01-01"),
            item("/blog/b/", "<p>b</p>", "2024-01-02"),
        ])
        .to_xml(false)
        .unwrap();

        let channel = Channel::read_from(xml.as_bytes()).unwrap();
        assert_eq!(channel.items().len(), 2);
        assert_eq!(channel.items()[1].link(), Some("https://ethandenny.dev/blog/b"));
        assert_eq!(
            channel.atom_ext().unwrap().links()[0].href(),
            "https://ethandenny.dev/rss.xml"
        );
    }
}
