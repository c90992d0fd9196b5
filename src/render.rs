//! Renderer contracts and plain-text XML implementations.
//!
//! Renderers are stateless collaborators: a stream asks them for opening
//! markup, one fragment per entry, and closing markup, and treats every
//! return value as an opaque byte-measurable string. A single renderer
//! instance can back any number of streams.

use crate::sitemap::Sitemap;
use crate::url::Url;
use std::borrow::Cow;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Produces the markup fragments of one sitemap document.
pub trait SitemapRender {
    /// Opening markup written once at stream open.
    fn start(&self) -> String;

    /// Closing markup written once at stream close.
    fn end(&self) -> String;

    /// Markup for one URL entry.
    fn url(&self, url: &Url) -> String;
}

/// Produces the markup fragments of one sitemap index document.
pub trait SitemapIndexRender {
    fn start(&self) -> String;

    fn end(&self) -> String;

    /// Markup for one child-sitemap pointer.
    fn sitemap(&self, sitemap: &Sitemap) -> String;
}

/// Escape the five XML-reserved characters in element text.
fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// String-concatenation renderer for sitemap documents.
///
/// Produces protocol-conformant XML without an XML library; locations
/// are escaped, optional fields are omitted when absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSitemapRender;

impl SitemapRender for PlainTextSitemapRender {
    fn start(&self) -> String {
        format!("{XML_DECLARATION}<urlset xmlns=\"{SITEMAP_NAMESPACE}\">")
    }

    fn end(&self) -> String {
        String::from("</urlset>")
    }

    fn url(&self, url: &Url) -> String {
        let mut fragment = String::with_capacity(64);
        fragment.push_str("<url><loc>");
        fragment.push_str(&escape_xml(url.location()));
        fragment.push_str("</loc>");
        if let Some(last_modified) = url.last_modified() {
            fragment.push_str("<lastmod>");
            fragment.push_str(&last_modified.to_rfc3339());
            fragment.push_str("</lastmod>");
        }
        if let Some(change_frequency) = url.change_frequency() {
            fragment.push_str("<changefreq>");
            fragment.push_str(change_frequency.as_str());
            fragment.push_str("</changefreq>");
        }
        if let Some(priority) = url.priority() {
            fragment.push_str("<priority>");
            fragment.push_str(ryu::Buffer::new().format(priority));
            fragment.push_str("</priority>");
        }
        fragment.push_str("</url>");
        fragment
    }
}

/// String-concatenation renderer for sitemap index documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSitemapIndexRender;

impl SitemapIndexRender for PlainTextSitemapIndexRender {
    fn start(&self) -> String {
        format!("{XML_DECLARATION}<sitemapindex xmlns=\"{SITEMAP_NAMESPACE}\">")
    }

    fn end(&self) -> String {
        String::from("</sitemapindex>")
    }

    fn sitemap(&self, sitemap: &Sitemap) -> String {
        let mut fragment = String::with_capacity(64);
        fragment.push_str("<sitemap><loc>");
        fragment.push_str(&escape_xml(sitemap.location()));
        fragment.push_str("</loc>");
        if let Some(last_modified) = sitemap.last_modified() {
            fragment.push_str("<lastmod>");
            fragment.push_str(&last_modified.to_rfc3339());
            fragment.push_str("</lastmod>");
        }
        fragment.push_str("</sitemap>");
        fragment
    }
}
