//! Thin helpers over `roxmltree` for reading RSS documents.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use roxmltree::{Document, Node, ParsingOptions};

use crate::errors::{FeedError, FeedResult};

/// Namespaces RSS elements may live in besides none at all (RSS 0.9x/2.0).
const RSS_NAMESPACES: &[&str] = &[
    "http://purl.org/rss/1.0/",
    "http://my.netscape.com/rdf/simple/0.9/",
    "http://backend.userland.com/rss2",
];

const PREDEFINED_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[0-9]+;|#[xX][0-9a-fA-F]+;|([A-Za-z_:][A-Za-z0-9_.:-]*);)?")
        .expect("entity reference pattern is valid")
});

static DECLARED_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!ENTITY\s+([A-Za-z_:][A-Za-z0-9_.:-]*)").expect("entity declaration pattern is valid")
});

/// Escape `&` wherever it does not start a reference the parser can resolve:
/// bare ampersands and HTML-only names such as `&hellip;`. Predefined,
/// numeric and DTD-declared references are left alone, as is CDATA.
pub fn repair_entities(xml: &str) -> Cow<'_, str> {
    if !xml.contains('&') {
        return Cow::Borrowed(xml);
    }

    let declared: HashSet<&str> = DECLARED_ENTITY
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;
    while let Some(start) = rest.find(CDATA_OPEN) {
        out.push_str(&escape_stray_references(&rest[..start], &declared));
        let section = &rest[start..];
        let end = section
            .find(CDATA_CLOSE)
            .map(|idx| idx + CDATA_CLOSE.len())
            .unwrap_or(section.len());
        out.push_str(&section[..end]);
        rest = &section[end..];
    }
    out.push_str(&escape_stray_references(rest, &declared));

    if out == xml {
        Cow::Borrowed(xml)
    } else {
        Cow::Owned(out)
    }
}

fn escape_stray_references<'a>(text: &'a str, declared: &HashSet<&str>) -> Cow<'a, str> {
    REFERENCE.replace_all(text, |caps: &Captures<'_>| {
        let whole = &caps[0];
        match caps.get(1) {
            _ if whole == "&" => "&amp;".to_string(),
            Some(name)
                if !PREDEFINED_ENTITIES.contains(&name.as_str())
                    && !declared.contains(name.as_str()) =>
            {
                format!("&amp;{};", name.as_str())
            }
            _ => whole.to_string(),
        }
    })
}

/// Parse an XML document. Syntax errors become [`FeedError::InvalidFeed`].
pub fn parse(xml: &str) -> FeedResult<Document<'_>> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    Document::parse_with_options(xml, options)
        .map_err(|e| FeedError::InvalidFeed(format!("XML parse error: {}", e)))
}

/// An element named `local_name` in no namespace or an RSS namespace, so
/// that e.g. `itunes:title` never stands in for `title`.
pub fn is_rss_element(node: Node<'_, '_>, local_name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local_name
        && node
            .tag_name()
            .namespace()
            .map_or(true, |ns| RSS_NAMESPACES.contains(&ns))
}

/// First RSS element named `local_name` anywhere in the document.
pub fn find_rss<'a, 'input>(doc: &'a Document<'input>, local_name: &str) -> Option<Node<'a, 'input>> {
    doc.descendants().find(|node| is_rss_element(*node, local_name))
}

/// First direct child that is an RSS element named `local_name`.
pub fn rss_child<'a, 'input>(node: Node<'a, 'input>, local_name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_rss_element(*child, local_name))
}

/// Concatenated text and CDATA of `node` and its descendants.
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Trimmed text of the direct child `local_name`, or "" when absent.
pub fn child_text(node: Node<'_, '_>, local_name: &str) -> String {
    rss_child(node, local_name)
        .map(|child| text_content(child).trim().to_string())
        .unwrap_or_default()
}
