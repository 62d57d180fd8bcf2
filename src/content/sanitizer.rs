//! Allowlist HTML sanitizer.
//!
//! Feed HTML is injected into the page as raw markup, so this is the XSS
//! boundary. The input is parsed into a DOM and re-serialized keeping only
//! what the [`SanitizePolicy`] allows; nothing is filtered with regexes.

use std::collections::HashSet;

use scraper::{ElementRef, Node};

use super::html::{
    escape_text, is_void, parse_fragment, write_end_tag, write_start_tag,
};

const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "audio", "b", "blockquote", "br", "button", "caption", "cite", "code", "col",
    "colgroup", "dd", "del", "details", "div", "dl", "dt", "em", "figcaption", "figure", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "input", "ins", "kbd", "label", "li",
    "mark", "ol", "p", "picture", "pre", "q", "s", "small", "source", "span", "strong", "sub",
    "summary", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "time", "tr", "u", "ul",
    "video",
];

const DEFAULT_DROPPED_WITH_CONTENT: &[&str] = &[
    "applet", "base", "embed", "frame", "frameset", "iframe", "link", "math", "meta", "noembed",
    "noframes", "noscript", "object", "option", "plaintext", "script", "select", "style", "svg",
    "template", "textarea", "title", "xmp",
];

const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &[
    "alt", "class", "colspan", "controls", "datetime", "height", "href", "id", "lang", "loading",
    "name", "placeholder", "poster", "rowspan", "sizes", "src", "srcset", "start", "target",
    "title", "type", "value", "width",
];

const DEFAULT_URL_ATTRIBUTES: &[&str] = &["action", "cite", "formaction", "href", "poster", "src", "srcset"];

const DEFAULT_ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

fn to_set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// What survives sanitization. Passed explicitly to [`sanitize`]; there is no
/// process-wide sanitizer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    /// Elements kept (with filtered attributes).
    pub allowed_tags: HashSet<String>,
    /// Elements removed together with everything inside them. Any other
    /// element that is not allowed is unwrapped: its children are kept.
    pub dropped_with_content: HashSet<String>,
    pub allowed_attributes: HashSet<String>,
    /// Attributes whose value is a URL and must pass the scheme check.
    pub url_attributes: HashSet<String>,
    /// URL schemes accepted in `url_attributes`. Relative URLs are always accepted.
    pub allowed_schemes: HashSet<String>,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            allowed_tags: to_set(DEFAULT_ALLOWED_TAGS),
            dropped_with_content: to_set(DEFAULT_DROPPED_WITH_CONTENT),
            allowed_attributes: to_set(DEFAULT_ALLOWED_ATTRIBUTES),
            url_attributes: to_set(DEFAULT_URL_ATTRIBUTES),
            allowed_schemes: to_set(DEFAULT_ALLOWED_SCHEMES),
        }
    }
}

impl SanitizePolicy {
    pub fn allow_tag(mut self, tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        self.dropped_with_content.remove(&tag);
        self.allowed_tags.insert(tag);
        self
    }

    pub fn deny_tag(mut self, tag: &str) -> Self {
        self.allowed_tags.remove(&tag.to_ascii_lowercase());
        self
    }

    pub fn allow_attribute(mut self, attribute: &str) -> Self {
        self.allowed_attributes.insert(attribute.to_ascii_lowercase());
        self
    }

    pub fn allow_scheme(mut self, scheme: &str) -> Self {
        self.allowed_schemes.insert(scheme.to_ascii_lowercase());
        self
    }

    fn allows_attribute(&self, name: &str, value: &str) -> bool {
        let name = name.to_ascii_lowercase();
        // Event handlers are never allowed, whatever the allowlist says.
        if name.starts_with("on") || !self.allowed_attributes.contains(&name) {
            return false;
        }
        if !self.url_attributes.contains(&name) {
            return true;
        }
        if name == "srcset" {
            return value
                .split(',')
                .filter_map(|candidate| candidate.split_whitespace().next())
                .all(|url| self.allows_url(url));
        }
        self.allows_url(value)
    }

    /// Scheme check on a URL value as the browser would see it: ASCII
    /// whitespace and control characters are ignored and case is folded.
    pub fn allows_url(&self, value: &str) -> bool {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
            .collect::<String>()
            .to_ascii_lowercase();

        match url_scheme(&normalized) {
            Some(scheme) => self.allowed_schemes.contains(scheme),
            None => true,
        }
    }
}

/// The scheme of `url`, if it has one. A colon after the first `/`, `?` or
/// `#` belongs to the path, query or fragment of a relative URL.
fn url_scheme(url: &str) -> Option<&str> {
    let colon = url.find(':')?;
    let delimiter = url.find(['/', '?', '#']).unwrap_or(url.len());
    if colon < delimiter {
        Some(&url[..colon])
    } else {
        None
    }
}

/// Sanitize an HTML fragment. The result contains no script elements, no
/// `on*` attributes and no URL attribute with a disallowed scheme.
/// Sanitizing the output again yields identical bytes.
pub fn sanitize(html: &str, policy: &SanitizePolicy) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let fragment = parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_sanitized_children(fragment.root_element(), policy, &mut out);
    out
}

fn write_sanitized_children(parent: ElementRef<'_>, policy: &SanitizePolicy, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => escape_text(text, out),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    write_sanitized_element(element, policy, out);
                }
            }
            // Comments, doctypes and processing instructions
            _ => {}
        }
    }
}

fn write_sanitized_element(element: ElementRef<'_>, policy: &SanitizePolicy, out: &mut String) {
    let name = element.value().name().to_ascii_lowercase();

    if policy.dropped_with_content.contains(&name) {
        return;
    }

    if !policy.allowed_tags.contains(&name) {
        write_sanitized_children(element, policy, out);
        return;
    }

    let attrs = element
        .value()
        .attrs()
        .filter(|(key, value)| policy.allows_attribute(key, value));
    write_start_tag(&name, attrs, out);

    if is_void(&name) {
        return;
    }

    let body_start = out.len();
    write_sanitized_children(element, policy, out);
    write_end_tag(&name, body_start, out);
}
