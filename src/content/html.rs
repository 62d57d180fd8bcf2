//! HTML fragment helpers shared by the content stages.
//!
//! Every stage parses its input with `scraper`, walks the tree read-only and
//! writes a fresh serialization. Nothing mutates a parsed tree in place.

use scraper::{ElementRef, Html};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose first newline is swallowed by the HTML parser.
const LEADING_NEWLINE_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

pub fn parse_fragment(html: &str) -> Html {
    Html::parse_fragment(html)
}

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

pub fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Write `<name a="..." b="...">`. Attributes are emitted in name order so
/// the output does not depend on the parser's attribute storage.
pub fn write_start_tag<'a>(
    name: &str,
    attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    out: &mut String,
) {
    let mut attrs: Vec<(&str, &str)> = attrs.into_iter().collect();
    attrs.sort_by(|a, b| a.0.cmp(b.0));

    out.push('<');
    out.push_str(name);
    for (key, value) in attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_attribute(value, out);
        out.push('"');
    }
    out.push('>');
}

/// Close an element whose body was written starting at `body_start`.
pub fn write_end_tag(name: &str, body_start: usize, out: &mut String) {
    // Re-parsing would eat a leading newline, so double it to keep the text stable.
    if LEADING_NEWLINE_ELEMENTS.contains(&name) && out[body_start..].starts_with('\n') {
        out.insert(body_start, '\n');
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Concatenated text of an element's descendants (the DOM's textContent).
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}
