use scraper::{ElementRef, Node};

use super::html::{escape_text, is_void, parse_fragment, text_content, write_end_tag, write_start_tag};

pub const ELLIPSIS: &str = "...";

/// A word-bounded rendering of an article body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub html: String,
    pub is_truncated: bool,
}

/// Position of the cut in the fragment's concatenated text.
struct Cut {
    at: usize,
    consumed: usize,
    done: bool,
}

/// Cut `html` down to its first `limit` words.
///
/// Words are counted over the fragment's plain text, the concatenation of all
/// its text nodes, so a word may run across element boundaries. Input with at
/// most `limit` words is returned unchanged. Otherwise the fragment is
/// rewritten in document order up to the end of the `limit`-th word, `...` is
/// appended inside the text node holding that word's last character, and
/// everything after it is left out while all open elements are still closed.
pub fn truncate_html(html: &str, limit: usize) -> Preview {
    let fragment = parse_fragment(html);
    let Some(at) = cut_offset(&text_content(fragment.root_element()), limit) else {
        return Preview {
            html: html.to_string(),
            is_truncated: false,
        };
    };

    let mut cut = Cut {
        at,
        consumed: 0,
        done: false,
    };
    let mut out = String::with_capacity(html.len().min(limit.saturating_mul(16)));
    write_bounded_children(fragment.root_element(), &mut cut, &mut out);

    Preview {
        html: out,
        is_truncated: true,
    }
}

/// Byte offset just past the `limit`-th word of `text`, or `None` when `text`
/// has no more than `limit` words.
fn cut_offset(text: &str, limit: usize) -> Option<usize> {
    let mut words = 0;
    let mut word_end = 0;
    let mut in_word = false;

    for (idx, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_word && words == limit {
                word_end = idx;
            }
            in_word = false;
        } else if !in_word {
            if words == limit {
                return Some(word_end);
            }
            in_word = true;
            words += 1;
        }
    }
    None
}

fn write_bounded_children(parent: ElementRef<'_>, cut: &mut Cut, out: &mut String) {
    for child in parent.children() {
        if cut.done {
            break;
        }
        match child.value() {
            Node::Text(text) => write_bounded_text(text, cut, out),
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = element.value().name();
                write_start_tag(name, element.value().attrs(), out);
                if is_void(name) {
                    continue;
                }
                let body_start = out.len();
                write_bounded_children(element, cut, out);
                write_end_tag(name, body_start, out);
            }
            _ => {}
        }
    }
}

fn write_bounded_text(text: &str, cut: &mut Cut, out: &mut String) {
    let end = cut.consumed + text.len();
    if end < cut.at {
        cut.consumed = end;
        escape_text(text, out);
        return;
    }

    // Offsets come from the same text nodes, so this is a char boundary.
    escape_text(&text[..cut.at - cut.consumed], out);
    out.push_str(ELLIPSIS);
    cut.consumed = cut.at;
    cut.done = true;
}
