//! Removal of Substack's injected subscription prompts.
//!
//! Runs on sanitized HTML and only ever removes: whole widget elements, whole
//! elements that contain nothing but the subscribe sentence, or the sentence
//! itself from inside a longer text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node};

use super::html::{escape_text, is_void, parse_fragment, text_content, write_end_tag, write_start_tag};

const SUBSCRIBE_PHRASE: &str = r"(?i)thanks\s+for\s+reading(?:\s+[^!<>]{1,120}?)?!\s*subscribe\s+for\s+free\s+to\s+receive\s+new\s+posts\s+and\s+support\s+my\s+work\.?";

/// Elements removed whole when their only content is the subscribe sentence.
const PHRASE_CONTAINERS: &[&str] = &["p", "div", "span"];

/// Markup that may wrap parts of the sentence without counting as other content.
const TEXT_WRAPPERS: &[&str] = &[
    "a", "b", "code", "em", "i", "mark", "s", "small", "span", "strong", "sub", "sup", "u",
];

static PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SUBSCRIBE_PHRASE).expect("subscribe phrase pattern is valid"));

static SOLE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(?:{})\s*$", SUBSCRIBE_PHRASE))
        .expect("subscribe phrase pattern is valid")
});

/// An element identified by its tag name and one of its classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSignature {
    pub tag: String,
    pub class: String,
}

impl WidgetSignature {
    pub fn new(tag: &str, class: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            class: class.to_string(),
        }
    }

    fn matches(&self, element: ElementRef<'_>) -> bool {
        let el = element.value();
        el.name().eq_ignore_ascii_case(&self.tag) && el.classes().any(|c| c == self.class)
    }
}

#[derive(Debug, Clone)]
pub struct BoilerplateRules {
    pub widget_signatures: Vec<WidgetSignature>,
    phrase: Regex,
    sole_phrase: Regex,
}

impl Default for BoilerplateRules {
    fn default() -> Self {
        Self {
            widget_signatures: vec![
                WidgetSignature::new("form", "subscription-widget-subscribe"),
                WidgetSignature::new("div", "subscription-widget-wrap"),
            ],
            phrase: PHRASE.clone(),
            sole_phrase: SOLE_PHRASE.clone(),
        }
    }
}

impl BoilerplateRules {
    /// Rules with a custom promotional sentence pattern.
    pub fn with_phrase(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.phrase = Regex::new(pattern)?;
        self.sole_phrase = Regex::new(&format!(r"^\s*(?:{})\s*$", pattern))?;
        Ok(self)
    }

    pub fn with_widget(mut self, signature: WidgetSignature) -> Self {
        self.widget_signatures.push(signature);
        self
    }

    fn is_widget(&self, element: ElementRef<'_>) -> bool {
        self.widget_signatures.iter().any(|sig| sig.matches(element))
    }

    /// Containers holding nothing but the sentence. Anything else inside, such
    /// as an image or a line break, keeps the element; only the text is cut.
    fn is_phrase_only(&self, element: ElementRef<'_>) -> bool {
        PHRASE_CONTAINERS.contains(&element.value().name())
            && element
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .all(|el| TEXT_WRAPPERS.contains(&el.value().name()))
            && self.sole_phrase.is_match(&text_content(element))
    }
}

pub fn strip_boilerplate(html: &str, rules: &BoilerplateRules) -> String {
    if html.is_empty() {
        return String::new();
    }

    let fragment = parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_stripped_children(fragment.root_element(), rules, &mut out);
    out
}

fn write_stripped_children(parent: ElementRef<'_>, rules: &BoilerplateRules, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => {
                let kept = rules.phrase.replace_all(text, "");
                escape_text(&kept, out);
            }
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(child) else {
                    continue;
                };
                if rules.is_widget(element) || rules.is_phrase_only(element) {
                    tracing::trace!(tag = element.value().name(), "dropping subscription boilerplate");
                    continue;
                }

                let name = element.value().name();
                write_start_tag(name, element.value().attrs(), out);
                if is_void(name) {
                    continue;
                }
                let body_start = out.len();
                write_stripped_children(element, rules, out);
                write_end_tag(name, body_start, out);
            }
            _ => {}
        }
    }
}
