use std::sync::LazyLock;

use regex::Regex;

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("img pattern is valid")
});

/// `src` of the first `<img>` in raw (unsanitized) item HTML.
fn first_image_src(raw_html: &str) -> Option<String> {
    IMG_SRC
        .captures(raw_html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Featured image for an item: the enclosure URL when the feed provides one,
/// otherwise the first image in the content.
pub fn featured_image(enclosure_url: Option<&str>, raw_html: &str) -> Option<String> {
    enclosure_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .or_else(|| first_image_src(raw_html))
}
