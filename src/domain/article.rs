use serde::{Deserialize, Serialize};

/// One post from the feed, after the content stages have run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Raw date string as published (RFC 2822 or ISO 8601), never parsed here.
    pub pub_date: String,
    pub guid: String,
    /// Sanitized, boilerplate-free HTML body.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_truncated: Option<bool>,
    /// Raw `<description>` text; a plain-text teaser that must not be rendered as HTML.
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FeedItem {
    pub fn new(title: String, link: String) -> Self {
        Self {
            title,
            link,
            ..Self::default()
        }
    }

    pub fn with_pub_date(mut self, pub_date: String) -> Self {
        self.pub_date = pub_date;
        self
    }

    pub fn with_guid(mut self, guid: String) -> Self {
        self.guid = guid;
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = content;
        self
    }

    pub fn with_preview(mut self, preview_content: String, is_truncated: bool) -> Self {
        self.preview_content = Some(preview_content);
        self.is_truncated = Some(is_truncated);
        self
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}
