use serde::Serialize;

use super::{FeedDocument, FeedItem};

pub const DEFAULT_TITLE: &str = "Home";
pub const DEFAULT_DESCRIPTION: &str =
    "Research, analysis, and discourse on anticolonial thought, philosophy, and technology.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub published_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Page-level metadata for the home page, derived from the hero article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<TwitterCard>,
}

impl PageMetadata {
    pub fn from_article(article: &FeedItem) -> Self {
        let images: Vec<String> = article.image.iter().cloned().collect();

        Self {
            title: article.title.clone(),
            description: article.summary.clone(),
            open_graph: Some(OpenGraph {
                title: article.title.clone(),
                description: article.summary.clone(),
                images: images.clone(),
                kind: "article".to_string(),
                published_time: article.pub_date.clone(),
            }),
            twitter: Some(TwitterCard {
                card: "summary_large_image".to_string(),
                title: article.title.clone(),
                description: article.summary.clone(),
                images,
            }),
        }
    }

    /// Metadata from the feed's hero article, or the site defaults when the
    /// feed is unavailable or empty.
    pub fn from_feed(feed: Option<&FeedDocument>) -> Self {
        feed.and_then(FeedDocument::hero)
            .map(Self::from_article)
            .unwrap_or_default()
    }
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            open_graph: None,
            twitter: None,
        }
    }
}
