use serde::{Deserialize, Serialize};

use super::FeedItem;

/// A parsed feed, built fresh on every fetch and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    pub last_build_date: String,
    /// Source order is kept; feeds list newest first by convention.
    pub items: Vec<FeedItem>,
}

impl FeedDocument {
    pub fn new(title: String, description: String, last_build_date: String) -> Self {
        Self {
            title,
            description,
            last_build_date,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<FeedItem>) -> Self {
        self.items = items;
        self
    }

    /// The lead article: the first item in feed order.
    pub fn hero(&self) -> Option<&FeedItem> {
        self.items.first()
    }

    /// Up to `count` items following the hero.
    pub fn recent(&self, count: usize) -> &[FeedItem] {
        let start = self.items.len().min(1);
        let end = self.items.len().min(start + count);
        &self.items[start..end]
    }

    pub fn into_latest(self) -> Option<FeedItem> {
        self.items.into_iter().next()
    }
}
