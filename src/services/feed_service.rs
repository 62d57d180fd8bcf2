use crate::content::PipelineOptions;
use crate::domain::{FeedDocument, FeedItem};
use crate::errors::FeedResult;
use crate::parser::parse_feed;
use crate::services::diagnostics::Diagnostics;
use crate::sources::FeedSource;

pub const DEFAULT_FEED_URL: &str = "https://mironjclaygilmore.substack.com/feed";

pub struct FeedService<S: FeedSource, D: Diagnostics> {
    source: S,
    diagnostics: D,
    options: PipelineOptions,
    default_url: String,
}

impl<S: FeedSource, D: Diagnostics> FeedService<S, D> {
    pub fn new(source: S, diagnostics: D, options: PipelineOptions) -> Self {
        Self {
            source,
            diagnostics,
            options,
            default_url: DEFAULT_FEED_URL.to_string(),
        }
    }

    pub fn with_default_url(mut self, url: impl Into<String>) -> Self {
        self.default_url = url.into();
        self
    }

    /// Fetch and parse the feed at `url`, or at the default URL.
    ///
    /// Fetch and parse failures propagate unchanged.
    pub fn fetch_feed(&self, url: Option<&str>) -> FeedResult<FeedDocument> {
        let url = url.unwrap_or(&self.default_url);
        let xml = self.source.fetch_xml(url)?;
        parse_feed(&xml, &self.options)
    }

    /// The first item of the feed, or `None` when the feed is empty or any
    /// step fails. Failures go to the diagnostics sink and nowhere else.
    pub fn fetch_latest_item(&self, url: Option<&str>) -> Option<FeedItem> {
        match self.fetch_feed(url) {
            Ok(feed) => feed.into_latest(),
            Err(e) => {
                self.diagnostics
                    .fetch_failed(url.unwrap_or(&self.default_url), &e);
                None
            }
        }
    }
}
