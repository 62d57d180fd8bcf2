use crate::errors::FeedResult;

/// Where feed XML comes from.
#[cfg_attr(test, mockall::automock)]
pub trait FeedSource: Send + Sync {
    /// Retrieve the raw body at `url`. Non-2xx responses and transport
    /// failures are errors; the body is never inspected here.
    fn fetch_xml(&self, url: &str) -> FeedResult<String>;
}
