use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use url::Url;

use crate::errors::{FeedError, FeedResult};
use crate::sources::traits::FeedSource;

pub const FEED_ACCEPT: &str = "application/rss+xml, application/xml, text/xml";

pub const USER_AGENT: &str = concat!("institute-feed/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP fetcher for a single feed URL.
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    /// Build a fetcher. `timeout` of `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> FeedResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(FEED_ACCEPT));

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

/// Accept only absolute http(s) URLs.
pub fn validate_feed_url(url: &str) -> FeedResult<Url> {
    let parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        "http" | "https" => Err(FeedError::InvalidUrl(format!("{}: missing host", url))),
        scheme => Err(FeedError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url, scheme
        ))),
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch_xml(&self, url: &str) -> FeedResult<String> {
        let url = validate_feed_url(url)?;

        let response = self.client.get(url.as_str()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::fetch(status));
        }

        let body = response.text()?;
        tracing::debug!(url = %url, bytes = body.len(), "fetched feed");
        Ok(body)
    }
}
