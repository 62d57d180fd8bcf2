//! Fetch and orchestration against a local HTTP server.
//!
//! The fetcher uses reqwest's blocking client, so every call runs on a
//! blocking thread while wiremock serves from the async runtime.

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use institute_feed::content::PipelineOptions;
use institute_feed::errors::{FeedError, FeedResult};
use institute_feed::services::{FeedService, SilentDiagnostics};
use institute_feed::sources::{FeedSource, HttpFeedSource};

const FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>The Institute</title>
    <description>Essays</description>
    <lastBuildDate>Mon, 01 Jan 2024 00:00:00 GMT</lastBuildDate>
    <item>
      <title>Latest essay</title>
      <link>https://institute.substack.com/p/latest</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <guid>https://institute.substack.com/p/latest</guid>
      <description>Teaser</description>
      <content:encoded><![CDATA[<p>Body</p><script>alert(1)</script><img src="https://cdn.example.com/hero.jpg">]]></content:encoded>
    </item>
    <item>
      <title>Older essay</title>
      <link>https://institute.substack.com/p/older</link>
    </item>
  </channel>
</rss>"#;

fn fetch_blocking(url: String) -> tokio::task::JoinHandle<FeedResult<String>> {
    tokio::task::spawn_blocking(move || {
        let source = HttpFeedSource::new(Some(Duration::from_secs(5)))?;
        source.fetch_xml(&url)
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_returns_body_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_XML))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetch_blocking(format!("{}/feed", server.uri()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(body, FEED_XML);
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_sends_feed_accept_and_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("accept", "application/rss+xml, application/xml, text/xml"))
        .and(header(
            "user-agent",
            concat!("institute-feed/", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_XML))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetch_blocking(format!("{}/feed", server.uri())).await.unwrap();
    assert!(result.is_ok(), "headers did not match: {:?}", result.err());
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_reports_status_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetch_blocking(format!("{}/feed", server.uri()))
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(err, FeedError::Fetch { status: 404, .. }));
    assert!(
        err.to_string().contains("404 Not Found"),
        "unexpected message: {}",
        err
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_treats_5xx_as_error_even_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503).set_body_string(FEED_XML))
        .mount(&server)
        .await;

    let err = fetch_blocking(format!("{}/feed", server.uri()))
        .await
        .unwrap()
        .unwrap_err();
    assert!(err.to_string().contains("503 Service Unavailable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_times_out_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(FEED_XML)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let url = format!("{}/slow", server.uri());
    let result = tokio::task::spawn_blocking(move || {
        let source = HttpFeedSource::new(Some(Duration::from_millis(200)))?;
        source.fetch_xml(&url)
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(FeedError::Transport(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn service_fetches_and_processes_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_XML))
        .mount(&server)
        .await;

    let url = format!("{}/feed", server.uri());
    let feed = tokio::task::spawn_blocking(move || {
        let service = FeedService::new(
            HttpFeedSource::new(None)?,
            SilentDiagnostics,
            PipelineOptions::default(),
        )
        .with_default_url(url);
        service.fetch_feed(None)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(feed.title, "The Institute");
    assert_eq!(feed.items.len(), 2);

    let hero = feed.hero().unwrap();
    assert_eq!(hero.title, "Latest essay");
    assert!(hero.content.contains("<p>Body</p>"));
    assert!(!hero.content.contains("script"));
    assert_eq!(hero.image.as_deref(), Some("https://cdn.example.com/hero.jpg"));
    assert_eq!(hero.summary, "Teaser");
}

#[tokio::test(flavor = "multi_thread")]
async fn latest_item_is_none_when_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = format!("{}/feed", server.uri());
    let latest = tokio::task::spawn_blocking(move || {
        let service = FeedService::new(
            HttpFeedSource::new(None).unwrap(),
            SilentDiagnostics,
            PipelineOptions::default(),
        );
        service.fetch_latest_item(Some(&url))
    })
    .await
    .unwrap();

    assert!(latest.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn latest_item_is_first_item() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_XML))
        .mount(&server)
        .await;

    let url = format!("{}/feed", server.uri());
    let latest = tokio::task::spawn_blocking(move || {
        let service = FeedService::new(
            HttpFeedSource::new(None).unwrap(),
            SilentDiagnostics,
            PipelineOptions::default(),
        );
        service.fetch_latest_item(Some(&url))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(latest.title, "Latest essay");
    assert_eq!(latest.link, "https://institute.substack.com/p/latest");
}
