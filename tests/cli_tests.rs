use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FEED_XML: &str = r#"<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test Feed</title>
    <description>A test substack feed</description>
    <lastBuildDate>Mon, 01 Jan 2024 00:00:00 GMT</lastBuildDate>
    <item>
      <title>Test Article</title>
      <link>https://test.substack.com/p/test-article</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <guid>https://test.substack.com/p/test-article</guid>
      <description>Summary description</description>
      <content:encoded><![CDATA[<p>Full content</p><script>alert('x')</script><img src="test.jpg" />]]></content:encoded>
    </item>
  </channel>
</rss>"#;

fn feed_cmd() -> Command {
    let mut cmd = Command::cargo_bin("institute-feed").unwrap();
    cmd.env_remove("INSTITUTE_FEED_URL")
        .env_remove("INSTITUTE_PREVIEW_WORDS")
        .env_remove("INSTITUTE_FEED_TIMEOUT_SECS")
        .env_remove("INSTITUTE_ENV")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    feed_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("latest"))
        .stdout(predicate::str::contains("metadata"))
        .stdout(predicate::str::contains("sanitize"));
}

#[test]
fn test_fetch_help_shows_compact_flag() {
    feed_cmd()
        .arg("fetch")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--compact"))
        .stdout(predicate::str::contains("--url"));
}

#[test]
fn test_parse_local_file_prints_json() {
    let temp_dir = TempDir::new().unwrap();
    let feed_path = temp_dir.path().join("feed.xml");
    fs::write(&feed_path, FEED_XML).unwrap();

    feed_cmd()
        .arg("parse")
        .arg(&feed_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title": "Test Feed""#))
        .stdout(predicate::str::contains(r#""lastBuildDate""#))
        .stdout(predicate::str::contains(r#""pubDate": "Mon, 01 Jan 2024 00:00:00 GMT""#))
        .stdout(predicate::str::contains(r#""isTruncated": false"#))
        .stdout(predicate::str::contains(r#""image": "test.jpg""#))
        .stdout(predicate::str::contains("<script>").not());
}

#[test]
fn test_parse_respects_preview_words_env() {
    let temp_dir = TempDir::new().unwrap();
    let feed_path = temp_dir.path().join("feed.xml");
    fs::write(
        &feed_path,
        "<rss><channel><item><description>one two three four five</description></item></channel></rss>",
    )
    .unwrap();

    feed_cmd()
        .arg("parse")
        .arg(&feed_path)
        .env("INSTITUTE_PREVIEW_WORDS", "2")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""previewContent": "one two...""#))
        .stdout(predicate::str::contains(r#""isTruncated": true"#));
}

#[test]
fn test_parse_invalid_feed_fails() {
    let temp_dir = TempDir::new().unwrap();
    let feed_path = temp_dir.path().join("bad.xml");
    fs::write(&feed_path, "<invalid>xml</invalid>").unwrap();

    feed_cmd()
        .arg("parse")
        .arg(&feed_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid RSS feed"));
}

#[test]
fn test_parse_missing_file_reports_io_error() {
    let temp_dir = TempDir::new().unwrap();

    feed_cmd()
        .arg("parse")
        .arg(temp_dir.path().join("missing.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: IO error"));
}

#[test]
fn test_invalid_preview_words_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let feed_path = temp_dir.path().join("feed.xml");
    fs::write(&feed_path, FEED_XML).unwrap();

    feed_cmd()
        .arg("parse")
        .arg(&feed_path)
        .env("INSTITUTE_PREVIEW_WORDS", "many")
        .assert()
        .failure()
        .stderr(predicate::str::contains("INSTITUTE_PREVIEW_WORDS"));
}

#[test]
fn test_sanitize_strips_scripts_and_boilerplate() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("post.html");
    fs::write(
        &html_path,
        concat!(
            "<p onclick=\"steal()\">Keep me</p>",
            "<script>alert(1)</script>",
            "<p>Thanks for reading! Subscribe for free to receive new posts and support my work.</p>",
        ),
    )
    .unwrap();

    feed_cmd()
        .arg("sanitize")
        .arg(&html_path)
        .assert()
        .success()
        .stdout(predicate::str::diff("<p>Keep me</p>\n"));
}

mod unreachable_feed {
    use super::*;

    // Nothing listens on the discard port locally, so the connection is refused.
    const DEAD_URL: &str = "http://127.0.0.1:9/feed";

    #[test]
    fn test_latest_prints_null_and_succeeds() {
        feed_cmd()
            .arg("latest")
            .arg("--url")
            .arg(DEAD_URL)
            .assert()
            .success()
            .stdout(predicate::str::diff("null\n"));
    }

    #[test]
    fn test_fetch_fails_with_error() {
        feed_cmd()
            .arg("fetch")
            .arg("--url")
            .arg(DEAD_URL)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn test_metadata_falls_back_to_defaults() {
        feed_cmd()
            .arg("metadata")
            .arg("--url")
            .arg(DEAD_URL)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""title": "Home""#));
    }

    #[test]
    fn test_invalid_url_rejected() {
        feed_cmd()
            .arg("fetch")
            .arg("--url")
            .arg("ftp://example.com/feed")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid feed URL"));
    }
}
