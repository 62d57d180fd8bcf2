use std::fs;
use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use institute_feed::cli::{Cli, Commands};
use institute_feed::config::Config;
use institute_feed::content::{sanitize, strip_boilerplate};
use institute_feed::domain::PageMetadata;
use institute_feed::errors::FeedResult;
use institute_feed::parser::parse_feed;
use institute_feed::services::{Diagnostics, FeedService};
use institute_feed::sources::HttpFeedSource;

type Service = FeedService<HttpFeedSource, Box<dyn Diagnostics>>;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> FeedResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Fetch { url, compact } => cmd_fetch(&config, url.as_deref(), compact),
        Commands::Latest { url } => cmd_latest(&config, url.as_deref()),
        Commands::Parse { file } => cmd_parse(&config, &file),
        Commands::Metadata { url } => cmd_metadata(&config, url.as_deref()),
        Commands::Sanitize { file } => cmd_sanitize(&config, &file),
    }
}

fn build_service(config: &Config) -> FeedResult<Service> {
    let source = HttpFeedSource::new(config.timeout)?;
    Ok(
        FeedService::new(source, config.diagnostics(), config.pipeline.clone())
            .with_default_url(config.feed_url.clone()),
    )
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> FeedResult<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}

fn cmd_fetch(config: &Config, url: Option<&str>, compact: bool) -> FeedResult<()> {
    let service = build_service(config)?;
    let feed = service.fetch_feed(url)?;
    print_json(&feed, compact)
}

fn cmd_latest(config: &Config, url: Option<&str>) -> FeedResult<()> {
    let service = build_service(config)?;
    let latest = service.fetch_latest_item(url);
    print_json(&latest, false)
}

fn cmd_parse(config: &Config, file: &Path) -> FeedResult<()> {
    let xml = fs::read_to_string(file)?;
    let feed = parse_feed(&xml, &config.pipeline)?;
    print_json(&feed, false)
}

fn cmd_metadata(config: &Config, url: Option<&str>) -> FeedResult<()> {
    let service = build_service(config)?;

    // Metadata always has something to show; failures fall back to site defaults.
    let feed = match service.fetch_feed(url) {
        Ok(feed) => Some(feed),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default page metadata");
            None
        }
    };

    print_json(&PageMetadata::from_feed(feed.as_ref()), false)
}

fn cmd_sanitize(config: &Config, file: &Path) -> FeedResult<()> {
    let html = fs::read_to_string(file)?;
    let cleaned = strip_boilerplate(
        &sanitize(&html, &config.pipeline.sanitize),
        &config.pipeline.boilerplate,
    );

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", cleaned)?;
    Ok(())
}
