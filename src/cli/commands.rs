use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "institute-feed")]
#[command(about = "Fetch the Institute's Substack feed and turn it into safe, previewable content")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and process the feed, printing it as JSON
    Fetch {
        /// Feed URL (defaults to INSTITUTE_FEED_URL or the Institute feed)
        #[arg(long)]
        url: Option<String>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print the most recent item as JSON, or null when unavailable
    Latest {
        /// Feed URL (defaults to INSTITUTE_FEED_URL or the Institute feed)
        #[arg(long)]
        url: Option<String>,
    },

    /// Process a local RSS file instead of fetching
    Parse {
        /// Path to an RSS XML file
        file: PathBuf,
    },

    /// Print page metadata built from the latest item
    Metadata {
        /// Feed URL (defaults to INSTITUTE_FEED_URL or the Institute feed)
        #[arg(long)]
        url: Option<String>,
    },

    /// Sanitize a local HTML fragment and strip subscription boilerplate
    Sanitize {
        /// Path to an HTML file
        file: PathBuf,
    },
}
