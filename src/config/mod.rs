use std::time::Duration;

use crate::content::{PipelineOptions, DEFAULT_PREVIEW_WORDS};
use crate::errors::{FeedError, FeedResult};
use crate::services::{Diagnostics, SilentDiagnostics, TracingDiagnostics, DEFAULT_FEED_URL};

pub const ENV_FEED_URL: &str = "INSTITUTE_FEED_URL";
pub const ENV_PREVIEW_WORDS: &str = "INSTITUTE_PREVIEW_WORDS";
pub const ENV_TIMEOUT_SECS: &str = "INSTITUTE_FEED_TIMEOUT_SECS";
pub const ENV_ENVIRONMENT: &str = "INSTITUTE_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub timeout: Option<Duration>,
    pub environment: Environment,
    pub pipeline: PipelineOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            timeout: None,
            environment: Environment::default(),
            pipeline: PipelineOptions::default(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeedResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset and blank values take defaults.
    pub fn from_lookup<F>(lookup: F) -> FeedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let feed_url = get(ENV_FEED_URL)
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

        let preview_words = match get(ENV_PREVIEW_WORDS) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                FeedError::Config(format!(
                    "{} must be a non-negative integer, got '{}'",
                    ENV_PREVIEW_WORDS, raw
                ))
            })?,
            None => DEFAULT_PREVIEW_WORDS,
        };

        let timeout = match get(ENV_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(FeedError::Config(format!(
                        "{} must be a positive integer, got '{}'",
                        ENV_TIMEOUT_SECS, raw
                    )))
                }
            },
            None => None,
        };

        let environment = get(ENV_ENVIRONMENT)
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            feed_url,
            timeout,
            environment,
            pipeline: PipelineOptions::default().with_preview_words(preview_words),
        })
    }

    /// Sink for swallowed latest-item failures.
    pub fn diagnostics(&self) -> Box<dyn Diagnostics> {
        match self.environment {
            Environment::Development => Box::new(TracingDiagnostics),
            Environment::Production => Box::new(SilentDiagnostics),
        }
    }
}
