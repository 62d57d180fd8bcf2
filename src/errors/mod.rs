use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("Failed to fetch RSS feed: {status} {status_text}")]
    Fetch { status: u16, status_text: String },

    /// Transport failures pass through untouched.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    // Parsing errors
    #[error("Invalid RSS feed: {0}")]
    InvalidFeed(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FeedError {
    pub fn fetch(status: reqwest::StatusCode) -> Self {
        FeedError::Fetch {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
