pub mod diagnostics;
pub mod feed_service;

pub use diagnostics::{Diagnostics, SilentDiagnostics, TracingDiagnostics};
pub use feed_service::{FeedService, DEFAULT_FEED_URL};
