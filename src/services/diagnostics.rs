use crate::errors::FeedError;

/// Receives failures that the orchestration layer swallows.
#[cfg_attr(test, mockall::automock)]
pub trait Diagnostics: Send + Sync {
    fn fetch_failed(&self, url: &str, error: &FeedError);
}

/// Reports through `tracing`. Used in development.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn fetch_failed(&self, url: &str, error: &FeedError) {
        tracing::warn!(url = %url, error = %error, "error fetching latest feed item");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn fetch_failed(&self, _url: &str, _error: &FeedError) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for Box<D> {
    fn fetch_failed(&self, url: &str, error: &FeedError) {
        (**self).fetch_failed(url, error)
    }
}
