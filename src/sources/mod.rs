pub mod traits;
pub mod http;

pub use http::{validate_feed_url, HttpFeedSource};
pub use traits::FeedSource;
