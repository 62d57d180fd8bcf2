pub mod xml;
pub mod rss;

pub use rss::{parse_feed, read_feed, RawFeed, RawItem};
