pub mod feed;
pub mod article;
pub mod metadata;
pub mod dates;

pub use feed::FeedDocument;
pub use article::FeedItem;
pub use metadata::PageMetadata;
pub use dates::{format_date, format_date_long, DATE_UNAVAILABLE};
