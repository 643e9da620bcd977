pub mod feed_service;

pub use feed_service::{FeedService, FeedSnapshot};
