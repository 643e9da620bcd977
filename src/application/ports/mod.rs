pub mod store;

pub use store::{FeedQuery, PostDocument, PostStore, QueryPage};
