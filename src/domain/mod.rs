pub mod entities;
pub mod value_objects;

pub use entities::{Post, PostDraft, PostUpdate};
pub use value_objects::{FeedCursor, SortDirection};
