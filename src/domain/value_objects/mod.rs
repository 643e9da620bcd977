pub mod cursor;
pub mod sort;

pub use cursor::FeedCursor;
pub use sort::SortDirection;
