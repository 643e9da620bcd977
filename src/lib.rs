// モジュール定義
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::ports::store::{FeedQuery, PostDocument, PostStore, QueryPage};
pub use application::services::{FeedService, FeedSnapshot};
pub use domain::entities::{Post, PostDraft, PostUpdate};
pub use domain::value_objects::{FeedCursor, SortDirection};
pub use infrastructure::store::{MemoryPostStore, SqlitePostStore, StoreError};
pub use shared::config::{AppConfig, FeedConfig, StoreConfig};
pub use shared::error::{AppError, Result};

/// ログ設定の初期化。プロセスで一度だけ呼ぶこと。
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "makimono=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
