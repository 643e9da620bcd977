use thiserror::Error;

use crate::shared::error::AppError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryPostStore;
pub use sqlite::{DbPool, SqlitePostStore};

/// ストアアダプタ内部のエラー。ポート境界でAppErrorへ畳み込む。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Cursor does not match query direction: {0}")]
    CursorMismatch(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::CursorMismatch(msg) => AppError::InvalidInput(msg),
            other => AppError::Store(other.to_string()),
        }
    }
}
