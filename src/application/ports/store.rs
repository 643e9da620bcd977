use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{PostDraft, PostUpdate};
use crate::domain::value_objects::{FeedCursor, SortDirection};
use crate::shared::error::AppError;

/// リモートコレクションが返す生ドキュメント。
/// ストアが保証しないフィールドはOptionのまま運び、エンティティ化の際に落とす。
#[derive(Debug, Clone)]
pub struct PostDocument {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// created_at順の1ページ分のクエリ
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub direction: SortDirection,
    pub limit: usize,
    /// 前ページ末尾のカーソル。Noneなら先頭から。
    pub after: Option<FeedCursor>,
}

impl FeedQuery {
    pub fn first_page(direction: SortDirection, limit: usize) -> Self {
        Self {
            direction,
            limit,
            after: None,
        }
    }

    pub fn next_page(direction: SortDirection, limit: usize, after: FeedCursor) -> Self {
        Self {
            direction,
            limit,
            after: Some(after),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryPage {
    pub items: Vec<PostDocument>,
    /// 末尾ドキュメントのカーソル。空ページではNone。
    pub next_cursor: Option<FeedCursor>,
}

impl QueryPage {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

/// リモートドキュメントストアの契約
#[async_trait]
pub trait PostStore: Send + Sync {
    /// created_atで並べた1ページを返す。空ページは枯渇を意味する。
    async fn query_posts(&self, query: &FeedQuery) -> Result<QueryPage, AppError>;

    /// 新規ドキュメントを挿入し、ストアが割り当てたidを返す。
    async fn insert_post(&self, draft: &PostDraft) -> Result<String, AppError>;

    /// id指定で可変フィールドを更新する。
    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<(), AppError>;

    /// id指定で削除する。存在しないidの削除は成功扱い。
    async fn delete_post(&self, id: &str) -> Result<(), AppError>;
}
