use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, QueryBuilder, Row, Sqlite};
use tracing::info;
use uuid::Uuid;

use super::StoreError;
use crate::application::ports::store::{FeedQuery, PostDocument, PostStore, QueryPage};
use crate::domain::entities::{PostDraft, PostUpdate};
use crate::domain::value_objects::{FeedCursor, SortDirection};
use crate::shared::config::{is_identifier, StoreConfig};
use crate::shared::error::AppError;

pub type DbPool = Pool<Sqlite>;

/// SQLiteを土台にしたPostStore実装。
/// (created_at, id) のタプル比較でキーセットページングする。
pub struct SqlitePostStore {
    pool: DbPool,
    table: String,
}

impl SqlitePostStore {
    pub async fn initialize(config: &StoreConfig) -> Result<Self, AppError> {
        if !is_identifier(&config.collection) {
            return Err(AppError::ConfigurationError(format!(
                "collection must be a bare identifier: {}",
                config.collection
            )));
        }

        // ファイルDBの場合は親ディレクトリを先に用意する
        if let Some(path) = file_path_of(&config.database_url) {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| StoreError::Connection(err.to_string()))?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        info!("Post store connected: {}", config.database_url);

        let store = Self {
            pool,
            table: config.collection.clone(),
        };
        store.run_migrations().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn run_migrations(&self) -> Result<(), AppError> {
        // title/descriptionは欠損ドキュメントを表現できるようNULL許容
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} ( \
                id TEXT PRIMARY KEY, \
                title TEXT, \
                description TEXT, \
                created_at INTEGER NOT NULL \
            )",
            self.table
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_created_at ON {} (created_at, id)",
            self.table, self.table
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// 接続URLからファイルパス部分を取り出す。メモリDBはNone。
fn file_path_of(database_url: &str) -> Option<&str> {
    let path = database_url.strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(path)
}

fn map_document_row(row: &SqliteRow) -> Result<PostDocument, AppError> {
    let id: String = row.try_get("id")?;
    let title: Option<String> = row.try_get("title")?;
    let description: Option<String> = row.try_get("description")?;
    let created_at: i64 = row.try_get("created_at")?;
    let created_at = DateTime::from_timestamp_millis(created_at).unwrap_or_else(Utc::now);

    Ok(PostDocument {
        id,
        title,
        description,
        created_at,
    })
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn query_posts(&self, query: &FeedQuery) -> Result<QueryPage, AppError> {
        let limit = query.limit.clamp(1, 100);

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT id, title, description, created_at FROM {}",
            self.table
        ));

        if let Some(after) = &query.after {
            if !after.is_valid_for(query.direction) {
                return Err(StoreError::CursorMismatch(after.to_string()).into());
            }
            match query.direction {
                SortDirection::Descending => {
                    builder.push(" WHERE (created_at < ");
                    builder.push_bind(after.created_at);
                    builder.push(" OR (created_at = ");
                    builder.push_bind(after.created_at);
                    builder.push(" AND id < ");
                    builder.push_bind(after.id.clone());
                    builder.push("))");
                }
                SortDirection::Ascending => {
                    builder.push(" WHERE (created_at > ");
                    builder.push_bind(after.created_at);
                    builder.push(" OR (created_at = ");
                    builder.push_bind(after.created_at);
                    builder.push(" AND id > ");
                    builder.push_bind(after.id.clone());
                    builder.push("))");
                }
            }
        }

        match query.direction {
            SortDirection::Descending => {
                builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
            }
            SortDirection::Ascending => {
                builder.push(" ORDER BY created_at ASC, id ASC LIMIT ");
            }
        }
        builder.push_bind(limit as i64);

        let rows = builder.build().fetch_all(&self.pool).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(map_document_row(row)?);
        }

        let next_cursor = items.last().map(|document| {
            FeedCursor::new(
                document.created_at.timestamp_millis(),
                document.id.clone(),
                query.direction,
            )
        });

        Ok(QueryPage { items, next_cursor })
    }

    async fn insert_post(&self, draft: &PostDraft) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(&format!(
            "INSERT INTO {} (id, title, description, created_at) VALUES (?, ?, ?, ?)",
            self.table
        ))
        .bind(&id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.created_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|err| StoreError::Write(err.to_string()))?;

        Ok(id)
    }

    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<(), AppError> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET title = ?, description = ? WHERE id = ?",
            self.table
        ))
        .bind(&update.title)
        .bind(&update.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| StoreError::Write(err.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()).into());
        }
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        sqlx::query(&format!("DELETE FROM {} WHERE id = ?", self.table))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::Write(err.to_string()))?;
        Ok(())
    }
}
