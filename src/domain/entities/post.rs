use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new_with_id(
        id: String,
        title: String,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            created_at,
        }
    }

    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }

    /// 境界越え用のISO-8601表現
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339()
    }

    /// idとcreated_atは据え置きで可変フィールドのみ差し替える
    pub fn apply_update(&mut self, update: &PostUpdate) {
        self.title = update.title.clone();
        self.description = update.description.clone();
    }

    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// ストアがidを割り当てる前の新規投稿
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl PostDraft {
    pub fn new(title: String, description: String, created_at: DateTime<Utc>) -> Self {
        Self {
            title,
            description,
            created_at,
        }
    }

    /// ISO-8601文字列からの組み立て（プレゼンテーション境界用）
    pub fn from_iso(title: String, description: String, created_at: &str) -> Result<Self, AppError> {
        let created_at = DateTime::parse_from_rfc3339(created_at)
            .map_err(|err| AppError::InvalidInput(format!("Invalid created_at: {err}")))?
            .with_timezone(&Utc);
        Ok(Self::new(title, description, created_at))
    }
}

/// 作成後に変更できるフィールド
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: String,
    pub description: String,
}

impl PostUpdate {
    pub fn new(title: String, description: String) -> Self {
        Self { title, description }
    }
}
