use std::fmt;

use super::sort::SortDirection;

/// 直近ページ末尾の投稿を指す再開カーソル。
/// 発行時の並び順に束縛され、並び順が変わったら破棄して再フェッチする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCursor {
    pub created_at: i64,
    pub id: String,
    pub direction: SortDirection,
}

impl FeedCursor {
    pub fn new(created_at: i64, id: String, direction: SortDirection) -> Self {
        Self {
            created_at,
            id,
            direction,
        }
    }

    pub fn parse(cursor: &str) -> Option<Self> {
        let mut parts = cursor.splitn(3, ':');
        let direction = SortDirection::parse(parts.next()?)?;
        let created_at = parts.next()?.parse().ok()?;
        let id = parts.next()?.to_string();
        if id.is_empty() {
            return None;
        }
        Some(Self {
            created_at,
            id,
            direction,
        })
    }

    pub fn is_valid_for(&self, direction: SortDirection) -> bool {
        self.direction == direction
    }
}

impl fmt::Display for FeedCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.direction.as_str(), self.created_at, self.id)
    }
}
