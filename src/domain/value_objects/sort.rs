use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// created_at を基準にした並び順。ページングのカーソルはこの向きに束縛される。
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    /// (created_at_millis, id) キーをこの向きで比較する。
    /// タイムスタンプ同値はidで安定化する。
    pub fn compare(&self, a: (i64, &str), b: (i64, &str)) -> Ordering {
        let ordering = a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1));
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}
