use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// 投稿を保持するコレクション（テーブル）名
    pub collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// 初回フェッチの取得件数
    pub first_page_size: usize,
    /// 追加読み込みの取得件数
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/makimono.db".to_string(),
            max_connections: 5,
            collection: "posts".to_string(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            first_page_size: 10,
            page_size: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // 既定値
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("MAKIMONO_DATABASE_URL") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.store.database_url = trimmed.to_string();
            }
        }
        if let Ok(v) = std::env::var("MAKIMONO_MAX_CONNECTIONS") {
            if let Some(value) = parse_u32(&v) {
                cfg.store.max_connections = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("MAKIMONO_COLLECTION") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.store.collection = trimmed.to_string();
            }
        }
        if let Ok(v) = std::env::var("MAKIMONO_FIRST_PAGE_SIZE") {
            if let Some(value) = parse_usize(&v) {
                cfg.feed.first_page_size = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("MAKIMONO_PAGE_SIZE") {
            if let Some(value) = parse_usize(&v) {
                cfg.feed.page_size = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.store.max_connections == 0 {
            return Err("Store max_connections must be greater than 0".to_string());
        }
        if !is_identifier(&self.store.collection) {
            return Err(format!(
                "Store collection must be a bare identifier: {}",
                self.store.collection
            ));
        }
        if self.feed.first_page_size == 0 {
            return Err("Feed first_page_size must be greater than 0".to_string());
        }
        if self.feed.page_size == 0 {
            return Err("Feed page_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// コレクション名はそのままSQLに展開されるため識別子に限定する
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}
