use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::application::ports::store::{FeedQuery, PostStore};
use crate::application::shared::mappers::map_documents;
use crate::domain::entities::{Post, PostDraft, PostUpdate};
use crate::domain::value_objects::{FeedCursor, SortDirection};
use crate::shared::config::FeedConfig;
use crate::shared::error::AppError;

/// フィードキャッシュの内部状態。FeedServiceの操作経由でのみ変化する。
#[derive(Debug)]
struct FeedState {
    window: Vec<Post>,
    cursor: Option<FeedCursor>,
    has_more: bool,
    is_loading: bool,
    sort_direction: SortDirection,
    search_text: String,
    /// 並び替えのたびに進む世代。古い応答の破棄に使う。
    generation: u64,
    last_error: Option<String>,
}

impl FeedState {
    fn new() -> Self {
        Self {
            window: Vec::new(),
            cursor: None,
            has_more: true,
            is_loading: false,
            sort_direction: SortDirection::Descending,
            search_text: String::new(),
            generation: 0,
            last_error: None,
        }
    }
}

/// プレゼンテーション層へ渡す読み取り専用ビュー
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub posts: Vec<Post>,
    pub has_more: bool,
    pub is_loading: bool,
    pub sort_direction: SortDirection,
    pub search_text: String,
    pub last_error: Option<String>,
}

/// リモートの投稿コレクションに対するローカルウィンドウ。
/// ページング・並び替え・楽観的な作成/編集/削除・タイトル検索を担う。
#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn PostStore>,
    config: FeedConfig,
    state: Arc<RwLock<FeedState>>,
}

impl FeedService {
    pub fn new(store: Arc<dyn PostStore>, config: FeedConfig) -> Self {
        Self {
            store,
            config,
            state: Arc::new(RwLock::new(FeedState::new())),
        }
    }

    /// 先頭ページを取得してウィンドウを丸ごと差し替える
    pub async fn fetch_posts(&self) -> Result<(), AppError> {
        let (direction, generation) = {
            let mut state = self.state.write().await;
            state.is_loading = true;
            (state.sort_direction, state.generation)
        };

        let query = FeedQuery::first_page(direction, self.config.first_page_size);
        let result = self.store.query_posts(&query).await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        match result {
            Ok(page) => {
                if state.generation != generation {
                    debug!(generation, "discarding first page from a stale fetch");
                    return Ok(());
                }
                // has_moreは境界フィルタ前の返却件数で決める
                state.has_more = !page.items.is_empty();
                state.cursor = page.next_cursor;
                state.window = map_documents(page.items);
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch first page");
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// カーソルの続きから次ページを取得してウィンドウ末尾へ足す。
    /// 枯渇済み・カーソル無し・取得中はなにもしない。
    pub async fn load_more_posts(&self) -> Result<(), AppError> {
        let (direction, generation, cursor) = {
            let mut state = self.state.write().await;
            if !state.has_more || state.is_loading {
                return Ok(());
            }
            let Some(cursor) = state.cursor.clone() else {
                return Ok(());
            };
            if !cursor.is_valid_for(state.sort_direction) {
                return Ok(());
            }
            state.is_loading = true;
            (state.sort_direction, state.generation, cursor)
        };

        let query = FeedQuery::next_page(direction, self.config.page_size, cursor);
        let result = self.store.query_posts(&query).await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        match result {
            Ok(page) => {
                if state.generation != generation {
                    debug!(generation, "discarding page from a stale fetch");
                    return Ok(());
                }
                if page.items.is_empty() {
                    state.has_more = false;
                    return Ok(());
                }
                let known: HashSet<String> =
                    state.window.iter().map(|post| post.id.clone()).collect();
                let fresh: Vec<Post> = map_documents(page.items)
                    .into_iter()
                    .filter(|post| !known.contains(&post.id))
                    .collect();
                state.cursor = page.next_cursor;
                state.window.extend(fresh);
                state.has_more = true;
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load more posts");
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// 並び順を切り替える。カーソルは向きに束縛されるため破棄し、
    /// 先頭ページから取り直す。
    pub async fn change_sort_order(&self, direction: SortDirection) -> Result<(), AppError> {
        {
            let mut state = self.state.write().await;
            state.sort_direction = direction;
            state.cursor = None;
            state.has_more = true;
            state.generation += 1;
        }
        self.fetch_posts().await
    }

    /// ストアへの書き込みが成功した場合のみ、現在の並び順に従った位置へ
    /// ローカル挿入する。
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, AppError> {
        let id = match self.store.insert_post(&draft).await {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "failed to insert post");
                self.state.write().await.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        let post = Post::new_with_id(id, draft.title, draft.description, draft.created_at);
        let mut state = self.state.write().await;
        let index = insertion_index(&state.window, &post, state.sort_direction);
        state.window.insert(index, post.clone());
        state.last_error = None;
        Ok(post)
    }

    /// ストア更新の成功後にウィンドウ内の同一idを書き換える。
    /// ウィンドウ外のidはローカルには何も起きない。
    pub async fn edit_post(&self, id: &str, update: PostUpdate) -> Result<(), AppError> {
        if let Err(err) = self.store.update_post(id, &update).await {
            warn!(error = %err, post_id = id, "failed to update post");
            self.state.write().await.last_error = Some(err.to_string());
            return Err(err);
        }

        let mut state = self.state.write().await;
        if let Some(post) = state.window.iter_mut().find(|post| post.id == id) {
            post.apply_update(&update);
        }
        state.last_error = None;
        Ok(())
    }

    /// ストア削除の成功後にウィンドウから同一idを取り除く。
    /// カーソルとhas_moreは据え置き。
    pub async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        if let Err(err) = self.store.delete_post(id).await {
            warn!(error = %err, post_id = id, "failed to delete post");
            self.state.write().await.last_error = Some(err.to_string());
            return Err(err);
        }

        let mut state = self.state.write().await;
        state.window.retain(|post| post.id != id);
        state.last_error = None;
        Ok(())
    }

    /// 検索文字列を差し替える。フェッチは発生しない。
    pub async fn set_search_query(&self, text: impl Into<String>) {
        let mut state = self.state.write().await;
        state.search_text = text.into();
    }

    /// ロード済みウィンドウに対する検索ビュー。
    /// タイトルの大文字小文字を無視した部分一致で絞り込む。
    pub async fn filtered_posts(&self) -> Vec<Post> {
        let state = self.state.read().await;
        if state.search_text.is_empty() {
            return state.window.clone();
        }
        let needle = state.search_text.to_lowercase();
        state
            .window
            .iter()
            .filter(|post| post.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.window.clone()
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn sort_direction(&self) -> SortDirection {
        self.state.read().await.sort_direction
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.read().await;
        FeedSnapshot {
            posts: state.window.clone(),
            has_more: state.has_more,
            is_loading: state.is_loading,
            sort_direction: state.sort_direction,
            search_text: state.search_text.clone(),
            last_error: state.last_error.clone(),
        }
    }
}

/// 現在の並び順の比較器でpostが入るべき位置を返す
fn insertion_index(window: &[Post], post: &Post, direction: SortDirection) -> usize {
    let key = (post.created_at_millis(), post.id.as_str());
    window.partition_point(|existing| {
        direction.compare((existing.created_at_millis(), existing.id.as_str()), key)
            != std::cmp::Ordering::Greater
    })
}
