use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use makimono::{
    AppError, FeedQuery, MemoryPostStore, PostDocument, PostDraft, PostStore, PostUpdate,
    QueryPage,
};
use tokio::sync::{RwLock, RwLockWriteGuard};

/// 失敗注入と問い合わせ観測ができるPostStoreモック。
/// hold_queries()で取得したガードを握っている間、queryは返らない。
pub struct MockPostStore {
    inner: MemoryPostStore,
    fail_queries: AtomicBool,
    fail_inserts: AtomicBool,
    fail_updates: AtomicBool,
    fail_deletes: AtomicBool,
    query_count: AtomicUsize,
    gate: RwLock<()>,
}

impl MockPostStore {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    pub fn with_documents(documents: Vec<PostDocument>) -> Self {
        Self {
            inner: MemoryPostStore::with_documents(documents),
            fail_queries: AtomicBool::new(false),
            fail_inserts: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            query_count: AtomicUsize::new(0),
            gate: RwLock::new(()),
        }
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    /// 以降のqueryを保留させるガードを返す
    pub async fn hold_queries(&self) -> RwLockWriteGuard<'_, ()> {
        self.gate.write().await
    }
}

impl Default for MockPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MockPostStore {
    async fn query_posts(&self, query: &FeedQuery) -> Result<QueryPage, AppError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        let _gate = self.gate.read().await;
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(AppError::Store("injected query failure".to_string()));
        }
        self.inner.query_posts(query).await
    }

    async fn insert_post(&self, draft: &PostDraft) -> Result<String, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Store("injected insert failure".to_string()));
        }
        self.inner.insert_post(draft).await
    }

    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<(), AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Store("injected update failure".to_string()));
        }
        self.inner.update_post(id, update).await
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::Store("injected delete failure".to_string()));
        }
        self.inner.delete_post(id).await
    }
}
