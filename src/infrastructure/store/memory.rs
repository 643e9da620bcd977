use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::StoreError;
use crate::application::ports::store::{FeedQuery, PostDocument, PostStore, QueryPage};
use crate::domain::entities::{PostDraft, PostUpdate};
use crate::domain::value_objects::FeedCursor;
use crate::shared::error::AppError;

/// インメモリのPostStore実装。テストと組み込み用途向け。
#[derive(Clone, Default)]
pub struct MemoryPostStore {
    documents: Arc<RwLock<HashMap<String, PostDocument>>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_documents(documents: Vec<PostDocument>) -> Self {
        let mut map = HashMap::new();
        for document in documents {
            map.insert(document.id.clone(), document);
        }
        Self {
            documents: Arc::new(RwLock::new(map)),
        }
    }

    /// 不正ドキュメントの混入テスト用に、検証なしで直接入れる
    pub async fn put_document(&self, document: PostDocument) {
        let mut documents = self.documents.write().await;
        documents.insert(document.id.clone(), document);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn query_posts(&self, query: &FeedQuery) -> Result<QueryPage, AppError> {
        if let Some(after) = &query.after {
            if !after.is_valid_for(query.direction) {
                return Err(StoreError::CursorMismatch(after.to_string()).into());
            }
        }

        let documents = self.documents.read().await;
        let mut ordered: Vec<&PostDocument> = documents.values().collect();
        ordered.sort_by(|a, b| {
            query.direction.compare(
                (a.created_at.timestamp_millis(), a.id.as_str()),
                (b.created_at.timestamp_millis(), b.id.as_str()),
            )
        });

        let items: Vec<PostDocument> = ordered
            .into_iter()
            .filter(|document| match &query.after {
                Some(after) => {
                    query.direction.compare(
                        (document.created_at.timestamp_millis(), document.id.as_str()),
                        (after.created_at, after.id.as_str()),
                    ) == std::cmp::Ordering::Greater
                }
                None => true,
            })
            .take(query.limit)
            .cloned()
            .collect();

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
        let document = PostDocument {
            id: id.clone(),
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            created_at: draft.created_at,
        };
        let mut documents = self.documents.write().await;
        documents.insert(id.clone(), document);
        Ok(id)
    }

    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<(), AppError> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        document.title = Some(update.title.clone());
        document.description = Some(update.description.clone());
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let mut documents = self.documents.write().await;
        documents.remove(id);
        Ok(())
    }
}
