//! In-memory post store for single-process operation.
//!
//! State is not persisted across restarts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::store::{PostStore, StoreError};
use crate::models::{ImportedPost, LookupField, StoredPost};

/// In-memory post store.
#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    posts: Arc<RwLock<Vec<StoredPost>>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable store: every call fails with
    /// [`StoreError::Unavailable`] until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of posts across all collections.
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("in-memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    async fn find_by(
        &self,
        collection: &str,
        field: LookupField,
        value: &str,
    ) -> Result<Option<StoredPost>, StoreError> {
        self.check_online()?;
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .find(|p| p.collection == collection && field.value_of(&p.post) == value)
            .cloned())
    }

    async fn insert(&self, collection: &str, post: &ImportedPost) -> Result<String, StoreError> {
        self.check_online()?;
        let mut posts = self.posts.write().await;

        for field in [LookupField::Slug, LookupField::SourceUrl] {
            let value = field.value_of(post);
            if posts
                .iter()
                .any(|p| p.collection == collection && field.value_of(&p.post) == value)
            {
                return Err(StoreError::Duplicate {
                    field: field.as_str(),
                    value: value.to_string(),
                });
            }
        }

        let stored = StoredPost::new(collection, post.clone());
        let id = stored.id.clone();
        posts.push(stored);
        Ok(id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredPost>, StoreError> {
        self.check_online()?;
        let posts = self.posts.read().await;
        let mut matching: Vec<StoredPost> = posts
            .iter()
            .filter(|p| p.collection == collection)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.post.published_at.cmp(&a.post.published_at));
        Ok(matching)
    }

    async fn set_featured(&self, id: &str, featured: bool) -> Result<(), StoreError> {
        self.check_online()?;
        let mut posts = self.posts.write().await;
        let stored = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        stored.post.is_featured = featured;
        stored.updated_at = Utc::now();
        Ok(())
    }
}
