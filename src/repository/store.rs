//! Post store abstraction.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ImportedPost, LookupField, StoredPost};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Post already exists with {field} '{value}'")]
    Duplicate { field: &'static str, value: String },

    #[error("Post not found: {0}")]
    NotFound(String),
}

/// Document store holding imported posts, grouped into named collections.
///
/// Within a collection no two posts share a slug or a source URL.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Verify the store can be reached and used.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Find a post whose `field` equals `value` exactly.
    async fn find_by(
        &self,
        collection: &str,
        field: LookupField,
        value: &str,
    ) -> Result<Option<StoredPost>, StoreError>;

    /// Insert a new post and return its id.
    async fn insert(&self, collection: &str, post: &ImportedPost) -> Result<String, StoreError>;

    /// All posts in a collection, newest first.
    async fn list(&self, collection: &str) -> Result<Vec<StoredPost>, StoreError>;

    /// Set or clear the featured flag on a post.
    async fn set_featured(&self, id: &str, featured: bool) -> Result<(), StoreError>;

    /// Find a stored post matching `post` by slug, then by source URL.
    async fn find_existing(
        &self,
        collection: &str,
        post: &ImportedPost,
    ) -> Result<Option<(LookupField, StoredPost)>, StoreError> {
        for field in [LookupField::Slug, LookupField::SourceUrl] {
            if let Some(existing) = self.find_by(collection, field, field.value_of(post)).await? {
                return Ok(Some((field, existing)));
            }
        }
        Ok(None)
    }
}
