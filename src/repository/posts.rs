//! Diesel-based post store for SQLite.
//!
//! Uses diesel-async's SyncConnectionWrapper to provide an async interface
//! while maintaining Diesel's compile-time query checking.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{NewPost, PostRecord};
use super::pool::SqlitePool;
use super::store::{PostStore, StoreError};
use super::util::parse_datetime;
use crate::models::{ImportedPost, LookupField, StoredPost};
use crate::schema::posts;

/// Convert a database record to a domain model.
impl From<PostRecord> for StoredPost {
    fn from(record: PostRecord) -> Self {
        StoredPost {
            id: record.id,
            collection: record.collection,
            post: ImportedPost {
                title: record.title,
                content: record.content,
                excerpt: record.excerpt,
                slug: record.slug,
                published_at: parse_datetime(&record.published_at),
                category: record.category,
                tags: serde_json::from_str(&record.tags).unwrap_or_default(),
                is_published: record.is_published != 0,
                is_featured: record.is_featured != 0,
                reading_time: record.reading_time.max(1) as u32,
                source_url: record.source_url,
            },
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Diesel-based post store.
#[derive(Clone)]
pub struct DieselPostStore {
    pool: SqlitePool,
}

impl DieselPostStore {
    /// Create a new store with an existing pool. Migrations must already have
    /// been applied.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of posts in a collection.
    pub async fn count(&self, collection: &str) -> Result<i64, StoreError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = posts::table
            .filter(posts::collection.eq(collection))
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl PostStore for DieselPostStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", self.pool.database_url(), e)))?;

        // Also fails when migrations have not been run.
        use diesel::dsl::count_star;
        posts::table
            .select(count_star())
            .first::<i64>(&mut conn)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }

    async fn find_by(
        &self,
        collection: &str,
        field: LookupField,
        value: &str,
    ) -> Result<Option<StoredPost>, StoreError> {
        let mut conn = self.pool.get().await?;

        let record = match field {
            LookupField::Slug => {
                posts::table
                    .filter(posts::collection.eq(collection))
                    .filter(posts::slug.eq(value))
                    .first::<PostRecord>(&mut conn)
                    .await
                    .optional()?
            }
            LookupField::SourceUrl => {
                posts::table
                    .filter(posts::collection.eq(collection))
                    .filter(posts::source_url.eq(value))
                    .first::<PostRecord>(&mut conn)
                    .await
                    .optional()?
            }
        };

        Ok(record.map(StoredPost::from))
    }

    async fn insert(&self, collection: &str, post: &ImportedPost) -> Result<String, StoreError> {
        let mut conn = self.pool.get().await?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let tags = serde_json::to_string(&post.tags)?;
        let published_at = post.published_at.to_rfc3339();

        let new_post = NewPost {
            id: &id,
            collection,
            title: &post.title,
            slug: &post.slug,
            content: &post.content,
            excerpt: &post.excerpt,
            category: &post.category,
            tags: &tags,
            published_at: &published_at,
            is_published: post.is_published as i32,
            is_featured: post.is_featured as i32,
            reading_time: post.reading_time as i32,
            source_url: &post.source_url,
            created_at: &now,
            updated_at: &now,
        };

        diesel::insert_into(posts::table)
            .values(&new_post)
            .execute(&mut conn)
            .await?;

        Ok(id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredPost>, StoreError> {
        let mut conn = self.pool.get().await?;

        posts::table
            .filter(posts::collection.eq(collection))
            .order(posts::published_at.desc())
            .load::<PostRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(StoredPost::from).collect())
            .map_err(StoreError::from)
    }

    async fn set_featured(&self, id: &str, featured: bool) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        let now = Utc::now().to_rfc3339();

        let rows = diesel::update(posts::table.find(id))
            .set((
                posts::is_featured.eq(featured as i32),
                posts::updated_at.eq(&now),
            ))
            .execute(&mut conn)
            .await?;

        if rows == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
