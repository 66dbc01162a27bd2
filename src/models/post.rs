//! Imported and stored blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default category when neither tags nor keywords give one.
pub const DEFAULT_CATEGORY: &str = "General";

/// A normalized post built from one source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
    pub category: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub is_featured: bool,
    /// Minutes, at least 1.
    pub reading_time: u32,
    pub source_url: String,
}

impl ImportedPost {
    /// Whether body extraction produced nothing.
    pub fn has_empty_content(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A post as held by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPost {
    pub id: String,
    pub collection: String,
    #[serde(flatten)]
    pub post: ImportedPost,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredPost {
    /// Wrap a freshly imported post with a new id and timestamps.
    pub fn new(collection: &str, post: ImportedPost) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            collection: collection.to_string(),
            post,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields a stored post can be looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    Slug,
    SourceUrl,
}

impl LookupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupField::Slug => "slug",
            LookupField::SourceUrl => "sourceUrl",
        }
    }

    /// Value of this field on `post`.
    pub fn value_of<'a>(&self, post: &'a ImportedPost) -> &'a str {
        match self {
            LookupField::Slug => &post.slug,
            LookupField::SourceUrl => &post.source_url,
        }
    }
}
