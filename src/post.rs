//! Post fetching: one post URL → one normalized [`ImportedPost`].

use std::sync::{Arc, LazyLock};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use tracing::{debug, warn};

use crate::extract::{extract_content, extract_published_at, extract_tags, extract_title};
use crate::http_client::{FetchError, PageSource};
use crate::models::{ImportedPost, DEFAULT_CATEGORY};
use crate::normalize::{
    calculate_reading_time, create_excerpt, generate_slug_with_max, DEFAULT_EXCERPT_LEN,
    DEFAULT_SLUG_MAX_LEN,
};

static URL_YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d{4})/(\d{2})/").unwrap());

/// Content keywords used to infer a category when a post has no tags.
/// First matching row wins.
const CATEGORY_KEYWORDS: &[(&[&str], &str)] = &[
    (&["संस्कृति", "त्योहार"], "संस्कृति"),
    (&["इतिहास", "ऐतिहासिक"], "इतिहास"),
    (&["राजनीति", "सरकार"], "राजनीति"),
];

/// Fetches post pages and assembles them into [`ImportedPost`]s.
pub struct PostFetcher {
    source: Arc<dyn PageSource>,
    author_handle: String,
    slug_max_len: usize,
}

impl PostFetcher {
    pub fn new(source: Arc<dyn PageSource>, author_handle: &str) -> Self {
        Self {
            source,
            author_handle: author_handle.to_string(),
            slug_max_len: DEFAULT_SLUG_MAX_LEN,
        }
    }

    pub fn with_slug_max_len(mut self, max_len: usize) -> Self {
        self.slug_max_len = max_len;
        self
    }

    /// Fetch and assemble a post, or `None` if the page could not be
    /// fetched. The cause is logged.
    pub async fn fetch_post(&self, url: &str) -> Option<ImportedPost> {
        match self.try_fetch_post(url).await {
            Ok(post) => Some(post),
            Err(e) => {
                warn!("Failed to fetch post {}: {}", url, e);
                None
            }
        }
    }

    /// Fetch and assemble a post.
    ///
    /// Transport errors, timeouts, non-2xx statuses and non-text content are
    /// errors. Extraction problems are not: the post is built with a
    /// placeholder title or empty content.
    pub async fn try_fetch_post(&self, url: &str) -> Result<ImportedPost, FetchError> {
        let page = self
            .source
            .fetch_page(url)
            .await?
            .ensure_success()?
            .ensure_text()?;

        Ok(self.assemble(url, &page.body))
    }

    /// Build a post from already-fetched HTML.
    pub fn assemble(&self, url: &str, html: &str) -> ImportedPost {
        let title = extract_title(html, &self.author_handle);
        let content = extract_content(html);
        if content.value.is_empty() {
            warn!("No content extracted from {} ({})", url, content.summary());
        } else {
            debug!("Extracted {} ({})", url, content.summary());
        }

        let tags = extract_tags(html);
        let category = infer_category(&tags, &content.value);
        let published_at = extract_published_at(html)
            .or_else(|| date_from_url(url))
            .unwrap_or_else(Utc::now);

        let content = content.value;
        ImportedPost {
            excerpt: create_excerpt(&content, DEFAULT_EXCERPT_LEN),
            slug: generate_slug_with_max(&title.value, self.slug_max_len),
            reading_time: calculate_reading_time(&content),
            title: title.value,
            content,
            published_at,
            category,
            tags,
            is_published: true,
            is_featured: false,
            source_url: url.to_string(),
        }
    }
}

/// First tag, else the first keyword row found in the content, else
/// [`DEFAULT_CATEGORY`].
pub fn infer_category(tags: &[String], content: &str) -> String {
    if let Some(first) = tags.first() {
        return first.clone();
    }

    CATEGORY_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| content.contains(k)))
        .map(|(_, category)| category.to_string())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Day 15 of the `/{year}/{month}/` in the URL, midnight UTC.
pub fn date_from_url(url: &str) -> Option<DateTime<Utc>> {
    let caps = URL_YEAR_MONTH.captures(url)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, 15)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
