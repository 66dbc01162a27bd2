//! In-memory page source.
//!
//! Serves canned pages keyed by URL and records every request. Used for
//! offline runs and tests; unknown URLs answer 404.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::RwLock;

use super::{FetchError, Page, PageSource};

/// Canned response for a URL.
#[derive(Debug, Clone)]
enum Canned {
    Page(Page),
    Failure(String),
}

/// In-memory page source.
#[derive(Clone, Default)]
pub struct StaticPageSource {
    pages: Arc<RwLock<HashMap<String, Canned>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` as a 200 HTML page at `url`.
    pub async fn insert_html(&self, url: &str, body: impl Into<String>) {
        self.insert_page(Page::html(url, body)).await;
    }

    /// Serve a fully specified page.
    pub async fn insert_page(&self, page: Page) {
        let mut pages = self.pages.write().await;
        pages.insert(page.url.clone(), Canned::Page(page));
    }

    /// Answer `url` with the given status and an empty body.
    pub async fn insert_status(&self, url: &str, status: StatusCode) {
        self.insert_page(Page::with_status(url, status)).await;
    }

    /// Make requests for `url` fail at the transport level.
    pub async fn insert_failure(&self, url: &str, cause: &str) {
        let mut pages = self.pages.write().await;
        pages.insert(url.to_string(), Canned::Failure(cause.to_string()));
    }

    /// URLs requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl PageSource for StaticPageSource {
    async fn fetch_page(&self, url: &str) -> Result<Page, FetchError> {
        self.requests.write().await.push(url.to_string());

        let pages = self.pages.read().await;
        match pages.get(url) {
            Some(Canned::Page(page)) => Ok(page.clone()),
            Some(Canned::Failure(cause)) => Err(FetchError::Transport(cause.clone())),
            None => Ok(Page::with_status(url, StatusCode::NOT_FOUND)),
        }
    }
}
