//! Archive listing: turn a `{year}/{month}` archive page into the set of post
//! URLs it links to.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{info, warn};

use crate::http_client::{FetchError, PageSource};
use crate::models::ArchivePeriod;

/// Post URLs found on one archive page.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveListing {
    pub period: ArchivePeriod,
    /// Unique URLs in first-seen order.
    pub urls: Vec<String>,
    /// Human-readable note on how the listing went.
    pub diagnostics: String,
}

impl ArchiveListing {
    fn empty(period: ArchivePeriod, diagnostics: String) -> Self {
        Self {
            period,
            urls: Vec::new(),
            diagnostics,
        }
    }
}

/// Lists candidate post URLs from archive pages of one blog.
pub struct ArchiveLister {
    source: Arc<dyn PageSource>,
    base_url: String,
    patterns: Vec<Regex>,
}

impl ArchiveLister {
    /// Create a lister for the blog at `base_url`. Only links back to the
    /// same host (and port, when given) are collected.
    pub fn new(source: Arc<dyn PageSource>, base_url: &str) -> Result<Self, FetchError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl(format!("{}: missing host", base_url)))?;
        let authority = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            source,
            base_url: base_url.trim_end_matches('/').to_string(),
            patterns: post_link_patterns(&authority)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the archive page for `period` and collect post URLs.
    ///
    /// Never fails: fetch problems yield an empty listing with the cause in
    /// `diagnostics`.
    pub async fn list_post_urls(&self, period: ArchivePeriod) -> ArchiveListing {
        let archive_url = period.archive_url(&self.base_url);
        info!("Fetching archive {}", archive_url);

        let page = match self.source.fetch_page(&archive_url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Archive {} failed: {}", period, e);
                return ArchiveListing::empty(period, format!("Error: {}", e));
            }
        };

        let page = match page.ensure_success() {
            Ok(page) => page,
            Err(e) => {
                warn!("Archive {} failed: {}", period, e);
                return ArchiveListing::empty(period, e.to_string());
            }
        };

        let urls = self.find_post_urls(&page.body);
        info!("Archive {}: {} post URL(s)", period, urls.len());

        ArchiveListing {
            period,
            diagnostics: format!(
                "HTML: {} chars, URLs found: {}",
                page.body.chars().count(),
                urls.len()
            ),
            urls,
        }
    }

    /// Union of all pattern matches in `html`, de-duplicated in first-seen
    /// order.
    pub fn find_post_urls(&self, html: &str) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(html) {
                if let Some(m) = caps.get(1) {
                    let url = m.as_str();
                    if !urls.iter().any(|u| u == url) {
                        urls.push(url.to_string());
                    }
                }
            }
        }
        urls
    }
}

/// Link patterns for post pages on `host` (`name` or `name:port`): double or single quoted `href`,
/// single-quoted `href`, and any quoted attribute value.
fn post_link_patterns(host: &str) -> Result<Vec<Regex>, FetchError> {
    let host = regex::escape(host);
    let post = format!(r"https?://{}/\d{{4}}/\d{{2}}/", host);

    [
        format!(r#"href=["']({}[^"']+\.html)["']"#, post),
        format!(r#"href='({}[^']+\.html)'"#, post),
        format!(r#"["']({}[^"'\s]+\.html)["']"#, post),
    ]
    .iter()
    .map(|pattern| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", host, e)))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::StaticPageSource;
    use reqwest::StatusCode;

    const BASE: &str = "https://example.blogspot.com";

    fn period() -> ArchivePeriod {
        ArchivePeriod::new(2025, 1).unwrap()
    }

    #[test]
    fn test_find_post_urls_unions_patterns() {
        let lister = ArchiveLister::new(Arc::new(StaticPageSource::new()), BASE).unwrap();
        let html = r#"
            <a href="https://example.blogspot.com/2025/01/first.html">1</a>
            <a href='https://example.blogspot.com/2025/01/second.html'>2</a>
            <div data-url="http://EXAMPLE.blogspot.com/2024/12/third.html"></div>
            <a href="https://example.blogspot.com/2025/01/first.html">again</a>
            <a href="https://other.blogspot.com/2025/01/foreign.html">x</a>
            <a href="https://example.blogspot.com/2025/01/">archive</a>
            <a href="https://example.blogspot.com/p/about.html">page</a>
        "#;
        assert_eq!(
            lister.find_post_urls(html),
            vec![
                "https://example.blogspot.com/2025/01/first.html",
                "https://example.blogspot.com/2025/01/second.html",
                "http://EXAMPLE.blogspot.com/2024/12/third.html",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_post_urls() {
        let source = StaticPageSource::new();
        source
            .insert_html(
                "https://example.blogspot.com/2025/01/",
                r#"<a href="https://example.blogspot.com/2025/01/a.html">a</a>"#,
            )
            .await;
        let lister = ArchiveLister::new(Arc::new(source), BASE).unwrap();

        let listing = lister.list_post_urls(period()).await;
        assert_eq!(listing.urls, vec!["https://example.blogspot.com/2025/01/a.html"]);
        assert!(listing.diagnostics.starts_with("HTML: "));
        assert!(listing.diagnostics.ends_with("URLs found: 1"));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let source = StaticPageSource::new();
        source
            .insert_status("https://example.blogspot.com/2025/01/", StatusCode::NOT_FOUND)
            .await;
        let lister = ArchiveLister::new(Arc::new(source), BASE).unwrap();

        let listing = lister.list_post_urls(period()).await;
        assert!(listing.urls.is_empty());
        assert_eq!(listing.diagnostics, "HTTP 404: Not Found");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let source = StaticPageSource::new();
        source
            .insert_failure("https://example.blogspot.com/2025/01/", "connection refused")
            .await;
        let lister = ArchiveLister::new(Arc::new(source), BASE).unwrap();

        let listing = lister.list_post_urls(period()).await;
        assert!(listing.urls.is_empty());
        assert_eq!(listing.diagnostics, "Error: connection refused");
    }

    #[tokio::test]
    async fn test_page_without_links() {
        let source = StaticPageSource::new();
        source
            .insert_html("https://example.blogspot.com/2025/01/", "<p>कुछ नहीं</p>")
            .await;
        let lister = ArchiveLister::new(Arc::new(source), BASE).unwrap();

        let listing = lister.list_post_urls(period()).await;
        assert!(listing.urls.is_empty());
        assert_eq!(listing.diagnostics, "HTML: 15 chars, URLs found: 0");
    }

    #[test]
    fn test_base_url_with_port() {
        let lister = ArchiveLister::new(
            Arc::new(StaticPageSource::new()),
            "http://localhost:8080",
        )
        .unwrap();
        let html = r#"
            <a href="http://localhost:8080/2025/01/a.html">a</a>
            <a href="http://localhost/2025/01/b.html">b</a>
            <a href="http://localhost:9090/2025/01/c.html">c</a>
        "#;
        assert_eq!(
            lister.find_post_urls(html),
            vec!["http://localhost:8080/2025/01/a.html"]
        );
    }

    #[tokio::test]
    async fn test_list_post_urls_with_port() {
        let source = StaticPageSource::new();
        source
            .insert_html(
                "http://localhost:8080/2025/01/",
                r#"<a href="http://localhost:8080/2025/01/a.html">a</a>"#,
            )
            .await;
        let lister = ArchiveLister::new(Arc::new(source), "http://localhost:8080/").unwrap();

        let listing = lister.list_post_urls(period()).await;
        assert_eq!(listing.urls, vec!["http://localhost:8080/2025/01/a.html"]);
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ArchiveLister::new(Arc::new(StaticPageSource::new()), "not a url").is_err());
    }
}
