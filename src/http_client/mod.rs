//! HTTP access to the source blog.
//!
//! Everything that reads pages goes through [`PageSource`] so the archive
//! lister and post fetcher can run against canned pages in tests.

mod response;
mod static_source;
mod user_agent;

pub use response::Page;
pub use static_source::StaticPageSource;
pub use user_agent::{resolve_user_agent, ACCEPT_HTML, USER_AGENT};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("unexpected content type: {0}")]
    NotText(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection-level failure reported by a non-reqwest source.
    #[error("{0}")]
    Transport(String),
}

/// Source of HTML pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a page. Non-2xx responses are returned as pages, not errors;
    /// callers decide how to treat them.
    async fn fetch_page(&self, url: &str) -> Result<Page, FetchError>;
}

/// reqwest-backed page source with a browser-like user agent.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    accept: String,
}

/// Builder for constructing `HttpClient` with optional configuration.
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    accept: Option<String>,
}

impl HttpClientBuilder {
    /// Set the user agent string. Without this, a desktop Chrome user agent
    /// is used.
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_string());
        self
    }

    /// Override the Accept header.
    pub fn accept(mut self, accept: &str) -> Self {
        self.accept = Some(accept.to_string());
        self
    }

    /// Build the `HttpClient`.
    pub fn build(self) -> Result<HttpClient, String> {
        let user_agent = resolve_user_agent(self.user_agent.as_deref());

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(HttpClient {
            client,
            timeout: self.timeout,
            accept: self.accept.unwrap_or_else(|| ACCEPT_HTML.to_string()),
        })
    }
}

impl HttpClient {
    /// Create a builder. The timeout bounds every request; hitting it is a
    /// fetch failure.
    pub fn builder(timeout: Duration) -> HttpClientBuilder {
        HttpClientBuilder {
            timeout,
            user_agent: None,
            accept: None,
        }
    }

    /// Request timeout configured for this client.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Http(err)
        }
    }

    /// Make a GET request and read the body as text.
    pub async fn get(&self, url: &str) -> Result<Page, FetchError> {
        url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .header(ACCEPT, &self.accept)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.text().await.map_err(|e| self.classify(e))?;

        debug!(
            "GET {} -> {} ({} bytes, {}ms)",
            url,
            status.as_u16(),
            body.len(),
            started.elapsed().as_millis()
        );

        Ok(Page {
            url: url.to_string(),
            status,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(&self, url: &str) -> Result<Page, FetchError> {
        self.get(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = HttpClient::builder(Duration::from_secs(5)).build().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert_eq!(client.accept, ACCEPT_HTML);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_request() {
        let client = HttpClient::builder(Duration::from_secs(5)).build().unwrap();
        let err = client.fetch_page("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = FetchError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
        assert_eq!(
            FetchError::Timeout(Duration::from_secs(30)).to_string(),
            "request timed out after 30s"
        );
    }
}
