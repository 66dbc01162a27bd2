//! Fetched page wrapper.

use reqwest::StatusCode;

use super::FetchError;

/// A fetched page. Transient: never persisted.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL that was requested.
    pub url: String,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl Page {
    /// Build a successful HTML page (used by in-memory page sources).
    pub fn html(url: &str, body: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            status: StatusCode::OK,
            content_type: Some("text/html; charset=UTF-8".to_string()),
            body: body.into(),
        }
    }

    /// Build a page with an explicit status and empty body.
    pub fn with_status(url: &str, status: StatusCode) -> Self {
        Self {
            url: url.to_string(),
            status,
            content_type: Some("text/html; charset=UTF-8".to_string()),
            body: String::new(),
        }
    }

    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the content type is textual. A missing header counts as text.
    pub fn is_text(&self) -> bool {
        match self.content_type.as_deref() {
            None => true,
            Some(ct) => {
                let ct = ct.to_ascii_lowercase();
                ct.starts_with("text/") || ct.contains("html") || ct.contains("xml")
            }
        }
    }

    /// Fail with [`FetchError::Status`] on a non-2xx status.
    pub fn ensure_success(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                status: self.status.as_u16(),
                reason: self
                    .status
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
            })
        }
    }

    /// Fail with [`FetchError::NotText`] on a binary content type.
    pub fn ensure_text(self) -> Result<Self, FetchError> {
        if self.is_text() {
            Ok(self)
        } else {
            Err(FetchError::NotText(
                self.content_type.unwrap_or_default(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_success() {
        let page = Page::html("https://example.com/", "<p>ok</p>");
        assert!(page.ensure_success().is_ok());

        let err = Page::with_status("https://example.com/", StatusCode::NOT_FOUND)
            .ensure_success()
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_ensure_text() {
        let mut page = Page::html("https://example.com/a.jpg", "");
        page.content_type = Some("image/jpeg".to_string());
        assert!(matches!(page.ensure_text(), Err(FetchError::NotText(ct)) if ct == "image/jpeg"));

        let mut page = Page::html("https://example.com/", "");
        page.content_type = None;
        assert!(page.ensure_text().is_ok());

        let mut page = Page::html("https://example.com/feed", "");
        page.content_type = Some("application/atom+xml".to_string());
        assert!(page.is_text());
    }
}
