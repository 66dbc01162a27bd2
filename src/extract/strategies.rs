//! Ordered title and content extraction strategies.
//!
//! Each strategy is tried in turn; the first one producing a usable value
//! wins. Every attempt is recorded so a failed extraction can be diagnosed
//! without re-fetching the page.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::container::locate_container;
use super::markdownish::{html_to_markdownish, inline_text};
use crate::normalize::{clean_title, UNTITLED};

static H3_POST_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<h3[^>]*class=["'][^"']*post-title[^"']*["'][^>]*>(.*?)</h3>"#).unwrap()
});
static H1_POST_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<h1[^>]*class=["'][^"']*post-title[^"']*["'][^>]*>(.*?)</h1>"#).unwrap()
});
static DOCUMENT_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

/// Where a post title can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStrategy {
    /// `<h3 class="post-title">`
    PostTitleH3,
    /// `<h1 class="post-title">`
    PostTitleH1,
    /// The document `<title>`.
    DocumentTitle,
}

impl TitleStrategy {
    /// Strategies in the order they are tried.
    pub const ORDER: [TitleStrategy; 3] = [
        TitleStrategy::PostTitleH3,
        TitleStrategy::PostTitleH1,
        TitleStrategy::DocumentTitle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleStrategy::PostTitleH3 => "h3.post-title",
            TitleStrategy::PostTitleH1 => "h1.post-title",
            TitleStrategy::DocumentTitle => "title",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            TitleStrategy::PostTitleH3 => &*H3_POST_TITLE,
            TitleStrategy::PostTitleH1 => &*H1_POST_TITLE,
            TitleStrategy::DocumentTitle => &*DOCUMENT_TITLE,
        }
    }

    /// Raw title text with tags stripped and whitespace collapsed.
    pub fn capture(&self, html: &str) -> Option<String> {
        let caps = self.pattern().captures(html)?;
        let text = inline_text(caps.get(1)?.as_str());
        (!text.is_empty()).then_some(text)
    }
}

/// Where post content can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStrategy {
    /// A `div` whose class contains the given marker.
    Container(&'static str),
}

impl ContentStrategy {
    /// Strategies in the order they are tried.
    pub const ORDER: [ContentStrategy; 2] = [
        ContentStrategy::Container("post-body"),
        ContentStrategy::Container("entry-content"),
    ];

    pub fn name(&self) -> String {
        match self {
            ContentStrategy::Container(marker) => format!("div.{}", marker),
        }
    }
}

/// Record of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionAttempt {
    pub strategy: String,
    pub outcome: String,
    /// Characters produced (0 on failure).
    pub chars: usize,
}

impl fmt::Display for ExtractionAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({} chars)", self.strategy, self.outcome, self.chars)
    }
}

/// Extracted value plus the attempts that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub value: String,
    pub attempts: Vec<ExtractionAttempt>,
}

impl Extraction {
    /// Attempts rendered on one line for logs.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Extract the post title. Falls back to [`UNTITLED`] when no strategy
/// yields a usable value.
pub fn extract_title(html: &str, author_handle: &str) -> Extraction {
    let mut attempts = Vec::new();

    for strategy in TitleStrategy::ORDER {
        let Some(raw) = strategy.capture(html) else {
            attempts.push(ExtractionAttempt {
                strategy: strategy.as_str().to_string(),
                outcome: "no match".to_string(),
                chars: 0,
            });
            continue;
        };

        let title = clean_title(&raw, author_handle);
        if title.is_empty() || title == UNTITLED {
            attempts.push(ExtractionAttempt {
                strategy: strategy.as_str().to_string(),
                outcome: "empty after cleanup".to_string(),
                chars: 0,
            });
            continue;
        }

        attempts.push(ExtractionAttempt {
            strategy: strategy.as_str().to_string(),
            outcome: "ok".to_string(),
            chars: title.chars().count(),
        });
        return Extraction {
            value: title,
            attempts,
        };
    }

    Extraction {
        value: UNTITLED.to_string(),
        attempts,
    }
}

/// Extract the post body as Markdown-ish text. The value is empty when every
/// strategy fails.
pub fn extract_content(html: &str) -> Extraction {
    let mut attempts = Vec::new();

    for strategy in ContentStrategy::ORDER {
        let ContentStrategy::Container(marker) = strategy;
        let lookup = locate_container(html, "div", marker);

        let Some(inner) = lookup.inner() else {
            attempts.push(ExtractionAttempt {
                strategy: strategy.name(),
                outcome: lookup.as_str().to_string(),
                chars: 0,
            });
            continue;
        };

        let content = html_to_markdownish(inner);
        if content.is_empty() {
            attempts.push(ExtractionAttempt {
                strategy: strategy.name(),
                outcome: "empty".to_string(),
                chars: 0,
            });
            continue;
        }

        attempts.push(ExtractionAttempt {
            strategy: strategy.name(),
            outcome: "ok".to_string(),
            chars: content.chars().count(),
        });
        return Extraction {
            value: content,
            attempts,
        };
    }

    Extraction {
        value: String::new(),
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDLE: &str = "mritunjay13";

    #[test]
    fn test_title_prefers_h3_post_title() {
        let html = r#"<title>Blog: Other</title>
            <h3 class="post-title entry-title" itemprop="name">
              mritunjay13 &#9997;&#65039; : भारत की प्रगति
            </h3>"#;
        let extraction = extract_title(html, HANDLE);
        assert_eq!(extraction.value, "भारत की प्रगति");
        assert_eq!(extraction.attempts.len(), 1);
        assert_eq!(extraction.attempts[0].strategy, "h3.post-title");
    }

    #[test]
    fn test_title_falls_through_to_document_title() {
        let html = r#"<html><head><title>लोहड़ी पर्व</title></head><body></body></html>"#;
        let extraction = extract_title(html, HANDLE);
        assert_eq!(extraction.value, "लोहड़ी पर्व");
        assert_eq!(extraction.attempts.len(), 3);
        assert_eq!(extraction.attempts[0].outcome, "no match");
    }

    #[test]
    fn test_title_split_by_inline_markup() {
        let html = r#"<h3 class="post-title"><b>भा</b>रत <i>दर्शन</i></h3>"#;
        assert_eq!(extract_title(html, HANDLE).value, "भारत दर्शन");
    }

    #[test]
    fn test_title_skips_values_empty_after_cleanup() {
        let html = r#"<h1 class="post-title">mritunjay13 :</h1><title>Real</title>"#;
        assert_eq!(extract_title(html, HANDLE).value, "Real");
    }

    #[test]
    fn test_title_placeholder() {
        let extraction = extract_title("<p>no title</p>", HANDLE);
        assert_eq!(extraction.value, UNTITLED);
        assert!(extraction.summary().contains("title: no match"));
    }

    #[test]
    fn test_content_from_post_body() {
        let html = r#"<div class="post-body entry-content"><p>पहला</p><div>अंदर</div></div>"#;
        let extraction = extract_content(html);
        assert_eq!(extraction.value, "पहला\n\nअंदर");
        assert_eq!(extraction.attempts[0].outcome, "ok");
    }

    #[test]
    fn test_content_falls_back_to_entry_content() {
        let html = r#"<div class="entry-content"><p>text</p></div>"#;
        let extraction = extract_content(html);
        assert_eq!(extraction.value, "text");
        assert_eq!(extraction.attempts[0].outcome, "marker_not_found");
        assert_eq!(extraction.attempts[1].strategy, "div.entry-content");
    }

    #[test]
    fn test_content_missing() {
        let extraction = extract_content("<div class=\"sidebar\">x</div>");
        assert!(extraction.value.is_empty());
        assert_eq!(extraction.attempts.len(), 2);
    }
}
