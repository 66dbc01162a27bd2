//! HTML content extraction for Blogspot post pages.
//!
//! Pure functions over page HTML: container lookup with nesting awareness,
//! Markdown-ish conversion, ordered title/content strategies and
//! selector-based metadata (tags, publication time).

mod container;
mod markdownish;
mod metadata;
mod strategies;

pub use container::{extract_balanced_container, locate_container, ContainerLookup};
pub use markdownish::{html_to_markdownish, inline_text};
pub use metadata::{extract_published_at, extract_tags, parse_timestamp};
pub use strategies::{
    extract_content, extract_title, ContentStrategy, Extraction, ExtractionAttempt, TitleStrategy,
};
