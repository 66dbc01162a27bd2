//! Selector-based lookup of post tags and publication timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use scraper::{Html, Selector};

use crate::normalize::decode_entities;

/// Selectors carrying a publication timestamp, paired with the attribute that
/// holds the value. Tried in order.
const DATE_SELECTORS: &[(&str, &str)] = &[
    ("abbr.published[title]", "title"),
    ("time[datetime]", "datetime"),
    ("[itemprop=\"datePublished\"][content]", "content"),
];

/// Tag labels from `rel="tag"` anchors, in document order, de-duplicated.
pub fn extract_tags(html: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(r#"a[rel~="tag"]"#) else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    let mut tags: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        let text: String = element.text().collect();
        let tag = decode_entities(text.trim()).trim().to_string();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Publication timestamp declared in the page markup, if any.
pub fn extract_published_at(html: &str) -> Option<DateTime<Utc>> {
    let document = Html::parse_document(html);

    for (selector_str, attr) in DATE_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            if let Some(date) = element.value().attr(attr).and_then(parse_timestamp) {
                return Some(date);
            }
        }
    }

    None
}

/// Parse the timestamp formats Blogspot templates emit.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(date.with_timezone(&Utc));
    }

    // "January 15, 2025" as rendered by older templates
    ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_tags_in_order_deduplicated() {
        let html = r#"
            <span class="post-labels">
              <a href="/search/label/इतिहास" rel="tag">इतिहास</a>,
              <a href="/search/label/x" rel="tag"> संस्कृति </a>,
              <a href="/search/label/इतिहास" rel="tag">इतिहास</a>
              <a href="/other">not a tag</a>
              <a href="/y" rel="nofollow tag"></a>
            </span>"#;
        assert_eq!(extract_tags(html), vec!["इतिहास", "संस्कृति"]);
    }

    #[test]
    fn test_no_tags() {
        assert!(extract_tags("<p>nothing</p>").is_empty());
    }

    #[test]
    fn test_published_from_abbr() {
        let html = r#"<abbr class="published" title="2025-01-13T09:30:00+05:30">Jan 13</abbr>"#;
        let date = extract_published_at(html).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 13);
        assert_eq!(date.hour(), 4);
    }

    #[test]
    fn test_published_from_time_and_itemprop() {
        let html = r#"<time datetime="2024-11-02T10:00:00Z">2 Nov</time>"#;
        assert_eq!(
            extract_published_at(html).unwrap().to_rfc3339(),
            "2024-11-02T10:00:00+00:00"
        );

        let html = r#"<meta itemprop="datePublished" content="2024-10-05T08:00:00.000-07:00">"#;
        assert_eq!(
            extract_published_at(html).unwrap().to_rfc3339(),
            "2024-10-05T15:00:00+00:00"
        );
    }

    #[test]
    fn test_long_form_date() {
        let date = parse_timestamp("January 15, 2025").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_unparseable_dates_ignored() {
        assert!(parse_timestamp("कल").is_none());
        assert!(extract_published_at(r#"<abbr class="published" title="soon">x</abbr>"#).is_none());
        assert!(extract_published_at("<p>no dates</p>").is_none());
    }
}
