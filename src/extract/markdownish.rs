//! Lightweight HTML → Markdown-ish conversion for post bodies.
//!
//! This is intentionally narrow: line breaks, paragraphs, headings and list
//! items survive as text structure, every other tag is dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::decode_entities;

static BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static PARAGRAPH_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</p\s*>").unwrap());
static PARAGRAPH_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p(\s[^>]*)?>").unwrap());
static HEADING_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h([1-6])(\s[^>]*)?>").unwrap());
static HEADING_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</h[1-6]\s*>").unwrap());
static LIST_ITEM_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li(\s[^>]*)?>").unwrap());
static LIST_ITEM_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</li\s*>").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static NBSP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)&nbsp;").unwrap());

/// Convert the inner HTML of a post body to Markdown-ish plain text.
pub fn html_to_markdownish(html: &str) -> String {
    let text = BREAK.replace_all(html, "\n");
    let text = PARAGRAPH_CLOSE.replace_all(&text, "\n\n");
    let text = PARAGRAPH_OPEN.replace_all(&text, "");
    let text = HEADING_OPEN.replace_all(&text, |caps: &regex::Captures| {
        let level = caps[1].parse::<usize>().unwrap_or(1);
        format!("\n{} ", "#".repeat(level))
    });
    let text = HEADING_CLOSE.replace_all(&text, "\n");
    let text = LIST_ITEM_OPEN.replace_all(&text, "- ");
    let text = LIST_ITEM_CLOSE.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = NBSP.replace_all(&text, " ");

    decode_entities(&text).trim().to_string()
}

/// Strip tags and collapse whitespace, for single-line values like titles.
pub fn inline_text(html: &str) -> String {
    let text = ANY_TAG.replace_all(html, "");
    let text = NBSP.replace_all(&text, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_breaks() {
        assert_eq!(
            html_to_markdownish("<p>पहला<br/>दूसरा</p><p class=\"x\">तीसरा</p>"),
            "पहला\nदूसरा\n\nतीसरा"
        );
    }

    #[test]
    fn test_headings_and_lists() {
        let html = "<h2>शीर्षक</h2><ul><li>एक</li><li class=\"b\">दो</li></ul>";
        assert_eq!(html_to_markdownish(html), "## शीर्षक\n- एक\n- दो");
    }

    #[test]
    fn test_other_tags_stripped_and_entities_decoded() {
        let html = "<div><span style=\"x\">A&nbsp;&amp;&nbsp;B</span> <b>&#2349;</b></div>";
        assert_eq!(html_to_markdownish(html), "A & B भ");
    }

    #[test]
    fn test_pre_and_link_tags_are_not_paragraphs() {
        assert_eq!(html_to_markdownish("<pre>code</pre><link rel=\"x\">"), "code");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_markdownish(""), "");
        assert_eq!(html_to_markdownish("<div> </div>"), "");
    }

    #[test]
    fn test_inline_text() {
        assert_eq!(
            inline_text("\n  <a href=\"/x\">भारत\n की</a>   <b>प्रगति</b> "),
            "भारत की प्रगति"
        );
    }

    #[test]
    fn test_inline_text_joins_split_words() {
        assert_eq!(inline_text("<b>भा</b>रत"), "भारत");
        assert_eq!(inline_text("<i>Diw</i><b>ali</b>&nbsp;2025"), "Diwali 2025");
    }
}
