//! Depth-balanced container extraction.
//!
//! Blogspot post bodies nest arbitrary `div`s (separators, embedded widgets,
//! formatting wrappers), so the closing tag of the container can only be
//! found by counting nesting depth.

use regex::RegexBuilder;

/// Outcome of looking up a container element by class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerLookup<'a> {
    /// Inner HTML of the container.
    Found(&'a str),
    /// No `class` attribute contains the marker.
    MarkerNotFound,
    /// The marker exists but no opening tag of the element precedes it.
    NoOpeningTag,
    /// Closing tags ran out before depth returned to zero.
    Unbalanced,
}

impl<'a> ContainerLookup<'a> {
    /// Inner HTML if the container was found.
    pub fn inner(&self) -> Option<&'a str> {
        match self {
            ContainerLookup::Found(inner) => Some(inner),
            _ => None,
        }
    }

    /// Short label for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerLookup::Found(_) => "found",
            ContainerLookup::MarkerNotFound => "marker_not_found",
            ContainerLookup::NoOpeningTag => "no_opening_tag",
            ContainerLookup::Unbalanced => "unbalanced",
        }
    }
}

/// Extract the inner HTML of the first `div` whose class contains
/// `marker_class`. Returns an empty string on any failure.
pub fn extract_balanced_container(html: &str, marker_class: &str) -> String {
    locate_container(html, "div", marker_class)
        .inner()
        .unwrap_or_default()
        .to_string()
}

/// Locate the element of type `tag` that carries a class containing
/// `marker_class` (case-insensitive) and return its inner HTML.
pub fn locate_container<'a>(html: &'a str, tag: &str, marker_class: &str) -> ContainerLookup<'a> {
    let pattern = format!(r#"class=["'][^"']*{}[^"']*["']"#, regex::escape(marker_class));
    let Ok(class_re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        return ContainerLookup::MarkerNotFound;
    };
    let Some(class_match) = class_re.find(html) else {
        return ContainerLookup::MarkerNotFound;
    };

    // ASCII lowercasing keeps byte offsets identical to `html`.
    let lower = html.to_ascii_lowercase();
    let tag = tag.to_ascii_lowercase();
    let open_pat = format!("<{}", tag);
    let close_pat = format!("</{}>", tag);

    let Some(open_start) = rfind_open_tag(&lower, &open_pat, class_match.start()) else {
        return ContainerLookup::NoOpeningTag;
    };

    let mut depth = 0usize;
    let mut cursor = open_start;
    let mut content_start = None;

    while cursor < lower.len() {
        let next_open = find_open_tag(&lower, &open_pat, cursor);
        let Some(next_close) = lower[cursor..].find(&close_pat).map(|i| i + cursor) else {
            break;
        };

        match next_open {
            Some(open) if open < next_close => {
                if depth == 0 {
                    let Some(gt) = lower[open..].find('>') else {
                        break;
                    };
                    content_start = Some(open + gt + 1);
                }
                depth += 1;
                cursor = open + 1;
            }
            _ => {
                depth = depth.saturating_sub(1);
                cursor = next_close + 1;
                if depth == 0 {
                    return match content_start {
                        Some(start) if start <= next_close => {
                            ContainerLookup::Found(&html[start..next_close])
                        }
                        _ => ContainerLookup::Unbalanced,
                    };
                }
            }
        }
    }

    ContainerLookup::Unbalanced
}

/// Whether the byte after an opening-tag prefix ends the tag name.
fn is_tag_boundary(lower: &str, after: usize) -> bool {
    match lower.as_bytes().get(after) {
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
        None => false,
    }
}

fn find_open_tag(lower: &str, open_pat: &str, from: usize) -> Option<usize> {
    let mut from = from;
    while let Some(rel) = lower.get(from..)?.find(open_pat) {
        let pos = from + rel;
        if is_tag_boundary(lower, pos + open_pat.len()) {
            return Some(pos);
        }
        from = pos + 1;
    }
    None
}

fn rfind_open_tag(lower: &str, open_pat: &str, before: usize) -> Option<usize> {
    let mut end = before;
    while let Some(pos) = lower.get(..end)?.rfind(open_pat) {
        if is_tag_boundary(lower, pos + open_pat.len()) {
            return Some(pos);
        }
        end = pos;
    }
    None
}
