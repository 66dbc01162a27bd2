//! Post title cleanup.

use regex::{Regex, RegexBuilder};

use super::decode_entities;

/// Placeholder used when no usable title can be extracted.
pub const UNTITLED: &str = "Untitled Post";

/// Decode entities and strip a leading author signature such as
/// `mritunjay13 ✍️ : `.
///
/// The signature is the handle followed by anything up to and including the
/// first colon (emoji, variation selectors, stray entity remnants). A title
/// that starts with the handle but has no colon is left as is.
pub fn clean_title(raw: &str, handle: &str) -> String {
    let decoded = decode_entities(raw);
    let trimmed = decoded.trim();

    if handle.is_empty() {
        return trimmed.to_string();
    }

    match signature_pattern(handle) {
        Some(re) => re.replace(trimmed, "").trim().to_string(),
        None => trimmed.to_string(),
    }
}

fn signature_pattern(handle: &str) -> Option<Regex> {
    RegexBuilder::new(&format!(r"^{}[^:]*:", regex::escape(handle)))
        .case_insensitive(true)
        .build()
        .ok()
}
