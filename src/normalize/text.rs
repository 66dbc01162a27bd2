//! Excerpts and reading-time estimates.

/// Default excerpt length in characters.
pub const DEFAULT_EXCERPT_LEN: usize = 200;

/// Reading speed used for estimates.
pub const WORDS_PER_MINUTE: usize = 200;

const MARKDOWN_MARKERS: &[char] = &['#', '*', '_', '[', ']', '(', ')'];

/// Build a plain-text excerpt of at most `max_len` characters (plus `...`).
pub fn create_excerpt(content: &str, max_len: usize) -> String {
    let plain: String = content
        .chars()
        .filter(|c| !MARKDOWN_MARKERS.contains(c))
        .collect();
    let plain = plain.trim();

    if plain.chars().count() <= max_len {
        return plain.to_string();
    }

    let truncated: String = plain.chars().take(max_len).collect();
    format!("{}...", truncated.trim_end())
}

/// Estimated reading time in whole minutes, never less than one.
pub fn calculate_reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}
