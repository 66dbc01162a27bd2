//! HTML entity decoding.

use std::sync::LazyLock;

use regex::{Match, Regex};

static DECIMAL_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d+);").expect("decimal entity regex should compile"));

static HEX_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#[xX]([0-9A-Fa-f]+);").expect("hex entity regex should compile")
});

/// Decode the named and numeric entities found in scraped Blogspot markup.
///
/// `&amp;` is decoded both first and last: archive titles are frequently
/// double-encoded (`&amp;#2366;`), and numeric decoding can surface a literal
/// `&amp;` that was itself escaped markup.
///
/// A high surrogate entity directly followed by a low surrogate entity is
/// joined into one code point (`&#55357;&#56911;` is 🙏). Numeric entities
/// that still do not name a valid code point are left verbatim.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let decoded = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'");

    let decoded = decode_numeric(&decoded, &DECIMAL_ENTITY, 10);
    let decoded = decode_numeric(&decoded, &HEX_ENTITY, 16);

    decoded.replace("&amp;", "&")
}

/// Replace every `pattern` match (one capture holding the number in
/// `radix`) with the character it names.
fn decode_numeric(text: &str, pattern: &Regex, radix: u32) -> String {
    let entities: Vec<(Match<'_>, Option<u32>)> = pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((whole, u32::from_str_radix(&caps[1], radix).ok()))
        })
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut i = 0;
    while i < entities.len() {
        let (whole, value) = entities[i];
        out.push_str(&text[last..whole.start()]);
        last = whole.end();
        i += 1;

        if let (Some(high @ 0xD800..=0xDBFF), Some((next, Some(low @ 0xDC00..=0xDFFF)))) =
            (value, entities.get(i).copied())
        {
            if next.start() == whole.end() {
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                if let Some(c) = char::from_u32(combined) {
                    out.push(c);
                    last = next.end();
                    i += 1;
                    continue;
                }
            }
        }

        match value.and_then(char::from_u32) {
            Some(c) => out.push(c),
            None => out.push_str(whole.as_str()),
        }
    }
    out.push_str(&text[last..]);
    out
}
