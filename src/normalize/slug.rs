//! Slug generation with Devanagari transliteration.

use chrono::Utc;

/// Default maximum slug length.
pub const DEFAULT_SLUG_MAX_LEN: usize = 80;

/// Lossy Devanagari → Latin table. Characters not listed here (and not ASCII
/// alphanumeric or a separator) are dropped.
const TRANSLITERATION: &[(char, &str)] = &[
    // Independent vowels
    ('अ', "a"),
    ('आ', "aa"),
    ('इ', "i"),
    ('ई', "ee"),
    ('उ', "u"),
    ('ऊ', "oo"),
    ('ए', "e"),
    ('ऐ', "ai"),
    ('ओ', "o"),
    ('औ', "au"),
    ('ऋ', "ri"),
    // Consonants
    ('क', "k"),
    ('ख', "kh"),
    ('ग', "g"),
    ('घ', "gh"),
    ('ङ', "n"),
    ('च', "ch"),
    ('छ', "chh"),
    ('ज', "j"),
    ('झ', "jh"),
    ('ञ', "n"),
    ('ट', "t"),
    ('ठ', "th"),
    ('ड', "d"),
    ('ढ', "dh"),
    ('ण', "n"),
    ('त', "t"),
    ('थ', "th"),
    ('द', "d"),
    ('ध', "dh"),
    ('न', "n"),
    ('प', "p"),
    ('फ', "ph"),
    ('ब', "b"),
    ('भ', "bh"),
    ('म', "m"),
    ('य', "y"),
    ('र', "r"),
    ('ल', "l"),
    ('व', "v"),
    ('श', "sh"),
    ('ष', "sh"),
    ('स', "s"),
    ('ह', "h"),
    // Vowel signs
    ('ा', "a"),
    ('ि', "i"),
    ('ी', "ee"),
    ('ु', "u"),
    ('ू', "oo"),
    ('े', "e"),
    ('ै', "ai"),
    ('ो', "o"),
    ('ौ', "au"),
    ('ृ', "ri"),
    // Anusvara, visarga, virama, nukta
    ('ं', "n"),
    ('ः', "h"),
    ('्', ""),
    ('़', ""),
    // Danda marks
    ('।', ""),
    ('॥', ""),
];

fn transliterate(c: char) -> Option<&'static str> {
    TRANSLITERATION
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Generate a URL slug from a (typically Hindi) title.
pub fn generate_slug(title: &str) -> String {
    generate_slug_with_max(title, DEFAULT_SLUG_MAX_LEN)
}

/// Generate a slug of at most `max_len` characters.
///
/// Output only contains `[a-z0-9-]`, never starts or ends with a hyphen and
/// never contains two hyphens in a row. Titles with nothing transliterable
/// fall back to `untitled-<epoch millis>`.
pub fn generate_slug_with_max(title: &str, max_len: usize) -> String {
    let mut raw = String::with_capacity(title.len());
    for c in title.chars() {
        if let Some(latin) = transliterate(c) {
            raw.push_str(latin);
        } else if c.is_ascii_alphanumeric() {
            raw.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            raw.push('-');
        }
    }

    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }

    // Only ASCII remains, so byte truncation is safe.
    slug.truncate(max_len);
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        format!("untitled-{}", Utc::now().timestamp_millis())
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(slug: &str) -> bool {
        !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[test]
    fn test_hindi_title() {
        assert_eq!(generate_slug("भारत का उदय"), "bhart-ka-udy");
        assert_eq!(generate_slug("नमस्ते"), "nmste");
    }

    #[test]
    fn test_mixed_script_and_punctuation() {
        assert_eq!(
            generate_slug("Digital India: डिजिटल भारत!"),
            "digital-india-dijitl-bhart"
        );
        assert_eq!(generate_slug("  --Hello   World--  "), "hello-world");
    }

    #[test]
    fn test_danda_and_unknown_chars_dropped() {
        assert_eq!(generate_slug("सत्य । ॥ ✂️"), "sty");
    }

    #[test]
    fn test_truncation_never_leaves_trailing_hyphen() {
        let slug = generate_slug_with_max("abcd efgh", 5);
        assert_eq!(slug, "abcd");

        let long = "शब्द ".repeat(40);
        let slug = generate_slug(&long);
        assert!(slug.len() <= DEFAULT_SLUG_MAX_LEN);
        assert!(is_well_formed(&slug));
    }

    #[test]
    fn test_deterministic() {
        let title = "लोहड़ी और दुल्ला भट्टी: एक ऐतिहासिक परिप्रेक्ष्य";
        assert_eq!(generate_slug(title), generate_slug(title));
        assert!(is_well_formed(&generate_slug(title)));
    }

    #[test]
    fn test_untitled_fallback() {
        let slug = generate_slug("✂️ 🚩 !!!");
        assert!(slug.starts_with("untitled-"));
        assert!(is_well_formed(&slug));
    }
}
