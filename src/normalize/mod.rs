//! Text normalization for imported posts.
//!
//! Everything here is pure: entity decoding, title cleanup, slug generation,
//! excerpts and reading-time estimates. No I/O.

mod entities;
mod slug;
mod text;
mod title;

pub use entities::decode_entities;
pub use slug::{generate_slug, generate_slug_with_max, DEFAULT_SLUG_MAX_LEN};
pub use text::{
    calculate_reading_time, create_excerpt, DEFAULT_EXCERPT_LEN, WORDS_PER_MINUTE,
};
pub use title::{clean_title, UNTITLED};
