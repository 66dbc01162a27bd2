//! Data models for lekh.

mod archive;
mod post;

pub use archive::{ArchivePeriod, PeriodParseError};
pub use post::{ImportedPost, LookupField, StoredPost, DEFAULT_CATEGORY};
