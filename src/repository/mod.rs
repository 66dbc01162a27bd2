//! Repository layer for post persistence.
//!
//! [`PostStore`] is the seam the import runner writes through. Two
//! implementations: an in-memory store and a Diesel-backed SQLite store.

pub mod memory;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod posts;
pub mod store;
pub mod util;

pub use memory::InMemoryPostStore;
pub use migrations::run_migrations;
pub use pool::{DbError, SqliteConn, SqlitePool};
pub use posts::DieselPostStore;
pub use store::{PostStore, StoreError};
