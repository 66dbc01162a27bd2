//! lekh - imports a Blogspot-hosted Hindi blog archive into a post store.
//!
//! The pipeline runs one way: [`archive::ArchiveLister`] finds post URLs for
//! an archive month, [`post::PostFetcher`] turns each page into an
//! [`models::ImportedPost`], and [`importer::ImportRunner`] deduplicates and
//! saves them through a [`repository::PostStore`].

pub mod archive;
pub mod cli;
pub mod config;
pub mod extract;
pub mod http_client;
pub mod importer;
pub mod migrations;
pub mod models;
pub mod normalize;
pub mod post;
pub mod repository;
pub mod schema;
