//! Diesel ORM models for database tables.

use diesel::prelude::*;

use crate::schema;

/// Post record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostRecord {
    pub id: String,
    pub collection: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub tags: String,
    pub published_at: String,
    pub is_published: i32,
    pub is_featured: i32,
    pub reading_time: i32,
    pub source_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// New post for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::posts)]
pub struct NewPost<'a> {
    pub id: &'a str,
    pub collection: &'a str,
    pub title: &'a str,
    pub slug: &'a str,
    pub content: &'a str,
    pub excerpt: &'a str,
    pub category: &'a str,
    pub tags: &'a str,
    pub published_at: &'a str,
    pub is_published: i32,
    pub is_featured: i32,
    pub reading_time: i32,
    pub source_url: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}
