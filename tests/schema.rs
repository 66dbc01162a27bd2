//! Schema tests
//!
//! Verifies that the cetane migrations produce the posts table and the
//! per-collection lookup indexes the post store relies on.

use std::collections::BTreeMap;

use rusqlite::{Connection, Result as SqliteResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnInfo {
    col_type: String,
    not_null: bool,
    default_value: Option<String>,
    primary_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexInfo {
    columns: Vec<String>,
    unique: bool,
}

fn extract_columns(conn: &Connection, table: &str) -> SqliteResult<BTreeMap<String, ColumnInfo>> {
    let mut pragma = conn.prepare(&format!("PRAGMA table_info(\"{}\")", table))?;
    let rows = pragma.query_map([], |row| {
        Ok((
            row.get::<_, String>(1)?,
            ColumnInfo {
                col_type: row.get::<_, String>(2)?.to_uppercase(),
                not_null: row.get(3)?,
                default_value: row.get(4)?,
                primary_key: row.get::<_, i32>(5)? > 0,
            },
        ))
    })?;
    rows.collect()
}

fn extract_indexes(conn: &Connection) -> SqliteResult<BTreeMap<String, IndexInfo>> {
    let mut stmt = conn.prepare(
        "SELECT name, sql FROM sqlite_master WHERE type='index' AND sql IS NOT NULL ORDER BY name",
    )?;
    let named: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<SqliteResult<Vec<_>>>()?;

    let mut indexes = BTreeMap::new();
    for (name, sql) in named {
        let mut pragma = conn.prepare(&format!("PRAGMA index_info(\"{}\")", name))?;
        let columns: Vec<String> = pragma
            .query_map([], |row| row.get::<_, String>(2))?
            .collect::<SqliteResult<Vec<_>>>()?;
        indexes.insert(
            name,
            IndexInfo {
                columns,
                unique: sql.to_uppercase().contains("UNIQUE"),
            },
        );
    }
    Ok(indexes)
}

/// Run cetane migrations (generates SQL for SQLite backend)
fn run_cetane_migrations(conn: &Connection) -> SqliteResult<()> {
    use cetane::backend::Sqlite;

    let registry = lekh::migrations::registry();
    let backend = Sqlite;

    let ordered_names = registry
        .resolve_order()
        .expect("Failed to resolve migration order");

    for name in ordered_names {
        let migration = registry
            .get(name)
            .expect("Migration not found after resolve");
        for stmt in migration.forward_sql(&backend) {
            if stmt.trim().is_empty() {
                continue;
            }
            conn.execute_batch(&stmt)?;
        }
    }
    Ok(())
}

#[test]
fn test_posts_table_columns() {
    let conn = Connection::open_in_memory().expect("Failed to open DB");
    run_cetane_migrations(&conn).expect("Migrations failed");

    let columns = extract_columns(&conn, "posts").unwrap();
    let names: Vec<&str> = columns.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "category",
            "collection",
            "content",
            "created_at",
            "excerpt",
            "id",
            "is_featured",
            "is_published",
            "published_at",
            "reading_time",
            "slug",
            "source_url",
            "tags",
            "title",
            "updated_at",
        ]
    );

    assert!(columns["id"].primary_key);
    assert!(columns["slug"].not_null);
    assert!(columns["source_url"].not_null);
    assert!(columns["is_featured"].col_type.contains("INT"));
    assert!(columns["is_featured"]
        .default_value
        .as_deref()
        .is_some_and(|d| d.contains('0')));
    assert!(columns["is_published"]
        .default_value
        .as_deref()
        .is_some_and(|d| d.contains('1')));
}

#[test]
fn test_lookup_indexes_are_per_collection() {
    let conn = Connection::open_in_memory().expect("Failed to open DB");
    run_cetane_migrations(&conn).expect("Migrations failed");

    let indexes = extract_indexes(&conn).unwrap();

    let slug = &indexes["idx_posts_collection_slug"];
    assert!(slug.unique);
    assert_eq!(slug.columns, vec!["collection", "slug"]);

    let source = &indexes["idx_posts_collection_source_url"];
    assert!(source.unique);
    assert_eq!(source.columns, vec!["collection", "source_url"]);

    assert!(!indexes["idx_posts_published_at"].unique);
}

#[test]
fn test_unique_index_rejects_duplicate_slug() {
    let conn = Connection::open_in_memory().expect("Failed to open DB");
    run_cetane_migrations(&conn).expect("Migrations failed");

    let insert = "INSERT INTO posts (id, collection, title, slug, content, excerpt, category, \
                  published_at, source_url, created_at, updated_at) \
                  VALUES (?1, ?2, 't', ?3, '', '', 'General', '2025-01-15T00:00:00+00:00', ?4, \
                  '2025-01-15T00:00:00+00:00', '2025-01-15T00:00:00+00:00')";

    conn.execute(insert, ["1", "blogs", "a", "https://x/a.html"])
        .unwrap();
    assert!(conn
        .execute(insert, ["2", "blogs", "a", "https://x/b.html"])
        .is_err());
    // Same slug in another collection is fine.
    conn.execute(insert, ["3", "drafts", "a", "https://x/a.html"])
        .unwrap();
}
