use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0002_post_lookup_indexes")
        .depends_on(&["0001_posts"])
        .operation(
            RunSql::portable().for_backend(
                "sqlite",
                r#"CREATE UNIQUE INDEX IF NOT EXISTS idx_posts_collection_slug ON posts(collection, slug);
CREATE UNIQUE INDEX IF NOT EXISTS idx_posts_collection_source_url ON posts(collection, source_url);
CREATE INDEX IF NOT EXISTS idx_posts_published_at ON posts(collection, published_at)"#,
            ),
        )
}
