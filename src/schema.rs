// Kept in sync with src/migrations by hand.

diesel::table! {
    posts (id) {
        id -> Text,
        collection -> Text,
        title -> Text,
        slug -> Text,
        content -> Text,
        excerpt -> Text,
        category -> Text,
        tags -> Text,
        published_at -> Text,
        is_published -> Integer,
        is_featured -> Integer,
        reading_time -> Integer,
        source_url -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}
