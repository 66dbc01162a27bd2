use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0001_posts")
        .operation(
            CreateTable::new("posts")
                .add_field(Field::new("id", FieldType::Text).primary_key())
                .add_field(Field::new("collection", FieldType::Text).not_null())
                .add_field(Field::new("title", FieldType::Text).not_null())
                .add_field(Field::new("slug", FieldType::Text).not_null())
                .add_field(Field::new("content", FieldType::Text).not_null())
                .add_field(Field::new("excerpt", FieldType::Text).not_null())
                .add_field(Field::new("category", FieldType::Text).not_null())
                .add_field(Field::new("tags", FieldType::Text).not_null().default("'[]'"))
                .add_field(Field::new("published_at", FieldType::Text).not_null())
                .add_field(Field::new("is_published", FieldType::Integer).not_null().default("1"))
                .add_field(Field::new("is_featured", FieldType::Integer).not_null().default("0"))
                .add_field(Field::new("reading_time", FieldType::Integer).not_null().default("1"))
                .add_field(Field::new("source_url", FieldType::Text).not_null())
                .add_field(Field::new("created_at", FieldType::Text).not_null())
                .add_field(Field::new("updated_at", FieldType::Text).not_null()),
        )
}
