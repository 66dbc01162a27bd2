mod m0001_posts;
mod m0002_post_lookup_indexes;

use cetane::prelude::MigrationRegistry;

pub fn registry() -> MigrationRegistry {
    let mut reg = MigrationRegistry::new();
    reg.register(m0001_posts::migration());
    reg.register(m0002_post_lookup_indexes::migration());
    reg
}
