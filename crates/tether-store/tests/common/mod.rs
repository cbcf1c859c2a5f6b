use std::path::PathBuf;

use tether_core::{BelongsToOptions, HasManyOptions, ModelDef, Schema};
use tether_store::{bootstrap, SqliteStore};

#[allow(dead_code)]
pub const DOGS_SQL: &str = include_str!("../../fixtures/dogs.sql");

/// Path of the dogs fixture script
#[allow(dead_code)]
pub fn dogs_sql_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/dogs.sql")
}

/// In-memory database loaded with the dogs fixture
#[allow(dead_code)]
pub fn dog_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("Failed to create in-memory database");
    store.configure(true).unwrap();
    bootstrap::apply_schema(&store, DOGS_SQL).unwrap();
    store
}

/// Dog, Human and House registered against `store`
#[allow(dead_code)]
pub fn dog_schema(store: &SqliteStore) -> Schema {
    Schema::builder()
        .model(
            ModelDef::new("Dog")
                .belongs_to("owner", BelongsToOptions::new().class_name("Human"))
                .has_one_through("home", "owner", "house"),
        )
        .model(
            ModelDef::new("Human")
                .table_name("humans")
                .belongs_to("house", BelongsToOptions::new())
                .has_many("dogs", HasManyOptions::new().foreign_key("owner_id")),
        )
        .model(
            ModelDef::new("House")
                .has_many("residents", HasManyOptions::new().class_name("Human")),
        )
        .build(store)
        .unwrap()
}
