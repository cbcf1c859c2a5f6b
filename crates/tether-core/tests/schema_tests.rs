#![allow(clippy::unwrap_used, clippy::expect_used)]

// Integration tests for model registration, catalog loading and eager
// association validation

mod common;

use common::{dog_models, dog_schema, dog_tables};
use tether_core::assoc::AssociationRegistry;
use tether_core::{
    Association, AssociationKind, BelongsToOptions, HasManyOptions, ModelDef, ModelDescriptor, Row,
    Schema, TetherError, Value,
};

fn build(models: Vec<ModelDef>, store: &common::FakeStore) -> Result<Schema, TetherError> {
    models
        .into_iter()
        .fold(Schema::builder(), |b, m| b.model(m))
        .build(store)
}

#[test]
fn test_catalog_fetched_once_per_model() {
    // Given: the dog fixture tables
    let store = dog_tables();

    // When: the schema is built and columns are read repeatedly
    let schema = dog_schema(&store);
    let first = schema.columns_of("Dog").unwrap();
    let second = schema.columns_of("Dog").unwrap();

    // Then: each table was described exactly once
    let mut described = store.described.borrow().clone();
    described.sort();
    assert_eq!(described, vec!["dogs", "houses", "humans"]);
    assert_eq!(first.as_ref(), ["id", "name", "owner_id"]);
    assert_eq!(first, second);
}

#[test]
fn test_default_and_explicit_table_names() {
    let store = dog_tables();
    let schema = dog_schema(&store);

    assert_eq!(schema.model("Dog").unwrap().table_name(), "dogs");
    assert_eq!(schema.model("House").unwrap().table_name(), "houses");
    assert_eq!(schema.model("Human").unwrap().table_name(), "humans");
}

#[test]
fn test_model_lookup_normalizes_names() {
    let store = dog_tables();
    let schema = dog_schema(&store);

    assert_eq!(schema.model("humans").unwrap().name(), "Human");
    assert_eq!(schema.model("dog").unwrap().name(), "Dog");

    let err = schema.model("Cat").unwrap_err();
    assert_eq!(
        err,
        TetherError::NameResolution {
            class_name: "Cat".to_string()
        }
    );
}

#[test]
fn test_declared_defaults_resolve() {
    let store = dog_tables();
    let schema = dog_schema(&store);

    let house = schema.model("House").unwrap();
    let Some(Association::HasMany(residents)) = house.associations().get("residents") else {
        panic!("residents should be a has_many");
    };
    assert_eq!(residents.foreign_key, "house_id");
    assert_eq!(residents.class_name, "Human");
    assert_eq!(residents.primary_key, "id");

    let dog = schema.model("Dog").unwrap();
    let home = dog.associations().get("home").unwrap();
    assert_eq!(
        schema.resolve_target_type(dog, home).unwrap().name(),
        "House"
    );
}

#[test]
fn test_unresolvable_class_fails_at_build() {
    // Given: Dog belongs to `owner` without a class override, so it targets `Owner`
    let store = dog_tables();
    let models = vec![
        ModelDef::new("Dog").belongs_to("owner", BelongsToOptions::new()),
        ModelDef::new("Human").table_name("humans"),
    ];

    // When/Then: building fails before any record exists
    let err = build(models, &store).unwrap_err();
    assert_eq!(
        err,
        TetherError::NameResolution {
            class_name: "Owner".to_string()
        }
    );
}

#[test]
fn test_missing_through_leg_fails_at_build() {
    let store = dog_tables();
    let models = vec![
        ModelDef::new("Dog")
            .belongs_to("owner", BelongsToOptions::new().class_name("Human"))
            .has_one_through("home", "owner", "house"),
        ModelDef::new("Human").table_name("humans"),
        ModelDef::new("House"),
    ];

    let err = build(models, &store).unwrap_err();
    assert_eq!(
        err,
        TetherError::MissingAssociation {
            model: "Human".to_string(),
            association: "house".to_string(),
        }
    );
}

#[test]
fn test_has_many_through_leg_rejected() {
    let store = dog_tables();
    let models = vec![
        ModelDef::new("Human")
            .table_name("humans")
            .has_many("dogs", HasManyOptions::new().foreign_key("owner_id"))
            .has_one_through("first_dog_owner", "dogs", "owner"),
        ModelDef::new("Dog").belongs_to("owner", BelongsToOptions::new().class_name("Human")),
    ];

    let err = build(models, &store).unwrap_err();
    assert!(matches!(
        err,
        TetherError::InvalidThrough { ref model, ref association, .. }
            if model == "Human" && association == "dogs"
    ));
}

#[test]
fn test_missing_key_column_fails_at_build() {
    // Given: a has_many whose default foreign key is not on the target table
    let store = dog_tables();
    let models = vec![
        ModelDef::new("Human")
            .table_name("humans")
            .has_many("dogs", HasManyOptions::new()),
        ModelDef::new("Dog"),
    ];

    let err = build(models, &store).unwrap_err();
    assert_eq!(
        err,
        TetherError::UnknownAttribute {
            model: "Dog".to_string(),
            column: "human_id".to_string(),
        }
    );
}

#[test]
fn test_missing_table_is_a_store_error() {
    let store = dog_tables();
    let err = build(vec![ModelDef::new("Cat")], &store).unwrap_err();
    assert!(matches!(err, TetherError::Store { .. }));
}

#[test]
fn test_redeclared_association_later_wins() {
    // Given: `owner` declared twice, the second time with a class override
    let store = dog_tables();
    let models = vec![
        ModelDef::new("Dog")
            .belongs_to("owner", BelongsToOptions::new().class_name("House"))
            .belongs_to("owner", BelongsToOptions::new().class_name("Human")),
        ModelDef::new("Human").table_name("humans"),
        ModelDef::new("House"),
    ];

    // When: the schema is built
    let schema = build(models, &store).unwrap();

    // Then: only the later declaration is registered
    let dog = schema.model("Dog").unwrap();
    assert_eq!(dog.associations().len(), 1);
    let owner = dog.associations().get("owner").unwrap();
    assert_eq!(owner.kind(), AssociationKind::BelongsTo);
    assert_eq!(owner.class_name(), Some("Human"));
}

#[test]
fn test_redefined_model_later_wins() {
    let store = dog_tables();
    let mut models = dog_models();
    models.push(ModelDef::new("House"));

    let schema = build(models, &store).unwrap();
    assert!(schema.model("House").unwrap().associations().is_empty());
    assert_eq!(schema.model_names(), vec!["Dog", "House", "Human"]);
}

#[test]
fn test_instantiate_rejects_unknown_column() {
    let store = dog_tables();
    let schema = dog_schema(&store);

    let row = Row::new().with("id", 1i64).with("color", "brown");
    let err = schema.instantiate("Dog", row).unwrap_err();
    assert_eq!(
        err,
        TetherError::UnknownAttribute {
            model: "Dog".to_string(),
            column: "color".to_string(),
        }
    );
}

#[test]
fn test_hydrated_values_round_trip() {
    // Given: a record built from a row
    let store = dog_tables();
    let schema = dog_schema(&store);
    let row = common::human_row(5, "Ned", Some(9));

    let mut human = schema.instantiate("Human", row.clone()).unwrap();

    // Then: every column reads back the row's value
    for (column, value) in row.iter() {
        assert_eq!(human.get(column).unwrap(), value);
    }

    // And: setting a column is visible without touching the store
    human.set("fname", "Eddard").unwrap();
    assert_eq!(
        human.get("fname").unwrap(),
        &Value::Text("Eddard".to_string())
    );
    assert!(store.executed.borrow().is_empty());
}

#[test]
fn test_unfinalized_descriptor_has_no_catalog() {
    // Given: a descriptor that was never finalized against a store
    let descriptor = ModelDescriptor::new("Dog", "dogs", AssociationRegistry::new());

    // Then: every catalog-dependent operation refuses to run
    assert!(!descriptor.is_finalized());
    let expected = TetherError::CatalogNotLoaded {
        model: "Dog".to_string(),
    };
    assert_eq!(descriptor.columns().unwrap_err(), expected);
    assert_eq!(descriptor.new_record().unwrap_err(), expected);

    // When: it is finalized
    let store = dog_tables();
    descriptor.finalize(&store).unwrap();
    descriptor.finalize(&store).unwrap();

    // Then: the catalog is available and was fetched once
    assert!(descriptor.is_finalized());
    assert_eq!(descriptor.columns().unwrap().len(), 3);
    assert_eq!(*store.described.borrow(), vec!["dogs"]);
}

#[test]
fn test_built_schema_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Schema>();
}
