#![allow(clippy::unwrap_used, clippy::expect_used)]

// End-to-end association traversal against the dogs fixture in SQLite

mod common;

use common::{dog_schema, dog_store};
use tether_core::{PredicateMap, Record, Session, TetherError, Value};

fn text(record: &Record, column: &str) -> String {
    record.get(column).unwrap().as_str().unwrap().to_string()
}

#[test]
fn test_catalog_matches_table_columns() {
    let store = dog_store();
    let schema = dog_schema(&store);

    assert_eq!(schema.columns_of("Dog").unwrap().as_ref(), ["id", "name", "owner_id"]);
    assert_eq!(
        schema.columns_of("Human").unwrap().as_ref(),
        ["id", "fname", "lname", "house_id"]
    );
    assert_eq!(schema.columns_of("House").unwrap().as_ref(), ["id", "address"]);
}

#[test]
fn test_dog_owner_and_home() {
    // Given: Haskell, owned by Ned, who lives at Dolores and Market
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);
    let haskell = session.find("Dog", 3).unwrap().unwrap();

    // When: both single-valued associations are followed
    let owner = session.belongs_to(&haskell, "owner").unwrap().unwrap();
    let home = session.has_one_through(&haskell, "home").unwrap().unwrap();

    // Then: the owner and the owner's house come back
    assert_eq!(owner.model_name(), "Human");
    assert_eq!(text(&owner, "fname"), "Ned");
    assert_eq!(home.model_name(), "House");
    assert_eq!(text(&home, "address"), "Dolores and Market");
}

#[test]
fn test_home_matches_two_step_traversal() {
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);

    for dog in session.all("Dog").unwrap() {
        let via_join = session.has_one_through(&dog, "home").unwrap();
        let via_owner = match session.belongs_to(&dog, "owner").unwrap() {
            Some(owner) => session.belongs_to(&owner, "house").unwrap(),
            None => None,
        };
        assert_eq!(via_join, via_owner, "dog {:?}", dog.id());
    }
}

#[test]
fn test_stray_dog_has_no_owner_or_home() {
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);
    let stray = session.find("Dog", 5).unwrap().unwrap();

    assert_eq!(stray.get("owner_id").unwrap(), &Value::Null);
    assert!(session.belongs_to(&stray, "owner").unwrap().is_none());
    assert!(session.has_one_through(&stray, "home").unwrap().is_none());
}

#[test]
fn test_homeless_owner_yields_no_home() {
    // Given: a dog whose owner has no house
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);
    let mut dog = schema
        .new_record("Dog")
        .unwrap()
        .with("name", "Whiskers")
        .unwrap()
        .with("owner_id", 4i64)
        .unwrap();
    session.insert(&mut dog).unwrap();

    // Then: the owner resolves but the home does not
    assert!(session.belongs_to(&dog, "owner").unwrap().is_some());
    assert!(session.has_one_through(&dog, "home").unwrap().is_none());
}

#[test]
fn test_has_many_in_row_order() {
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);
    let ned = session.find("Human", 3).unwrap().unwrap();

    let dogs = session.has_many(&ned, "dogs").unwrap();

    let names: Vec<_> = dogs.iter().map(|d| text(d, "name")).collect();
    assert_eq!(names, vec!["Haskell", "Markov"]);
}

#[test]
fn test_residents_with_class_override() {
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);
    let house = session.find("House", 1).unwrap().unwrap();

    let residents = session.has_many(&house, "residents").unwrap();

    let names: Vec<_> = residents.iter().map(|h| text(h, "fname")).collect();
    assert_eq!(names, vec!["Devon", "Matt"]);
}

#[test]
fn test_where_eq_conjunction() {
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);

    let matt = session
        .where_eq(
            "Human",
            &PredicateMap::new().with("fname", "Matt").with("house_id", 1i64),
        )
        .unwrap();
    let nobody = session
        .where_eq(
            "Human",
            &PredicateMap::new().with("fname", "Matt").with("house_id", 2i64),
        )
        .unwrap();

    assert_eq!(matt.len(), 1);
    assert_eq!(text(&matt[0], "lname"), "Rubens");
    assert!(nobody.is_empty());
}

#[test]
fn test_unknown_predicate_column_is_store_error() {
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);

    let err = session
        .where_eq("Dog", &PredicateMap::new().with("color", "brown"))
        .unwrap_err();

    assert!(matches!(err, TetherError::Store { .. }));
}

#[test]
fn test_invalid_utf8_text_is_not_rewritten() {
    // Given: a human whose last name holds bytes that are not UTF-8
    let store = dog_store();
    let schema = dog_schema(&store);
    let session = Session::new(&schema, &store);
    store
        .connection()
        .execute_batch("UPDATE humans SET lname = CAST(X'FF41' AS TEXT) WHERE id = 1")
        .unwrap();

    // When: the record is loaded
    let err = session.find("Human", 1).unwrap_err();

    // Then: loading fails and the stored bytes are untouched
    assert!(matches!(err, TetherError::Store { ref op, .. } if op == "decode_text"));
    let hex: String = store
        .connection()
        .query_row("SELECT hex(lname) FROM humans WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(hex, "FF41");
}
