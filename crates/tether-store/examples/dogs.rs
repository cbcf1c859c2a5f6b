//! Walk the dogs/humans/houses fixture
//!
//! ```text
//! cargo run -p tether-store --example dogs
//! RUST_LOG=tether_core=debug cargo run -p tether-store --example dogs
//! ```

use tether_core::logging_facility::{init, Profile};
use tether_core::{
    BelongsToOptions, HasManyOptions, ModelDef, PredicateMap, Record, Result, Schema, Session,
};
use tether_store::{bootstrap, SqliteStore};

const DOGS_SQL: &str = include_str!("../fixtures/dogs.sql");

fn main() -> Result<()> {
    init(Profile::Development);

    let store = SqliteStore::open_in_memory()?;
    store.configure(true)?;
    bootstrap::apply_schema(&store, DOGS_SQL)?;

    let schema = Schema::builder()
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
        .build(&store)?;
    let session = Session::new(&schema, &store);

    for dog in session.all("Dog")? {
        let name = text(&dog, "name")?;
        let owner = session.belongs_to(&dog, "owner")?;
        let home = session.has_one_through(&dog, "home")?;

        match (owner, home) {
            (Some(owner), Some(home)) => println!(
                "{} belongs to {} and lives at {}",
                name,
                text(&owner, "fname")?,
                text(&home, "address")?
            ),
            (Some(owner), None) => println!("{} belongs to {}", name, text(&owner, "fname")?),
            _ => println!("{} is a stray", name),
        }
    }

    let neds = session.where_eq("Human", &PredicateMap::new().with("fname", "Ned"))?;
    for ned in &neds {
        let dogs = session.has_many(ned, "dogs")?;
        println!(
            "{} {} has {} dogs",
            text(ned, "fname")?,
            text(ned, "lname")?,
            dogs.len()
        );
    }

    let mut puppy = schema.new_record("Dog")?.with("name", "Fluffy")?;
    session.save(&mut puppy)?;
    println!("saved Fluffy as dog #{}", puppy.id().unwrap_or_default());

    store.close()
}

fn text(record: &Record, column: &str) -> Result<String> {
    Ok(record.get(column)?.as_str().unwrap_or_default().to_string())
}
