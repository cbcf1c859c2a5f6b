use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tether_core::{
    BelongsToOptions, HasManyOptions, ModelDef, Result, Row, Schema, Store, TetherError, Value,
};

/// Scripted in-memory store
///
/// Answers `describe_columns` from a fixed table map and `execute` from
/// canned responses matched on SQL text and parameters. Every call is logged.
#[derive(Default)]
pub struct FakeStore {
    tables: HashMap<String, Vec<String>>,
    responses: Vec<(String, Vec<Value>, Vec<Row>)>,
    failing_sql: Option<String>,
    pub executed: RefCell<Vec<(String, Vec<Value>)>>,
    pub described: RefCell<Vec<String>>,
    pub next_id: Cell<i64>,
}

#[allow(dead_code)]
impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, name: &str, columns: &[&str]) -> Self {
        self.tables.insert(
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn respond(mut self, sql: &str, params: Vec<Value>, rows: Vec<Row>) -> Self {
        self.responses.push((sql.to_string(), params, rows));
        self
    }

    pub fn fail_on(mut self, sql: &str) -> Self {
        self.failing_sql = Some(sql.to_string());
        self
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.executed.borrow().iter().map(|(s, _)| s.clone()).collect()
    }
}

impl Store for FakeStore {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.executed
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));

        if self.failing_sql.as_deref() == Some(sql) {
            return Err(TetherError::Store {
                op: "execute".to_string(),
                message: "disk I/O error".to_string(),
            });
        }

        Ok(self
            .responses
            .iter()
            .find(|(s, p, _)| s == sql && p.as_slice() == params)
            .map(|(_, _, rows)| rows.clone())
            .unwrap_or_default())
    }

    fn describe_columns(&self, table: &str) -> Result<Vec<String>> {
        self.described.borrow_mut().push(table.to_string());
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| TetherError::Store {
                op: "describe_columns".to_string(),
                message: format!("no such table: {}", table),
            })
    }

    fn last_inserted_id(&self) -> Result<i64> {
        Ok(self.next_id.get())
    }
}

/// Tables of the dogs/humans/houses fixture
#[allow(dead_code)]
pub fn dog_tables() -> FakeStore {
    FakeStore::new()
        .table("dogs", &["id", "name", "owner_id"])
        .table("humans", &["id", "fname", "lname", "house_id"])
        .table("houses", &["id", "address"])
}

/// Model declarations of the dogs/humans/houses fixture
#[allow(dead_code)]
pub fn dog_models() -> Vec<ModelDef> {
    vec![
        ModelDef::new("Dog")
            .belongs_to("owner", BelongsToOptions::new().class_name("Human"))
            .has_one_through("home", "owner", "house"),
        ModelDef::new("Human")
            .table_name("humans")
            .belongs_to("house", BelongsToOptions::new())
            .has_many("dogs", HasManyOptions::new().foreign_key("owner_id")),
        ModelDef::new("House").has_many("residents", HasManyOptions::new().class_name("Human")),
    ]
}

#[allow(dead_code)]
pub fn dog_schema(store: &FakeStore) -> Schema {
    dog_models()
        .into_iter()
        .fold(Schema::builder(), |b, m| b.model(m))
        .build(store)
        .unwrap()
}

#[allow(dead_code)]
pub fn human_row(id: i64, fname: &str, house_id: Option<i64>) -> Row {
    Row::new()
        .with("id", id)
        .with("fname", fname)
        .with("lname", "Ruggeri")
        .with("house_id", house_id)
}

#[allow(dead_code)]
pub fn house_row(id: i64, address: &str) -> Row {
    Row::new().with("id", id).with("address", address)
}

#[allow(dead_code)]
pub fn dog_row(id: i64, name: &str, owner_id: Option<i64>) -> Row {
    Row::new()
        .with("id", id)
        .with("name", name)
        .with("owner_id", owner_id)
}
