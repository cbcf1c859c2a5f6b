use tether_core_types::{Row, Value};

use crate::errors::{Result, TetherError};
use crate::store::Store;

/// Conjunction of column equality conditions
///
/// Iteration order is insertion order. Setting a column twice replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateMap {
    entries: Vec<(String, Value)>,
}

impl PredicateMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Require `column = value`
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PredicateMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PredicateMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Render `SELECT * FROM <table> WHERE c1 = ? AND c2 = ?` and its parameters
///
/// # Errors
///
/// Returns `EmptyPredicate` when `predicates` has no entries.
pub fn build_where(table: &str, predicates: &PredicateMap) -> Result<(String, Vec<Value>)> {
    if predicates.is_empty() {
        return Err(TetherError::EmptyPredicate {
            table: table.to_string(),
        });
    }

    let conditions = predicates
        .iter()
        .map(|(column, _)| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(" AND ");
    let params = predicates.iter().map(|(_, v)| v.clone()).collect();

    Ok((
        format!("SELECT * FROM {} WHERE {}", table, conditions),
        params,
    ))
}

/// Run an equality query against `table` and return raw rows
///
/// # Errors
///
/// Returns `EmptyPredicate` for an empty map, or the store's error.
pub fn execute_where(store: &dyn Store, table: &str, predicates: &PredicateMap) -> Result<Vec<Row>> {
    let (sql, params) = build_where(table, predicates)?;
    crate::log_sql!("where", table = table, sql, params);
    let rows = store.execute(&sql, &params)?;
    tracing::debug!(table, row_count = rows.len(), "where returned");
    Ok(rows)
}
