//! Store boundary
//!
//! The mapping engine never talks to a database driver directly. Everything
//! it needs from a relational store is this trait: run a parameterized
//! statement, list a table's columns, and report the last inserted row id.
//! Implementations are synchronous and blocking.

use tether_core_types::{Row, Value};

use crate::errors::Result;

/// A relational store the mapping engine can query
pub trait Store {
    /// Execute `sql`, binding `params` positionally to `?` placeholders
    ///
    /// Returns every result row in store order (empty for statements that
    /// produce no rows).
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Store` if the store rejects the statement.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Ordered column names of `table`
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Store` if the table cannot be described.
    fn describe_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Row id assigned by the most recent successful insert
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Store` if the store cannot report it.
    fn last_inserted_id(&self) -> Result<i64>;
}

impl<S: Store + ?Sized> Store for &S {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).execute(sql, params)
    }

    fn describe_columns(&self, table: &str) -> Result<Vec<String>> {
        (**self).describe_columns(table)
    }

    fn last_inserted_id(&self) -> Result<i64> {
        (**self).last_inserted_id()
    }
}
