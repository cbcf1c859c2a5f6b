//! Database connection management
//!
//! `SqliteStore` owns one rusqlite connection and implements the
//! `tether_core::Store` boundary on top of it.

use std::path::Path;

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::Connection;
use tether_core::{Store, TetherError};
use tether_core_types::{Row, Value};

use crate::bootstrap;
use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, Result};

/// A SQLite database opened for mapping
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a SQLite database at the given path
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Store` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(from_rusqlite)?;
        tracing::debug!(path = %path.as_ref().display(), "opened sqlite database");
        Ok(Self { conn })
    }

    /// Open an in-memory SQLite database
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Store` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
        Ok(Self { conn })
    }

    /// Open and prepare a database as described by `config`
    ///
    /// No path means an in-memory database. The schema file, if any, runs
    /// after the connection is configured.
    ///
    /// # Errors
    ///
    /// Returns `Store` or `Io` errors from opening, configuring or the
    /// schema script.
    pub fn open_with(config: &StoreConfig) -> Result<Self> {
        let store = match &config.path {
            Some(path) => Self::open(path)?,
            None => Self::open_in_memory()?,
        };
        store.configure(config.foreign_keys)?;

        if let Some(schema_file) = &config.schema_file {
            bootstrap::apply_schema_file(&store, schema_file)?;
        }
        Ok(store)
    }

    /// Configure connection settings
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Store` if the pragma fails.
    pub fn configure(&self, foreign_keys: bool) -> Result<()> {
        let pragma = if foreign_keys {
            "PRAGMA foreign_keys = ON"
        } else {
            "PRAGMA foreign_keys = OFF"
        };
        self.conn.execute_batch(pragma).map_err(from_rusqlite)
    }

    /// Underlying connection, for statements outside the mapping engine
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, reporting any error SQLite raises on close
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Store` if SQLite refuses to close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| from_rusqlite(err))
    }
}

impl Store for SqliteStore {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        tracing::debug!(sql, param_count = params.len(), "execute");

        let mut stmt = self.conn.prepare(sql).map_err(from_rusqlite)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter().map(to_sql)))
            .map_err(from_rusqlite)?;

        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(from_rusqlite)? {
            let mut out = Row::new();
            for (idx, column) in columns.iter().enumerate() {
                let value = row.get_ref(idx).map_err(from_rusqlite)?;
                out.push(column.as_str(), from_sql(column, value)?);
            }
            result.push(out);
        }

        tracing::debug!(row_count = result.len(), "executed");
        Ok(result)
    }

    fn describe_columns(&self, table: &str) -> Result<Vec<String>> {
        let stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} LIMIT 0", table))
            .map_err(from_rusqlite)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        tracing::debug!(table, column_count = columns.len(), "described table");
        Ok(columns)
    }

    fn last_inserted_id(&self) -> Result<i64> {
        Ok(self.conn.last_insert_rowid())
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Real(f) => SqlValue::Real(*f),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Blob(b) => SqlValue::Blob(b.clone()),
    }
}

/// TEXT that is not valid UTF-8 is an error; hydrating it lossily would
/// write the replacement bytes back on the next save.
fn from_sql(column: &str, value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => {
            let text = std::str::from_utf8(t).map_err(|e| TetherError::Store {
                op: "decode_text".to_string(),
                message: format!("column {} holds invalid UTF-8: {}", column, e),
            })?;
            Value::Text(text.to_string())
        }
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    })
}
