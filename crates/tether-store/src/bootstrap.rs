//! Schema bootstrap
//!
//! Applies plain SQL scripts to a store. `reset` rebuilds a database file
//! from scratch, which is how demos and file-backed tests get a known state.

use std::path::Path;
use std::time::Instant;

use tether_core::{log_op_end, log_op_error, log_op_start};

use crate::db::SqliteStore;
use crate::errors::{from_rusqlite, io_error, Result};

/// Run every statement in `sql` against `store`
///
/// # Errors
///
/// Returns `TetherError::Store` on the first failing statement. Statements
/// before it stay applied.
pub fn apply_schema(store: &SqliteStore, sql: &str) -> Result<()> {
    tracing::debug!(bytes = sql.len(), "applying schema script");
    store.connection().execute_batch(sql).map_err(from_rusqlite)
}

/// Read a SQL script from disk and apply it
///
/// # Errors
///
/// Returns `TetherError::Io` if the file cannot be read, otherwise as
/// `apply_schema`.
pub fn apply_schema_file(store: &SqliteStore, path: impl AsRef<Path>) -> Result<()> {
    let sql = std::fs::read_to_string(path.as_ref()).map_err(|e| io_error("read_schema", e))?;
    apply_schema(store, &sql)
}

/// Delete `db_path` if present, create a fresh database and run `sql_path`
///
/// The returned store has foreign keys enabled.
///
/// # Errors
///
/// Returns `Io` if the old file cannot be removed or the script cannot be
/// read, `Store` if opening or the script fails.
pub fn reset(db_path: impl AsRef<Path>, sql_path: impl AsRef<Path>) -> Result<SqliteStore> {
    let db_path = db_path.as_ref();
    log_op_start!("reset", path = %db_path.display());
    let start = Instant::now();

    let result = reset_impl(db_path, sql_path.as_ref());
    match &result {
        Ok(_) => {
            log_op_end!("reset", duration_ms = start.elapsed().as_millis() as u64);
        }
        Err(e) => {
            log_op_error!(
                "reset",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

fn reset_impl(db_path: &Path, sql_path: &Path) -> Result<SqliteStore> {
    if db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| io_error("reset", e))?;
    }

    let store = SqliteStore::open(db_path)?;
    store.configure(true)?;
    apply_schema_file(&store, sql_path)?;
    Ok(store)
}
