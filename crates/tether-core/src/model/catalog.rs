use std::sync::{Arc, OnceLock};

use crate::errors::{Result, TetherError};
use crate::store::Store;

/// Ordered column names of a model's table
///
/// Fetched from the store at most once; immutable afterwards.
#[derive(Debug, Default)]
pub struct ColumnCatalog {
    columns: OnceLock<Arc<[String]>>,
}

impl ColumnCatalog {
    pub fn new() -> Self {
        Self {
            columns: OnceLock::new(),
        }
    }

    /// Fetch the columns of `table` unless already cached
    ///
    /// # Errors
    ///
    /// Propagates store errors from `describe_columns`.
    pub fn load(&self, store: &dyn Store, table: &str) -> Result<Arc<[String]>> {
        if let Some(columns) = self.columns.get() {
            return Ok(columns.clone());
        }

        let fetched: Arc<[String]> = store.describe_columns(table)?.into();
        tracing::debug!(table, columns = fetched.len(), "column catalog loaded");

        // A racing loader may have won; either way the cached value is kept.
        Ok(self.columns.get_or_init(|| fetched).clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.columns.get().is_some()
    }

    /// Cached columns, or `CatalogNotLoaded` for `model`
    ///
    /// # Errors
    ///
    /// Returns `CatalogNotLoaded` if `load` has not run.
    pub fn columns(&self, model: &str) -> Result<Arc<[String]>> {
        self.columns
            .get()
            .cloned()
            .ok_or_else(|| TetherError::CatalogNotLoaded {
                model: model.to_string(),
            })
    }
}
