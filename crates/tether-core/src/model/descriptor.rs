use std::sync::Arc;

use tether_core_types::Row;

use super::catalog::ColumnCatalog;
use super::record::Record;
use crate::assoc::AssociationRegistry;
use crate::errors::Result;
use crate::store::Store;

/// Runtime description of one model type
///
/// Holds the table name, the column catalog and the association registry.
/// Built by `Schema` at startup and read-only once finalized.
#[derive(Debug)]
pub struct ModelDescriptor {
    name: String,
    table_name: String,
    catalog: ColumnCatalog,
    associations: AssociationRegistry,
}

impl ModelDescriptor {
    pub fn new(
        name: impl Into<String>,
        table_name: impl Into<String>,
        associations: AssociationRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            catalog: ColumnCatalog::new(),
            associations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn associations(&self) -> &AssociationRegistry {
        &self.associations
    }

    /// Load the column catalog; later calls reuse the cached columns
    ///
    /// # Errors
    ///
    /// Propagates store errors from `describe_columns`.
    pub fn finalize(&self, store: &dyn Store) -> Result<()> {
        self.catalog.load(store, &self.table_name)?;
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.catalog.is_loaded()
    }

    /// Cached column names in table order
    ///
    /// # Errors
    ///
    /// Returns `CatalogNotLoaded` before `finalize`.
    pub fn columns(&self) -> Result<Arc<[String]>> {
        self.catalog.columns(&self.name)
    }

    /// Build an empty record of this model
    ///
    /// # Errors
    ///
    /// Returns `CatalogNotLoaded` before `finalize`.
    pub fn new_record(&self) -> Result<Record> {
        Ok(Record::empty(self.name.clone(), self.columns()?))
    }

    /// Build a record from a row
    ///
    /// # Errors
    ///
    /// Returns `CatalogNotLoaded` before `finalize`, or `UnknownAttribute`
    /// if the row has a column outside the catalog.
    pub fn instantiate(&self, row: Row) -> Result<Record> {
        Record::from_row(self.name.clone(), self.columns()?, row)
    }
}
