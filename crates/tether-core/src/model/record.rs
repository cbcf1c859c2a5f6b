use std::collections::HashMap;
use std::sync::Arc;

use tether_core_types::{Row, Value};

use crate::assoc::DEFAULT_PRIMARY_KEY;
use crate::errors::{Result, TetherError};

static NULL: Value = Value::Null;

/// A model instance: attribute storage checked against the column catalog
///
/// Each record exclusively owns its attributes. Reads and writes never touch
/// the store; columns outside the catalog are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: String,
    columns: Arc<[String]>,
    attributes: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record (a new, unsaved row)
    pub(crate) fn empty(model: impl Into<String>, columns: Arc<[String]>) -> Self {
        Self {
            model: model.into(),
            columns,
            attributes: HashMap::new(),
        }
    }

    /// Create a record pre-populated from column/value pairs
    ///
    /// # Errors
    ///
    /// Returns `UnknownAttribute` on the first column not in the catalog.
    pub(crate) fn from_row(model: impl Into<String>, columns: Arc<[String]>, row: Row) -> Result<Self> {
        let mut record = Self::empty(model, columns);
        for (column, value) in row {
            record.set(&column, value)?;
        }
        Ok(record)
    }

    /// Name of the model type this record belongs to
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Catalog columns of this record's model, in table order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    fn check_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(TetherError::UnknownAttribute {
                model: self.model.clone(),
                column: column.to_string(),
            })
        }
    }

    /// Read a column; unset columns read as NULL
    ///
    /// # Errors
    ///
    /// Returns `UnknownAttribute` if `column` is not in the catalog.
    pub fn get(&self, column: &str) -> Result<&Value> {
        self.check_column(column)?;
        Ok(self.attributes.get(column).unwrap_or(&NULL))
    }

    /// Write a column
    ///
    /// # Errors
    ///
    /// Returns `UnknownAttribute` if `column` is not in the catalog.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> Result<()> {
        self.check_column(column)?;
        self.attributes.insert(column.to_string(), value.into());
        Ok(())
    }

    /// Builder-style `set`
    ///
    /// # Errors
    ///
    /// Returns `UnknownAttribute` if `column` is not in the catalog.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(column, value)?;
        Ok(self)
    }

    /// Whether `column` has been assigned (NULL counts as assigned)
    pub fn is_set(&self, column: &str) -> bool {
        self.attributes.contains_key(column)
    }

    /// Integer value of the `id` column, if set
    pub fn id(&self) -> Option<i64> {
        self.attributes
            .get(DEFAULT_PRIMARY_KEY)
            .and_then(Value::as_i64)
    }

    /// A record without an `id` value has not been persisted
    pub fn is_new(&self) -> bool {
        self.attributes
            .get(DEFAULT_PRIMARY_KEY)
            .map_or(true, Value::is_null)
    }

    /// Assigned (column, value) pairs in catalog order
    pub fn attributes(&self) -> Vec<(&str, &Value)> {
        self.columns
            .iter()
            .filter_map(|c| self.attributes.get(c).map(|v| (c.as_str(), v)))
            .collect()
    }

    /// Assigned values in catalog order
    pub fn attribute_values(&self) -> Vec<Value> {
        self.attributes()
            .into_iter()
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Assigned attributes as a row, in catalog order
    pub fn to_row(&self) -> Row {
        self.attributes()
            .into_iter()
            .map(|(c, v)| (c, v.clone()))
            .collect()
    }
}
