//! Model types and instances
//!
//! - `ModelDescriptor`: table name, column catalog and associations of a type
//! - `ColumnCatalog`: the once-fetched ordered column list
//! - `Record`: one instance's attribute storage
//! - `Model`: typed wrapper over a `Record`

pub mod catalog;
pub mod descriptor;
pub mod record;

pub use catalog::ColumnCatalog;
pub use descriptor::ModelDescriptor;
pub use record::Record;

use crate::errors::{Result, TetherError};

/// A strongly typed view over records of one registered model type
///
/// Implementors wrap a `Record` and expose typed getters. `TYPE_NAME` must
/// match the name the model was registered under.
///
/// ```
/// use tether_core::model::{ensure_type, Model, Record};
/// use tether_core::Result;
///
/// struct Dog(Record);
///
/// impl Model for Dog {
///     const TYPE_NAME: &'static str = "Dog";
///
///     fn from_record(record: Record) -> Result<Self> {
///         ensure_type::<Self>(&record)?;
///         Ok(Dog(record))
///     }
///
///     fn record(&self) -> &Record {
///         &self.0
///     }
/// }
/// ```
pub trait Model: Sized {
    const TYPE_NAME: &'static str;

    /// Wrap a hydrated record
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the record belongs to another model.
    fn from_record(record: Record) -> Result<Self>;

    fn record(&self) -> &Record;
}

/// Check that `record` was hydrated as `M`
///
/// # Errors
///
/// Returns `TypeMismatch` if the model names differ.
pub fn ensure_type<M: Model>(record: &Record) -> Result<()> {
    if record.model_name() == M::TYPE_NAME {
        Ok(())
    } else {
        Err(TetherError::TypeMismatch {
            expected: M::TYPE_NAME.to_string(),
            found: record.model_name().to_string(),
        })
    }
}
