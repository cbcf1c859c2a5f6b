//! Row hydration: raw store rows to model records

use tether_core_types::Row;

use crate::errors::Result;
use crate::model::{ModelDescriptor, Record};

/// Build one record of `model` per row, preserving row order
///
/// # Errors
///
/// Returns `UnknownAttribute` for the first row holding a column outside the
/// model's catalog; no partial result is returned.
pub fn hydrate_all(model: &ModelDescriptor, rows: Vec<Row>) -> Result<Vec<Record>> {
    let records = rows
        .into_iter()
        .map(|row| model.instantiate(row))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(model = model.name(), row_count = records.len(), "hydrated");
    Ok(records)
}

/// Hydrate and keep only the first record
///
/// # Errors
///
/// Same as `hydrate_all`; every row is validated even though one is kept.
pub fn hydrate_first(model: &ModelDescriptor, rows: Vec<Row>) -> Result<Option<Record>> {
    Ok(hydrate_all(model, rows)?.into_iter().next())
}
