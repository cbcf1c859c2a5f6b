//! Canonical logging macros
//!
//! Every macro expands through `$crate`, so callers need neither `tracing`
//! nor `tether-core-types` in their own dependency list.

#[doc(hidden)]
pub mod __private {
    pub use tether_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_SQL, EVENT_START};
    pub use tracing;
}

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use tether_core::log_op_start;
/// log_op_start!("schema_build");
/// log_op_start!("find", model = "Dog");
/// log_op_start!("related", model = "Dog", association = "owner");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::logging_facility::macros::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__private::EVENT_START,
        )
    };
    ($op:expr, $($field:tt)*) => {
        $crate::logging_facility::macros::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__private::EVENT_START,
            $($field)*
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use tether_core::log_op_end;
/// log_op_end!("find", duration_ms = 3, model = "Dog");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::logging_facility::macros::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__private::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log an operation error
///
/// The error is converted into `ExError`, so the event carries a stable code
/// and, when the error names one, the model it concerns.
///
/// # Example
///
/// ```
/// # use tether_core::{log_op_error, errors::TetherError};
/// let err = TetherError::NameResolution { class_name: "Cat".to_string() };
/// log_op_error!("related", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::logging_facility::macros::__private::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__private::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_model = ex_err.model(),
            $($($field)*)?
        );
    }};
}

/// Log a statement about to be sent to the store
///
/// # Example
///
/// ```
/// # use tether_core::{log_sql, Value};
/// let params = [Value::Integer(3)];
/// log_sql!("find", table = "dogs", "SELECT dogs.* FROM dogs WHERE id = ?", &params);
/// ```
#[macro_export]
macro_rules! log_sql {
    ($op:expr, table = $table:expr, $sql:expr, $params:expr) => {
        $crate::logging_facility::macros::__private::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__private::EVENT_SQL,
            table = $table,
            sql = %$sql,
            param_count = $params.len(),
        )
    };
}
