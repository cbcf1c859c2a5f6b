//! Error handling for tether-store
//!
//! Maps driver, filesystem and configuration failures onto `TetherError`

use tether_core::errors::TetherError;

pub use tether_core::errors::Result;

/// Create a store error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> TetherError {
    TetherError::Store {
        op: "sqlite".to_string(),
        message: err.to_string(),
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> TetherError {
    TetherError::Io {
        op: operation.to_string(),
        message: err.to_string(),
    }
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> TetherError {
    TetherError::Config {
        message: reason.into(),
    }
}
