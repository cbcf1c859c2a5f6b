//! Store configuration
//!
//! ```toml
//! path = "dogs.db"
//! foreign_keys = true
//! schema_file = "fixtures/dogs.sql"
//! ```
//!
//! Every key is optional. A missing `path` opens an in-memory database.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{config_error, io_error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file; `None` for an in-memory database
    pub path: Option<PathBuf>,
    /// Enforce foreign key constraints on the connection
    pub foreign_keys: bool,
    /// SQL script applied right after opening
    pub schema_file: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            foreign_keys: true,
            schema_file: None,
        }
    }
}

impl StoreConfig {
    /// In-memory database with default settings
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Config` for malformed TOML, unknown keys or
    /// mistyped values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| config_error(e.to_string()))
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Io` if the file cannot be read, otherwise as
    /// `from_toml_str`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source =
            std::fs::read_to_string(path.as_ref()).map_err(|e| io_error("load_config", e))?;
        Self::from_toml_str(&source)
    }
}
