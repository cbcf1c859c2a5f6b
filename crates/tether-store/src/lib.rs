//! Tether Store - SQLite backend for the mapping engine
//!
//! Provides:
//! - `SqliteStore`, a rusqlite-backed implementation of `tether_core::Store`
//! - `StoreConfig`, TOML-loadable connection settings
//! - Bootstrap helpers that apply SQL scripts and reset database files

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod errors;

// Re-export key types
pub use config::StoreConfig;
pub use db::SqliteStore;
pub use errors::Result;
