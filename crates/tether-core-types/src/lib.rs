//! Core types shared across Tether crates
//!
//! This crate provides the foundational types used by the mapping engine,
//! the store backend and the logging facility:
//!
//! - **Values and rows**: `Value`, `Row` as exchanged with the store
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod value;

pub use value::{Row, Value};
