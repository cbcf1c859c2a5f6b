//! Tether Core - relationship-aware object/row mapping
//!
//! This crate provides the mapping engine:
//! - Model declarations with belongs-to, has-many and has-one-through associations
//! - Column catalogs fetched once per model and checked on every attribute access
//! - Equality-conjunction query building and the fixed has-one-through join
//! - Row hydration into records, and typed wrappers via `Model`
//! - The `Store` trait every database backend implements
//!
//! Backends live in other crates; `tether-store` provides SQLite.

pub mod assoc;
pub mod errors;
pub mod hydrate;
pub mod inflect;
pub mod logging_facility;
pub mod model;
pub mod query;
pub mod resolver;
pub mod schema;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use assoc::{Association, AssociationKind, BelongsToOptions, HasManyOptions};
pub use errors::{ExError, ExErrorKind, Result, TetherError};
pub use model::{Model, ModelDescriptor, Record};
pub use query::PredicateMap;
pub use resolver::Related;
pub use schema::{ModelDef, Schema};
pub use session::Session;
pub use store::Store;
pub use tether_core_types::{Row, Value};
