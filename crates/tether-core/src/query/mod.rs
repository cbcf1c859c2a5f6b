//! SQL generation
//!
//! - `predicate`: equality-conjunction `WHERE` queries
//! - `through`: the fixed two-table join behind has-one-through
//! - `crud`: single-table select/insert/update statements
//!
//! Statements use `?` placeholders and are bound positionally by the store.

pub mod crud;
pub mod predicate;
pub mod through;

pub use predicate::{build_where, execute_where, PredicateMap};
pub use through::ThroughJoin;
