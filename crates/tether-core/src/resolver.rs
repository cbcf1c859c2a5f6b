//! Relationship resolution
//!
//! Turns one association traversal on a record into exactly one store round
//! trip (or none, when the owner's key is NULL) and hydrates the result.
//! Errors propagate as-is: there is no retry and no partial result.

use crate::assoc::{Association, BelongsTo, HasMany, HasOneThrough};
use crate::errors::{Result, TetherError};
use crate::hydrate::{hydrate_all, hydrate_first};
use crate::model::{ModelDescriptor, Record};
use crate::query::{execute_where, PredicateMap, ThroughJoin};
use crate::schema::Schema;
use crate::store::Store;

/// Result of following an association
#[derive(Debug, Clone, PartialEq)]
pub enum Related {
    /// Belongs-to and has-one-through: at most one record
    One(Option<Record>),
    /// Has-many: every matching record in store order
    Many(Vec<Record>),
}

impl Related {
    /// The single record of a `One`
    ///
    /// `model` and `association` name the traversal for the error.
    ///
    /// # Errors
    ///
    /// `AssociationKindMismatch` if this is a `Many`.
    pub fn into_one(self, model: &str, association: &str) -> Result<Option<Record>> {
        match self {
            Related::One(record) => Ok(record),
            Related::Many(_) => Err(TetherError::AssociationKindMismatch {
                model: model.to_string(),
                association: association.to_string(),
                expected: "belongs_to or has_one_through",
                found: "has_many",
            }),
        }
    }

    /// All records; a `One` yields zero or one
    pub fn into_many(self) -> Vec<Record> {
        match self {
            Related::One(record) => record.into_iter().collect(),
            Related::Many(records) => records,
        }
    }
}

/// Runs association queries against a store
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    schema: &'a Schema,
    store: &'a dyn Store,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema, store: &'a dyn Store) -> Self {
        Self { schema, store }
    }

    /// Follow the association `name` declared on `owner`'s model
    ///
    /// # Errors
    ///
    /// - `NameResolution` if the owner's model or a target is not registered
    /// - `MissingAssociation` if `name` (or a through leg) is not declared
    /// - `UnknownAttribute` if a key column is missing from the owner
    /// - `Store` if the query fails
    pub fn resolve(&self, owner: &Record, name: &str) -> Result<Related> {
        let model = self.schema.model(owner.model_name())?;
        let association = model.associations().require(model.name(), name)?;
        self.resolve_association(model, owner, association)
    }

    /// Follow an already looked-up association
    ///
    /// # Errors
    ///
    /// Same as `resolve`.
    pub fn resolve_association(
        &self,
        model: &ModelDescriptor,
        owner: &Record,
        association: &Association,
    ) -> Result<Related> {
        match association {
            Association::BelongsTo(bt) => Ok(Related::One(self.belongs_to(owner, bt)?)),
            Association::HasMany(hm) => Ok(Related::Many(self.has_many(owner, hm)?)),
            Association::HasOneThrough(hot) => {
                Ok(Related::One(self.has_one_through(model, owner, hot)?))
            }
        }
    }

    /// `target.primary_key = owner.foreign_key`; NULL key yields `None`
    ///
    /// # Errors
    ///
    /// See `resolve`.
    pub fn belongs_to(&self, owner: &Record, bt: &BelongsTo) -> Result<Option<Record>> {
        let key = owner.get(&bt.foreign_key)?;
        if key.is_null() {
            return Ok(None);
        }

        let target = self.schema.model(&bt.class_name)?;
        let predicates = PredicateMap::new().with(&bt.primary_key, key.clone());
        let rows = execute_where(self.store, target.table_name(), &predicates)?;
        hydrate_first(target, rows)
    }

    /// `target.foreign_key = owner.primary_key`; NULL key yields no records
    ///
    /// # Errors
    ///
    /// See `resolve`.
    pub fn has_many(&self, owner: &Record, hm: &HasMany) -> Result<Vec<Record>> {
        let key = owner.get(&hm.primary_key)?;
        if key.is_null() {
            return Ok(Vec::new());
        }

        let target = self.schema.model(&hm.class_name)?;
        let predicates = PredicateMap::new().with(&hm.foreign_key, key.clone());
        let rows = execute_where(self.store, target.table_name(), &predicates)?;
        hydrate_all(target, rows)
    }

    /// One join across the through table; the first row wins
    ///
    /// # Errors
    ///
    /// See `resolve`.
    pub fn has_one_through(
        &self,
        model: &ModelDescriptor,
        owner: &Record,
        hot: &HasOneThrough,
    ) -> Result<Option<Record>> {
        let legs = self.schema.through_legs(model, hot)?;
        let key = owner.get(&legs.through.foreign_key)?;
        if key.is_null() {
            return Ok(None);
        }

        let join = ThroughJoin {
            through_table: legs.through_model.table_name(),
            through: legs.through,
            source_table: legs.source_model.table_name(),
            source: legs.source,
        };
        let sql = join.sql();
        crate::log_sql!("has_one_through", table = join.source_table, sql, std::slice::from_ref(key));

        let rows = self.store.execute(&sql, std::slice::from_ref(key))?;
        if rows.len() > 1 {
            tracing::debug!(row_count = rows.len(), "has_one_through matched several rows; keeping the first");
        }
        hydrate_first(legs.source_model, rows)
    }
}
