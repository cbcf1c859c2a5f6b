//! Session: the caller-facing surface of the mapping engine
//!
//! A session pairs a finalized `Schema` with an open store handle. It owns
//! lifecycle logging for every operation:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (resolver, query builder, hydrator) only use `log_sql!` and `tracing::debug!`.

use std::time::Instant;

use tether_core_types::Value;

use crate::assoc::{AssociationKind, DEFAULT_PRIMARY_KEY};
use crate::errors::{Result, TetherError};
use crate::hydrate::{hydrate_all, hydrate_first};
use crate::model::{Model, Record};
use crate::query::{crud, execute_where, PredicateMap};
use crate::resolver::{Related, Resolver};
use crate::schema::Schema;
use crate::store::Store;
use crate::{log_op_end, log_op_error, log_op_start, log_sql};

/// Schema plus store handle
#[derive(Clone, Copy)]
pub struct Session<'a> {
    schema: &'a Schema,
    store: &'a dyn Store,
}

impl<'a> Session<'a> {
    pub fn new(schema: &'a Schema, store: &'a dyn Store) -> Self {
        Self { schema, store }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    fn resolver(&self) -> Resolver<'a> {
        Resolver::new(self.schema, self.store)
    }

    fn instrument<T>(&self, op: &'static str, model: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        log_op_start!(op, model = model);
        let start = Instant::now();

        match f() {
            Ok(value) => {
                log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64, model = model);
                Ok(value)
            }
            Err(e) => {
                log_op_error!(
                    op,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    model = model
                );
                Err(e)
            }
        }
    }

    // ===== Queries =====

    /// Records of `model` matching every `column = value` in `predicates`
    ///
    /// # Errors
    ///
    /// `NameResolution`, `EmptyPredicate`, `UnknownAttribute` or `Store`.
    pub fn where_eq(&self, model: &str, predicates: &PredicateMap) -> Result<Vec<Record>> {
        self.instrument("where", model, || {
            let descriptor = self.schema.model(model)?;
            let rows = execute_where(self.store, descriptor.table_name(), predicates)?;
            hydrate_all(descriptor, rows)
        })
    }

    /// Record of `model` with `id`, if any
    ///
    /// # Errors
    ///
    /// `NameResolution`, `UnknownAttribute` or `Store`.
    pub fn find(&self, model: &str, id: i64) -> Result<Option<Record>> {
        self.instrument("find", model, || {
            let descriptor = self.schema.model(model)?;
            let rows = self
                .store
                .execute(&crud::select_by_id(descriptor.table_name()), &[Value::Integer(id)])?;
            hydrate_first(descriptor, rows)
        })
    }

    /// Every record of `model` in store order
    ///
    /// # Errors
    ///
    /// `NameResolution`, `UnknownAttribute` or `Store`.
    pub fn all(&self, model: &str) -> Result<Vec<Record>> {
        self.instrument("all", model, || {
            let descriptor = self.schema.model(model)?;
            let rows = self
                .store
                .execute(&crud::select_all(descriptor.table_name()), &[])?;
            hydrate_all(descriptor, rows)
        })
    }

    /// First record of `model` in store order
    ///
    /// # Errors
    ///
    /// `NameResolution`, `UnknownAttribute` or `Store`.
    pub fn first(&self, model: &str) -> Result<Option<Record>> {
        self.instrument("first", model, || {
            let descriptor = self.schema.model(model)?;
            let rows = self
                .store
                .execute(&crud::select_first(descriptor.table_name()), &[])?;
            hydrate_first(descriptor, rows)
        })
    }

    /// Record of `model` with the highest id
    ///
    /// # Errors
    ///
    /// `NameResolution`, `UnknownAttribute` or `Store`.
    pub fn last(&self, model: &str) -> Result<Option<Record>> {
        self.instrument("last", model, || {
            let descriptor = self.schema.model(model)?;
            let rows = self
                .store
                .execute(&crud::select_last(descriptor.table_name()), &[])?;
            hydrate_first(descriptor, rows)
        })
    }

    // ===== Persistence =====

    /// Insert `record`'s assigned columns and store the new id on it
    ///
    /// # Errors
    ///
    /// `NameResolution`, `UnknownAttribute` or `Store`.
    pub fn insert(&self, record: &mut Record) -> Result<i64> {
        let model = record.model_name().to_string();
        self.instrument("insert", &model, || {
            let descriptor = self.schema.model(&model)?;
            let (columns, params) = non_key_attributes(record);
            let sql = crud::insert(descriptor.table_name(), &columns);
            log_sql!("insert", table = descriptor.table_name(), sql, params);

            self.store.execute(&sql, &params)?;
            let id = self.store.last_inserted_id()?;
            record.set(DEFAULT_PRIMARY_KEY, id)?;
            Ok(id)
        })
    }

    /// Write `record`'s assigned columns back to its row
    ///
    /// # Errors
    ///
    /// `MissingPrimaryKey` if the record has no id, otherwise
    /// `NameResolution` or `Store`.
    pub fn update(&self, record: &Record) -> Result<()> {
        let model = record.model_name();
        self.instrument("update", model, || {
            let descriptor = self.schema.model(model)?;
            let id = record.get(DEFAULT_PRIMARY_KEY)?;
            if id.is_null() {
                return Err(TetherError::MissingPrimaryKey {
                    model: model.to_string(),
                });
            }

            let (columns, mut params) = non_key_attributes(record);
            if columns.is_empty() {
                return Ok(());
            }
            params.push(id.clone());

            let sql = crud::update(descriptor.table_name(), &columns);
            log_sql!("update", table = descriptor.table_name(), sql, params);
            self.store.execute(&sql, &params)?;
            Ok(())
        })
    }

    /// Insert a new record or update a persisted one
    ///
    /// # Errors
    ///
    /// See `insert` and `update`.
    pub fn save(&self, record: &mut Record) -> Result<()> {
        if record.is_new() {
            self.insert(record).map(|_| ())
        } else {
            self.update(record)
        }
    }

    // ===== Associations =====

    /// Follow the association `name` on `owner`
    ///
    /// # Errors
    ///
    /// `NameResolution`, `MissingAssociation`, `InvalidThrough`,
    /// `UnknownAttribute` or `Store`.
    pub fn related(&self, owner: &Record, name: &str) -> Result<Related> {
        self.instrument("related", owner.model_name(), || {
            tracing::debug!(association = name, "resolving association");
            self.resolver().resolve(owner, name)
        })
    }

    fn related_of_kind(&self, owner: &Record, name: &str, kind: AssociationKind) -> Result<Related> {
        let model = owner.model_name();
        self.instrument(kind.as_str(), model, || {
            let descriptor = self.schema.model(model)?;
            let association = descriptor.associations().require_kind(model, name, kind)?;
            self.resolver()
                .resolve_association(descriptor, owner, association)
        })
    }

    /// Follow a belongs-to association
    ///
    /// # Errors
    ///
    /// `AssociationKindMismatch` if `name` is not a belongs-to, otherwise as
    /// `related`.
    pub fn belongs_to(&self, owner: &Record, name: &str) -> Result<Option<Record>> {
        self.related_of_kind(owner, name, AssociationKind::BelongsTo)?
            .into_one(owner.model_name(), name)
    }

    /// Follow a has-many association
    ///
    /// # Errors
    ///
    /// `AssociationKindMismatch` if `name` is not a has-many, otherwise as
    /// `related`.
    pub fn has_many(&self, owner: &Record, name: &str) -> Result<Vec<Record>> {
        Ok(self
            .related_of_kind(owner, name, AssociationKind::HasMany)?
            .into_many())
    }

    /// Follow a has-one-through association
    ///
    /// # Errors
    ///
    /// `AssociationKindMismatch` if `name` is not a has-one-through,
    /// otherwise as `related`.
    pub fn has_one_through(&self, owner: &Record, name: &str) -> Result<Option<Record>> {
        self.related_of_kind(owner, name, AssociationKind::HasOneThrough)?
            .into_one(owner.model_name(), name)
    }

    // ===== Typed access =====

    /// `find` wrapped as `T`
    ///
    /// # Errors
    ///
    /// As `find`, plus `TypeMismatch` from `T::from_record`.
    pub fn find_as<T: Model>(&self, id: i64) -> Result<Option<T>> {
        self.find(T::TYPE_NAME, id)?
            .map(T::from_record)
            .transpose()
    }

    /// `where_eq` wrapped as `T`
    ///
    /// # Errors
    ///
    /// As `where_eq`, plus `TypeMismatch` from `T::from_record`.
    pub fn where_as<T: Model>(&self, predicates: &PredicateMap) -> Result<Vec<T>> {
        self.where_eq(T::TYPE_NAME, predicates)?
            .into_iter()
            .map(T::from_record)
            .collect()
    }

    /// Follow a single-valued association and wrap the result as `T`
    ///
    /// # Errors
    ///
    /// `AssociationKindMismatch` for a has-many, `TypeMismatch` if the
    /// target is not `T`, otherwise as `related`.
    pub fn one<T: Model>(&self, owner: &impl Model, name: &str) -> Result<Option<T>> {
        let owner = owner.record();
        let kind = self
            .schema
            .model(owner.model_name())?
            .associations()
            .require(owner.model_name(), name)?
            .kind();
        if kind == AssociationKind::HasMany {
            return Err(TetherError::AssociationKindMismatch {
                model: owner.model_name().to_string(),
                association: name.to_string(),
                expected: "belongs_to or has_one_through",
                found: kind.as_str(),
            });
        }

        self.related(owner, name)?
            .into_one(owner.model_name(), name)?
            .map(T::from_record)
            .transpose()
    }

    /// Follow a has-many association and wrap each record as `T`
    ///
    /// # Errors
    ///
    /// `AssociationKindMismatch` if `name` is not a has-many, `TypeMismatch`
    /// if the target is not `T`, otherwise as `related`.
    pub fn many<T: Model>(&self, owner: &impl Model, name: &str) -> Result<Vec<T>> {
        self.has_many(owner.record(), name)?
            .into_iter()
            .map(T::from_record)
            .collect()
    }
}

fn non_key_attributes(record: &Record) -> (Vec<&str>, Vec<Value>) {
    record
        .attributes()
        .into_iter()
        .filter(|(column, _)| *column != DEFAULT_PRIMARY_KEY)
        .map(|(column, value)| (column, value.clone()))
        .unzip()
}
