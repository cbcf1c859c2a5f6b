//! Model registration and startup validation
//!
//! Models are declared with `ModelDef` and collected by a `SchemaBuilder`.
//! `SchemaBuilder::build` finalizes every model against the store (one
//! column-catalog fetch per table) and then validates every association, so
//! unresolvable names and missing key columns fail at startup instead of on
//! first access. The resulting `Schema` is immutable.

use std::collections::HashMap;
use std::sync::Arc;

use tether_core_types::Row;

use crate::assoc::{
    Association, AssociationRegistry, BelongsTo, BelongsToOptions, HasManyOptions, HasOneThrough,
};
use crate::errors::{Result, TetherError};
use crate::inflect;
use crate::model::{ModelDescriptor, Record};
use crate::store::Store;
use crate::{log_op_end, log_op_error, log_op_start};

/// Declaration of one model type
#[derive(Debug, Clone)]
pub struct ModelDef {
    name: String,
    table_name: Option<String>,
    associations: AssociationRegistry,
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            associations: AssociationRegistry::new(),
        }
    }

    /// Use an explicit table name instead of `tableize(name)`
    pub fn table_name(mut self, table: impl Into<String>) -> Self {
        self.table_name = Some(table.into());
        self
    }

    pub fn belongs_to(mut self, name: &str, options: BelongsToOptions) -> Self {
        self.associations
            .declare(name, Association::belongs_to(name, options));
        self
    }

    pub fn has_many(mut self, name: &str, options: HasManyOptions) -> Self {
        let assoc = Association::has_many(name, &self.name, options);
        self.associations.declare(name, assoc);
        self
    }

    pub fn has_one_through(mut self, name: &str, through_name: &str, source_name: &str) -> Self {
        self.associations
            .declare(name, Association::has_one_through(through_name, source_name));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn into_descriptor(self) -> ModelDescriptor {
        let table = self
            .table_name
            .unwrap_or_else(|| inflect::tableize(&self.name));
        ModelDescriptor::new(self.name, table, self.associations)
    }
}

/// Collects model declarations until `build`
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    models: Vec<ModelDef>,
}

impl SchemaBuilder {
    /// Register a model; a later definition with the same name replaces it
    pub fn model(mut self, def: ModelDef) -> Self {
        self.models.retain(|m| m.name != def.name);
        self.models.push(def);
        self
    }

    /// Finalize every model against `store` and validate all associations
    ///
    /// # Errors
    ///
    /// - `Store` if a table cannot be described
    /// - `NameResolution` if a class name is not registered
    /// - `MissingAssociation` / `InvalidThrough` for broken has-one-through legs
    /// - `UnknownAttribute` if a key column is absent from its table
    pub fn build(self, store: &dyn Store) -> Result<Schema> {
        log_op_start!("schema_build", model_count = self.models.len());
        let start = std::time::Instant::now();

        let result = self.build_impl(store).map_err(|e| {
            log_op_error!(
                "schema_build",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "schema_build",
            duration_ms = start.elapsed().as_millis() as u64,
            model_count = result.models.len()
        );
        Ok(result)
    }

    fn build_impl(self, store: &dyn Store) -> Result<Schema> {
        let mut models = HashMap::new();
        for def in self.models {
            let descriptor = def.into_descriptor();
            descriptor.finalize(store)?;
            models.insert(descriptor.name().to_string(), descriptor);
        }

        let schema = Schema { models };
        schema.validate()?;
        Ok(schema)
    }
}

/// Resolved legs of a has-one-through association
#[derive(Debug, Clone, Copy)]
pub struct ThroughLegs<'a> {
    pub through: &'a BelongsTo,
    pub through_model: &'a ModelDescriptor,
    pub source: &'a BelongsTo,
    pub source_model: &'a ModelDescriptor,
}

/// The finalized set of model types
#[derive(Debug)]
pub struct Schema {
    models: HashMap<String, ModelDescriptor>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Look up a model type by name
    ///
    /// Tries the exact name first, then the classified form
    /// (`humans` -> `Human`).
    ///
    /// # Errors
    ///
    /// Returns `NameResolution` if no model is registered under either form.
    pub fn model(&self, name: &str) -> Result<&ModelDescriptor> {
        self.models
            .get(name)
            .or_else(|| self.models.get(&inflect::classify(name)))
            .ok_or_else(|| TetherError::NameResolution {
                class_name: name.to_string(),
            })
    }

    /// Registered model names, sorted
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Cached column names of `model`
    ///
    /// # Errors
    ///
    /// Returns `NameResolution` for an unknown model.
    pub fn columns_of(&self, model: &str) -> Result<Arc<[String]>> {
        self.model(model)?.columns()
    }

    /// Empty record of `model`
    ///
    /// # Errors
    ///
    /// Returns `NameResolution` for an unknown model.
    pub fn new_record(&self, model: &str) -> Result<Record> {
        self.model(model)?.new_record()
    }

    /// Record of `model` populated from `attributes`
    ///
    /// # Errors
    ///
    /// Returns `NameResolution` or `UnknownAttribute`.
    pub fn instantiate(&self, model: &str, attributes: Row) -> Result<Record> {
        self.model(model)?.instantiate(attributes)
    }

    /// Model type an association on `owner` yields
    ///
    /// For has-one-through this is the source leg's target.
    ///
    /// # Errors
    ///
    /// Returns `NameResolution`, or the has-one-through leg errors.
    pub fn resolve_target_type<'a>(
        &'a self,
        owner: &'a ModelDescriptor,
        association: &Association,
    ) -> Result<&'a ModelDescriptor> {
        match association {
            Association::BelongsTo(bt) => self.model(&bt.class_name),
            Association::HasMany(hm) => self.model(&hm.class_name),
            Association::HasOneThrough(hot) => Ok(self.through_legs(owner, hot)?.source_model),
        }
    }

    /// Resolve both legs of a has-one-through declared on `owner`
    ///
    /// # Errors
    ///
    /// - `MissingAssociation` if either leg is not declared
    /// - `InvalidThrough` if either leg is not a belongs-to
    /// - `NameResolution` if a leg's class is not registered
    pub fn through_legs<'a>(
        &'a self,
        owner: &'a ModelDescriptor,
        hot: &HasOneThrough,
    ) -> Result<ThroughLegs<'a>> {
        let through = belongs_to_leg(owner, &hot.through_name)?;
        let through_model = self.model(&through.class_name)?;
        let source = belongs_to_leg(through_model, &hot.source_name)?;
        let source_model = self.model(&source.class_name)?;

        Ok(ThroughLegs {
            through,
            through_model,
            source,
            source_model,
        })
    }

    fn validate(&self) -> Result<()> {
        for name in self.model_names() {
            let owner = &self.models[name];
            for (assoc_name, assoc) in owner.associations().iter() {
                tracing::debug!(model = name, association = assoc_name, kind = %assoc.kind(), "validating association");
                match assoc {
                    Association::BelongsTo(bt) => {
                        let target = self.model(&bt.class_name)?;
                        require_column(owner, &bt.foreign_key)?;
                        require_column(target, &bt.primary_key)?;
                    }
                    Association::HasMany(hm) => {
                        let target = self.model(&hm.class_name)?;
                        require_column(owner, &hm.primary_key)?;
                        require_column(target, &hm.foreign_key)?;
                    }
                    Association::HasOneThrough(hot) => {
                        self.through_legs(owner, hot)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn belongs_to_leg<'a>(model: &'a ModelDescriptor, name: &str) -> Result<&'a BelongsTo> {
    match model.associations().require(model.name(), name)? {
        Association::BelongsTo(bt) => Ok(bt),
        other => Err(TetherError::InvalidThrough {
            model: model.name().to_string(),
            association: name.to_string(),
            reason: format!("expected a belongs_to leg, found {}", other.kind()),
        }),
    }
}

fn require_column(model: &ModelDescriptor, column: &str) -> Result<()> {
    if model.columns()?.iter().any(|c| c == column) {
        Ok(())
    } else {
        Err(TetherError::UnknownAttribute {
            model: model.name().to_string(),
            column: column.to_string(),
        })
    }
}
