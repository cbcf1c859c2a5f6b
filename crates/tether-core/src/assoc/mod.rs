//! Association descriptors
//!
//! An association is one declared relationship of a model type. The set of
//! shapes is closed: belongs-to, has-many and has-one-through. Descriptors
//! carry fully resolved column and class names; conventions are applied once,
//! at declaration.

pub mod options;
pub mod registry;

pub use options::{BelongsToOptions, HasManyOptions};
pub use registry::AssociationRegistry;

use crate::inflect;

/// Default key column for both sides of a foreign-key relationship
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Discriminant of an association, used in errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    BelongsTo,
    HasMany,
    HasOneThrough,
}

impl AssociationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationKind::BelongsTo => "belongs_to",
            AssociationKind::HasMany => "has_many",
            AssociationKind::HasOneThrough => "has_one_through",
        }
    }
}

impl std::fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// This row holds `foreign_key`, matching `primary_key` on the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BelongsTo {
    pub foreign_key: String,
    pub class_name: String,
    pub primary_key: String,
}

/// Target rows hold `foreign_key`, matching `primary_key` on this row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasMany {
    pub foreign_key: String,
    pub class_name: String,
    pub primary_key: String,
}

/// Follows `through_name` on the owner, then `source_name` on its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasOneThrough {
    pub through_name: String,
    pub source_name: String,
}

/// A declared relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    BelongsTo(BelongsTo),
    HasMany(HasMany),
    HasOneThrough(HasOneThrough),
}

impl Association {
    /// Declare a belongs-to association named `name`
    ///
    /// Defaults: `foreign_key = <name>_id`, `class_name = classify(name)`,
    /// `primary_key = id`.
    pub fn belongs_to(name: &str, options: BelongsToOptions) -> Self {
        Association::BelongsTo(BelongsTo {
            foreign_key: options
                .foreign_key
                .unwrap_or_else(|| inflect::belongs_to_foreign_key(name)),
            class_name: options
                .class_name
                .unwrap_or_else(|| inflect::classify(name)),
            primary_key: options
                .primary_key
                .unwrap_or_else(|| DEFAULT_PRIMARY_KEY.to_string()),
        })
    }

    /// Declare a has-many association named `name` on `owner_type_name`
    ///
    /// Defaults: `foreign_key = lowercase(<owner>_id)`,
    /// `class_name = classify(name)`, `primary_key = id`.
    pub fn has_many(name: &str, owner_type_name: &str, options: HasManyOptions) -> Self {
        Association::HasMany(HasMany {
            foreign_key: options
                .foreign_key
                .unwrap_or_else(|| inflect::has_many_foreign_key(owner_type_name)),
            class_name: options
                .class_name
                .unwrap_or_else(|| inflect::classify(name)),
            primary_key: options
                .primary_key
                .unwrap_or_else(|| DEFAULT_PRIMARY_KEY.to_string()),
        })
    }

    /// Declare a has-one-through association
    pub fn has_one_through(through_name: impl Into<String>, source_name: impl Into<String>) -> Self {
        Association::HasOneThrough(HasOneThrough {
            through_name: through_name.into(),
            source_name: source_name.into(),
        })
    }

    pub fn kind(&self) -> AssociationKind {
        match self {
            Association::BelongsTo(_) => AssociationKind::BelongsTo,
            Association::HasMany(_) => AssociationKind::HasMany,
            Association::HasOneThrough(_) => AssociationKind::HasOneThrough,
        }
    }

    /// Class name of the directly referenced model
    ///
    /// `None` for has-one-through, whose target depends on two other
    /// associations.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Association::BelongsTo(bt) => Some(bt.class_name.as_str()),
            Association::HasMany(hm) => Some(hm.class_name.as_str()),
            Association::HasOneThrough(_) => None,
        }
    }
}
