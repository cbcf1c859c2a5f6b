//! Declaration-time overrides for associations
//!
//! Every field is optional; unset fields fall back to naming conventions when
//! the association is declared.

/// Overrides for a belongs-to association
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BelongsToOptions {
    pub foreign_key: Option<String>,
    pub class_name: Option<String>,
    pub primary_key: Option<String>,
}

impl BelongsToOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column on the owning table holding the target's key
    pub fn foreign_key(mut self, column: impl Into<String>) -> Self {
        self.foreign_key = Some(column.into());
        self
    }

    /// Registered name of the target model type
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Key column on the target table
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }
}

/// Overrides for a has-many association
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HasManyOptions {
    pub foreign_key: Option<String>,
    pub class_name: Option<String>,
    pub primary_key: Option<String>,
}

impl HasManyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column on the target table pointing back at the owner
    pub fn foreign_key(mut self, column: impl Into<String>) -> Self {
        self.foreign_key = Some(column.into());
        self
    }

    /// Registered name of the target model type
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Key column on the owning table
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }
}
