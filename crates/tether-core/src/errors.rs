use thiserror::Error;

/// Result type alias using TetherError
pub type Result<T> = std::result::Result<T, TetherError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Resolution
    NameResolution,
    MissingAssociation,
    AssociationKindMismatch,
    InvalidThrough,

    // Attributes
    UnknownAttribute,
    CatalogNotLoaded,
    MissingPrimaryKey,
    TypeMismatch,

    // Query construction
    EmptyPredicate,

    // Integration/IO
    StoreExecution,
    Io,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NameResolution => "ERR_NAME_RESOLUTION",
            ExErrorKind::MissingAssociation => "ERR_MISSING_ASSOCIATION",
            ExErrorKind::AssociationKindMismatch => "ERR_ASSOCIATION_KIND_MISMATCH",
            ExErrorKind::InvalidThrough => "ERR_INVALID_THROUGH",
            ExErrorKind::UnknownAttribute => "ERR_UNKNOWN_ATTRIBUTE",
            ExErrorKind::CatalogNotLoaded => "ERR_CATALOG_NOT_LOADED",
            ExErrorKind::MissingPrimaryKey => "ERR_MISSING_PRIMARY_KEY",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::EmptyPredicate => "ERR_EMPTY_PREDICATE",
            ExErrorKind::StoreExecution => "ERR_STORE_EXECUTION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional model/column/association context.
/// Produced from `TetherError` for logging and external reporting.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    model: Option<String>,
    column: Option<String>,
    association: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            model: None,
            column: None,
            association: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add model type context
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Add column context
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Add association context
    pub fn with_association(mut self, association: impl Into<String>) -> Self {
        self.association = Some(association.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn association(&self) -> Option<&str> {
        self.association.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(model) = &self.model {
            write!(f, " (model: {})", model)?;
        }
        if let Some(association) = &self.association {
            write!(f, " (association: {})", association)?;
        }
        if let Some(column) = &self.column {
            write!(f, " (column: {})", column)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for mapping operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TetherError {
    /// A class name does not resolve to a registered model type
    #[error("Cannot resolve model type '{class_name}'")]
    NameResolution { class_name: String },

    /// A through/source association name is not registered on a model
    #[error("Association '{association}' is not declared on {model}")]
    MissingAssociation { model: String, association: String },

    /// The association exists but is of a different kind than requested
    #[error("Association '{association}' on {model} is {found}, not {expected}")]
    AssociationKindMismatch {
        model: String,
        association: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A has-one-through leg is not a belongs-to association
    #[error("Association '{association}' on {model} cannot be traversed: {reason}")]
    InvalidThrough {
        model: String,
        association: String,
        reason: String,
    },

    /// A row or accessor references a column absent from the catalog
    #[error("Unknown attribute '{column}' for {model}")]
    UnknownAttribute { model: String, column: String },

    /// A column was accessed before the model's catalog was fetched
    #[error("Column catalog for {model} has not been loaded")]
    CatalogNotLoaded { model: String },

    /// An update was requested for a record without a primary key value
    #[error("Record of {model} has no primary key value")]
    MissingPrimaryKey { model: String },

    /// A record was converted into a typed model of another type
    #[error("Expected a {expected} record, got {found}")]
    TypeMismatch { expected: String, found: String },

    /// A where clause was requested with no predicates
    #[error("Empty predicate map for table {table}")]
    EmptyPredicate { table: String },

    /// The store rejected a statement
    #[error("Store error in {op}: {message}")]
    Store { op: String, message: String },

    /// Filesystem failure while bootstrapping a store
    #[error("IO error in {op}: {message}")]
    Io { op: String, message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl TetherError {
    /// Get the canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            TetherError::NameResolution { .. } => ExErrorKind::NameResolution,
            TetherError::MissingAssociation { .. } => ExErrorKind::MissingAssociation,
            TetherError::AssociationKindMismatch { .. } => ExErrorKind::AssociationKindMismatch,
            TetherError::InvalidThrough { .. } => ExErrorKind::InvalidThrough,
            TetherError::UnknownAttribute { .. } => ExErrorKind::UnknownAttribute,
            TetherError::CatalogNotLoaded { .. } => ExErrorKind::CatalogNotLoaded,
            TetherError::MissingPrimaryKey { .. } => ExErrorKind::MissingPrimaryKey,
            TetherError::TypeMismatch { .. } => ExErrorKind::TypeMismatch,
            TetherError::EmptyPredicate { .. } => ExErrorKind::EmptyPredicate,
            TetherError::Store { .. } => ExErrorKind::StoreExecution,
            TetherError::Io { .. } => ExErrorKind::Io,
            TetherError::Config { .. } => ExErrorKind::Config,
        }
    }
}

/// Conversion from TetherError to ExError
///
/// Keeps the human-readable message and lifts identifying fields into the
/// structured context slots.
impl From<TetherError> for ExError {
    fn from(err: TetherError) -> Self {
        let message = err.to_string();
        let ex = ExError::new(err.kind()).with_message(message);

        match err {
            TetherError::NameResolution { class_name } => ex.with_model(class_name),
            TetherError::MissingAssociation { model, association }
            | TetherError::AssociationKindMismatch {
                model, association, ..
            }
            | TetherError::InvalidThrough {
                model, association, ..
            } => ex.with_model(model).with_association(association),
            TetherError::UnknownAttribute { model, column } => {
                ex.with_model(model).with_column(column)
            }
            TetherError::CatalogNotLoaded { model } | TetherError::MissingPrimaryKey { model } => {
                ex.with_model(model)
            }
            TetherError::TypeMismatch { expected, .. } => ex.with_model(expected),
            TetherError::EmptyPredicate { .. } | TetherError::Config { .. } => ex,
            TetherError::Store { op, .. } | TetherError::Io { op, .. } => ex.with_op(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_context() {
        let ex = ExError::new(ExErrorKind::UnknownAttribute)
            .with_op("hydrate")
            .with_model("Dog")
            .with_column("color")
            .with_message("Unknown attribute 'color' for Dog");

        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_UNKNOWN_ATTRIBUTE]"));
        assert!(rendered.contains("in operation 'hydrate'"));
        assert!(rendered.contains("(model: Dog)"));
        assert!(rendered.contains("(column: color)"));
    }

    #[test]
    fn test_store_error_keeps_op() {
        let err = TetherError::Store {
            op: "execute".to_string(),
            message: "no such table: cats".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::StoreExecution);
        assert_eq!(ex.op(), Some("execute"));
        assert!(ex.message().contains("no such table"));
    }
}
