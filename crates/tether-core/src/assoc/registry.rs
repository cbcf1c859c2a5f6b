use std::collections::HashMap;

use super::{Association, AssociationKind};
use crate::errors::{Result, TetherError};

/// Per-model mapping from association name to descriptor
///
/// Names are unique; declaring a name again replaces the earlier descriptor.
#[derive(Debug, Clone, Default)]
pub struct AssociationRegistry {
    entries: HashMap<String, Association>,
}

impl AssociationRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Store `association` under `name`, returning any descriptor it replaced
    pub fn declare(&mut self, name: impl Into<String>, association: Association) -> Option<Association> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), association);
        if previous.is_some() {
            tracing::debug!(association = %name, "association redeclared; later declaration wins");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Association> {
        self.entries.get(name)
    }

    /// Look up `name`, failing with `MissingAssociation` for `model`
    ///
    /// # Errors
    ///
    /// Returns `MissingAssociation` if nothing is declared under `name`.
    pub fn require(&self, model: &str, name: &str) -> Result<&Association> {
        self.entries
            .get(name)
            .ok_or_else(|| TetherError::MissingAssociation {
                model: model.to_string(),
                association: name.to_string(),
            })
    }

    /// Look up `name` and check it is of `expected` kind
    ///
    /// # Errors
    ///
    /// Returns `MissingAssociation` or `AssociationKindMismatch`.
    pub fn require_kind(
        &self,
        model: &str,
        name: &str,
        expected: AssociationKind,
    ) -> Result<&Association> {
        let assoc = self.require(model, name)?;
        if assoc.kind() != expected {
            return Err(TetherError::AssociationKindMismatch {
                model: model.to_string(),
                association: name.to_string(),
                expected: expected.as_str(),
                found: assoc.kind().as_str(),
            });
        }
        Ok(assoc)
    }

    /// Iterate declared associations in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Association)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, assoc)| (name.as_str(), assoc))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assoc::{BelongsToOptions, HasManyOptions};

    #[test]
    fn test_redeclare_replaces() {
        let mut registry = AssociationRegistry::new();
        registry.declare("owner", Association::belongs_to("owner", BelongsToOptions::new()));
        let previous = registry.declare(
            "owner",
            Association::belongs_to("owner", BelongsToOptions::new().class_name("Human")),
        );

        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("owner").and_then(|a| a.class_name()), Some("Human"));
    }

    #[test]
    fn test_require_missing() {
        let registry = AssociationRegistry::new();
        let err = registry.require("Dog", "owner").unwrap_err();
        assert_eq!(
            err,
            TetherError::MissingAssociation {
                model: "Dog".to_string(),
                association: "owner".to_string(),
            }
        );
    }

    #[test]
    fn test_require_kind_mismatch() {
        let mut registry = AssociationRegistry::new();
        registry.declare(
            "dogs",
            Association::has_many("dogs", "Human", HasManyOptions::new()),
        );

        let err = registry
            .require_kind("Human", "dogs", AssociationKind::BelongsTo)
            .unwrap_err();
        assert!(matches!(
            err,
            TetherError::AssociationKindMismatch {
                expected: "belongs_to",
                found: "has_many",
                ..
            }
        ));
    }
}
