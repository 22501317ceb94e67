use std::collections::HashMap;

use thiserror::Error;

use super::StackUpSpec;

/// Errors returned by a [`StackUpCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("component `{component_id}` is not in the catalog")]
    NotFound { component_id: String },
}

/// Read-only lookup of a component's pad stack-up.
pub trait StackUpCatalog {
    /// Returns the stack-up for `component_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the component is unknown.
    fn lookup(&self, component_id: &str) -> Result<StackUpSpec, CatalogError>;
}

/// An in-memory [`StackUpCatalog`] keyed by component identifier.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    stack_ups: HashMap<String, StackUpSpec>,
}

impl ComponentCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a component's stack-up, returning the updated catalog.
    #[must_use]
    pub fn with_stack_up(mut self, component_id: impl Into<String>, spec: StackUpSpec) -> Self {
        self.insert(component_id, spec);
        self
    }

    /// Adds or replaces a component's stack-up.
    pub fn insert(&mut self, component_id: impl Into<String>, spec: StackUpSpec) {
        self.stack_ups.insert(component_id.into(), spec);
    }
}

impl StackUpCatalog for ComponentCatalog {
    fn lookup(&self, component_id: &str) -> Result<StackUpSpec, CatalogError> {
        self.stack_ups
            .get(component_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                component_id: component_id.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::thermal::laser_solder::core::test_support::copper_lead_spec;

    #[test]
    fn lookup_finds_registered_components() {
        let catalog = ComponentCatalog::new().with_stack_up("J1", copper_lead_spec());

        assert_eq!(catalog.lookup("J1"), Ok(copper_lead_spec()));
        assert_eq!(
            catalog.lookup("J2"),
            Err(CatalogError::NotFound {
                component_id: "J2".into()
            })
        );
    }
}
