use thiserror::Error;

use crate::support::{constraint::ConstraintError, materials::MaterialId};

use super::{CatalogError, LayerRole};

/// Errors raised while validating or discretizing a stack-up.
///
/// These are caller errors: the stack-up or its material data is malformed,
/// and retrying with the same inputs fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StackUpError {
    /// Fewer than two layers were supplied.
    #[error("stack-up needs at least 2 layers, got {count}")]
    TooFewLayers { count: usize },

    /// A required layer role is absent.
    #[error("stack-up has no {0:?} layer")]
    MissingRole(LayerRole),

    /// A layer thickness is not strictly positive and finite.
    #[error("layer thickness is invalid: {0}")]
    Thickness(ConstraintError),

    /// A layer cross-section radius is not strictly positive and finite.
    #[error("layer cross-section radius is invalid: {0}")]
    Radius(ConstraintError),

    /// The requested node count cannot give every layer a node.
    #[error("discretization count {requested} is below the layer count {layers}")]
    TooFewNodes { requested: usize, layers: usize },

    /// A layer names a material the catalog does not know.
    #[error("layer {layer} uses unknown material `{material}`")]
    UnknownMaterial { layer: usize, material: MaterialId },

    /// The convective film coefficient is not strictly positive and finite.
    #[error("film coefficient is invalid: {0}")]
    FilmCoefficient(ConstraintError),

    /// The ambient temperature is `NaN` or infinite.
    #[error("ambient temperature must be finite")]
    Ambient,

    /// The component catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
