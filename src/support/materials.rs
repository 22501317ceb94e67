//! Thermal material properties and material lookup.
//!
//! A stack-up names its layers by [`MaterialId`]; the numbers behind those
//! names come from a [`MaterialCatalog`]. Catalogs are passed explicitly to
//! whatever needs them, so a simulation is a pure function of its inputs.
//!
//! [`MaterialLibrary`] is a simple in-memory catalog. Its
//! [`with_common_materials`](MaterialLibrary::with_common_materials)
//! constructor loads typical values for through-hole soldering:
//!
//! ```
//! use laser_reflow::support::materials::{MaterialCatalog, MaterialId, MaterialLibrary};
//!
//! let library = MaterialLibrary::with_common_materials();
//! assert!(library.material(&MaterialId::new("sac305")).is_some());
//! assert!(library.material(&MaterialId::new("unobtainium")).is_none());
//! ```

mod library;
mod properties;

pub use library::MaterialLibrary;
pub use properties::{MaterialError, MaterialProperties};

use std::fmt;

/// Identifier of a material in a [`MaterialCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(String);

impl MaterialId {
    /// Creates a material identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Read-only lookup of material properties by identifier.
pub trait MaterialCatalog {
    /// Returns the properties of `id`, or `None` if the catalog does not know it.
    fn material(&self, id: &MaterialId) -> Option<MaterialProperties>;
}

impl<C: MaterialCatalog + ?Sized> MaterialCatalog for &C {
    fn material(&self, id: &MaterialId) -> Option<MaterialProperties> {
        (**self).material(id)
    }
}
