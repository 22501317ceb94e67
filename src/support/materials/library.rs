use std::collections::HashMap;

use super::{MaterialCatalog, MaterialError, MaterialId, MaterialProperties};

/// Typical room-temperature properties: (id, k [W/m·K], c [J/kg·K], ρ [kg/m³]).
///
/// FR-4 uses the through-plane conductivity.
const COMMON_MATERIALS: [(&str, f64, f64, f64); 6] = [
    ("copper", 398.0, 385.0, 8940.0),
    ("sac305", 58.0, 232.0, 7380.0),
    ("sn63pb37", 50.0, 176.0, 8400.0),
    ("fr4", 0.3, 1100.0, 1850.0),
    ("kovar", 17.3, 439.0, 8360.0),
    ("brass", 109.0, 380.0, 8530.0),
];

/// An in-memory [`MaterialCatalog`].
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: HashMap<MaterialId, MaterialProperties>,
}

impl MaterialLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library preloaded with common soldering materials:
    /// `copper`, `sac305`, `sn63pb37`, `fr4`, `kovar`, and `brass`.
    #[must_use]
    pub fn with_common_materials() -> Self {
        let mut library = Self::new();
        for (id, k, c, rho) in COMMON_MATERIALS {
            // The table is constant and every entry is positive and finite.
            if let Ok(properties) = MaterialProperties::from_si(k, c, rho) {
                library.insert(MaterialId::new(id), properties);
            }
        }
        library
    }

    /// Adds or replaces a material, returning the updated library.
    #[must_use]
    pub fn with_material(mut self, id: impl Into<MaterialId>, properties: MaterialProperties) -> Self {
        self.insert(id.into(), properties);
        self
    }

    /// Adds a material given SI values (W/m·K, J/kg·K, kg/m³).
    ///
    /// # Errors
    ///
    /// Returns a [`MaterialError`] if any value is not strictly positive and finite.
    pub fn insert_si(
        &mut self,
        id: impl Into<MaterialId>,
        conductivity: f64,
        specific_heat: f64,
        density: f64,
    ) -> Result<(), MaterialError> {
        let properties = MaterialProperties::from_si(conductivity, specific_heat, density)?;
        self.insert(id.into(), properties);
        Ok(())
    }

    /// Adds or replaces a material.
    pub fn insert(&mut self, id: MaterialId, properties: MaterialProperties) {
        self.materials.insert(id, properties);
    }

    /// Number of materials in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns `true` if the library holds no materials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialCatalog for MaterialLibrary {
    fn material(&self, id: &MaterialId) -> Option<MaterialProperties> {
        self.materials.get(id).copied()
    }
}
