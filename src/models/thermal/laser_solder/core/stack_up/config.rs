use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

/// Thermal condition at the far (bottom) face of the substrate.
///
/// The laser-facing surface is adiabatic apart from the absorbed laser power,
/// and the model has no lateral losses; this is the only heat sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FarBoundary {
    /// The far substrate face is held at ambient temperature.
    ///
    /// The face sits half a cell below the last node, so the last node itself
    /// is free to warm.
    Dirichlet,
    /// The far substrate face loses heat to ambient air.
    ///
    /// `h` is the film coefficient in W/(m²·K).
    Convective { h: f64 },
}

/// Discretization settings for building a [`StackUpModel`](super::StackUpModel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    /// Minimum number of nodes across the whole stack.
    pub discretization_count: usize,

    /// Initial temperature of every node and the far-boundary temperature.
    pub ambient: ThermodynamicTemperature,

    /// Far substrate boundary condition.
    pub far_boundary: FarBoundary,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            discretization_count: 20,
            ambient: ThermodynamicTemperature::new::<degree_celsius>(25.0),
            far_boundary: FarBoundary::Dirichlet,
        }
    }
}
