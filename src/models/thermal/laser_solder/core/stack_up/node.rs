use uom::si::f64::{Length, ThermodynamicTemperature};

use super::LayerRole;

/// One finite-volume cell of a discretized stack-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalNode {
    /// Depth of the cell centre below the laser-facing surface.
    pub position: Length,

    /// Cell thickness along the stack.
    pub thickness: Length,

    /// Current cell temperature.
    pub temperature: ThermodynamicTemperature,

    /// Index of the parent layer in the stack-up.
    pub layer: usize,

    /// Role of the parent layer.
    pub role: LayerRole,
}

/// Conductive link from a node to one of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLink {
    /// Index of the neighbouring node.
    pub node: usize,

    /// Thermal conductance of the link, in W/K.
    pub conductance: f64,
}

/// The neighbours of a node along the stack.
///
/// The laser-facing node has no `prev`; the far substrate node has no `next`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors {
    pub prev: Option<NodeLink>,
    pub next: Option<NodeLink>,
}

impl Neighbors {
    /// Iterates over the links that exist.
    pub fn iter(&self) -> impl Iterator<Item = NodeLink> {
        self.prev.into_iter().chain(self.next)
    }

    /// Sum of the link conductances, in W/K.
    #[must_use]
    pub fn total_conductance(&self) -> f64 {
        self.iter().map(|link| link.conductance).sum()
    }
}
