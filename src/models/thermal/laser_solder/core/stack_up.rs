//! One-dimensional layered thermal path from the laser spot to the board.
//!
//! A [`StackUpSpec`] lists the physical layers top to bottom. Building a
//! [`StackUpModel`] resolves each layer's material through an injected
//! [`MaterialCatalog`] and splits the stack into finite-volume cells:
//!
//! ```text
//!   laser flux ─►┌──────────┐
//!                │ lead     │  node 0 .. (Component)
//!                ├──────────┤
//!                │ solder   │  ...  joint node = deepest solder node
//!                ├──────────┤
//!                │ pad      │
//!                ├──────────┤
//!                │ laminate │  ... node N-1 (Substrate)
//!                └──────────┘
//!                  far face: FarBoundary (ambient)
//! ```
//!
//! Each node stores its heat capacity `ρ·c·A·Δx`. Adjacent nodes are joined by
//! the series conductance of their two half cells,
//! `G = 1 / (Δx_a / 2k_aA_a + Δx_b / 2k_bA_b)`, which handles both material
//! and cross-section changes at layer interfaces.

mod catalog;
mod config;
mod discretize;
mod error;
mod layer;
mod node;

pub use catalog::{CatalogError, ComponentCatalog, StackUpCatalog};
pub use config::{FarBoundary, ModelConfig};
pub use error::StackUpError;
pub use layer::{Layer, LayerRole, StackUpSpec};
pub use node::{Neighbors, NodeLink, ThermalNode};

use std::f64::consts::PI;

use uom::si::{
    area::square_meter,
    f64::{Area, Length, ThermodynamicTemperature},
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{ConstraintError, StrictlyPositive},
    materials::MaterialCatalog,
};

/// A discretized stack-up ready for transient simulation.
///
/// The model owns its node temperatures. A simulation mutates them in place
/// and resets them to ambient before it starts, so a model can be reused for
/// sequential runs but never shared between concurrent ones.
#[derive(Debug, Clone)]
pub struct StackUpModel {
    nodes: Vec<ThermalNode>,
    /// Heat capacity of each node, J/K.
    capacities: Vec<f64>,
    /// Conductance between node `i` and `i + 1`, W/K.
    links: Vec<f64>,
    /// Conductance from the last node to the far boundary, W/K.
    far_conductance: f64,
    top_area: Area,
    joint_node: usize,
    ambient: ThermodynamicTemperature,
}

impl StackUpModel {
    /// Discretizes `spec` into at least `config.discretization_count` nodes.
    ///
    /// # Errors
    ///
    /// Returns a [`StackUpError`] if the node count is below the layer count,
    /// a material is unknown to `materials`, or the boundary settings are invalid.
    pub fn build(
        spec: &StackUpSpec,
        materials: &impl MaterialCatalog,
        config: &ModelConfig,
    ) -> Result<Self, StackUpError> {
        let layers = spec.layers();
        if config.discretization_count < layers.len() {
            return Err(StackUpError::TooFewNodes {
                requested: config.discretization_count,
                layers: layers.len(),
            });
        }
        if !config.ambient.get::<kelvin>().is_finite() {
            return Err(StackUpError::Ambient);
        }

        let properties = layers
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                materials
                    .material(layer.material())
                    .ok_or_else(|| StackUpError::UnknownMaterial {
                        layer: index,
                        material: layer.material().clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let thicknesses: Vec<f64> = layers.iter().map(|l| l.thickness().get::<meter>()).collect();
        let counts = discretize::allocate(&thicknesses, config.discretization_count);

        let total_nodes: usize = counts.iter().sum();
        let mut nodes = Vec::with_capacity(total_nodes);
        let mut capacities = Vec::with_capacity(total_nodes);
        let mut half_resistances = Vec::with_capacity(total_nodes);
        let mut areas = Vec::with_capacity(total_nodes);

        let mut depth = 0.0;
        for (index, ((layer, material), &count)) in
            layers.iter().zip(&properties).zip(&counts).enumerate()
        {
            let radius = layer.cross_section_radius().get::<meter>();
            let area = PI * radius * radius;
            let conductivity = material
                .thermal_conductivity()
                .get::<watt_per_meter_kelvin>();
            #[allow(clippy::cast_precision_loss)]
            let dx = thicknesses[index] / count as f64;

            for cell in 0..count {
                #[allow(clippy::cast_precision_loss)]
                let centre = depth + (cell as f64 + 0.5) * dx;
                nodes.push(ThermalNode {
                    position: Length::new::<meter>(centre),
                    thickness: Length::new::<meter>(dx),
                    temperature: config.ambient,
                    layer: index,
                    role: layer.role(),
                });
                capacities.push(material.volumetric_heat_capacity() * area * dx);
                half_resistances.push(dx / (2.0 * conductivity * area));
                areas.push(area);
            }
            depth += thicknesses[index];
        }

        let links = half_resistances
            .windows(2)
            .map(|pair| 1.0 / (pair[0] + pair[1]))
            .collect();

        let last = total_nodes - 1;
        let far_conductance = match config.far_boundary {
            FarBoundary::Dirichlet => 1.0 / half_resistances[last],
            FarBoundary::Convective { h } => {
                check_film_coefficient(h).map_err(StackUpError::FilmCoefficient)?;
                1.0 / (1.0 / (h * areas[last]) + half_resistances[last])
            }
        };

        let joint_node = joint_node(&nodes).ok_or(StackUpError::MissingRole(LayerRole::Joint))?;

        Ok(Self {
            nodes,
            capacities,
            links,
            far_conductance,
            top_area: Area::new::<square_meter>(areas[0]),
            joint_node,
            ambient: config.ambient,
        })
    }

    /// Looks up `component_id` in `stack_ups` and builds its model.
    ///
    /// # Errors
    ///
    /// Returns [`StackUpError::Catalog`] if the component is unknown, or any
    /// error from [`StackUpModel::build`].
    pub fn from_catalog(
        component_id: &str,
        stack_ups: &impl StackUpCatalog,
        materials: &impl MaterialCatalog,
        config: &ModelConfig,
    ) -> Result<Self, StackUpError> {
        let spec = stack_ups.lookup(component_id)?;
        Self::build(&spec, materials, config)
    }

    /// Nodes ordered from the laser-facing surface down.
    #[must_use]
    pub fn nodes(&self) -> &[ThermalNode] {
        &self.nodes
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the node whose peak temperature is checked against the reflow window.
    ///
    /// This is the deepest node of the first joint layer, where solder wets the pad.
    #[must_use]
    pub fn joint_node(&self) -> usize {
        self.joint_node
    }

    #[must_use]
    pub fn ambient(&self) -> ThermodynamicTemperature {
        self.ambient
    }

    /// Cross-section area of the laser-facing node.
    #[must_use]
    pub fn top_area(&self) -> Area {
        self.top_area
    }

    /// Returns the conductive neighbours of node `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> Neighbors {
        assert!(index < self.nodes.len(), "node index {index} out of bounds");
        let prev = index.checked_sub(1).map(|prev| NodeLink {
            node: prev,
            conductance: self.links[prev],
        });
        let next = self.links.get(index).map(|&conductance| NodeLink {
            node: index + 1,
            conductance,
        });
        Neighbors { prev, next }
    }

    /// Restores every node to ambient temperature.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.temperature = self.ambient;
        }
    }

    /// Heat capacity of node `index`, J/K.
    pub(super) fn heat_capacity(&self, index: usize) -> f64 {
        self.capacities[index]
    }

    /// Conductance from the last node to the far boundary, W/K.
    pub(super) fn far_conductance(&self) -> f64 {
        self.far_conductance
    }

    /// Node temperatures in kelvin.
    pub(super) fn temperatures_kelvin(&self) -> Vec<f64> {
        self.nodes
            .iter()
            .map(|node| node.temperature.get::<kelvin>())
            .collect()
    }

    /// Overwrites node temperatures from kelvin values.
    pub(super) fn store_temperatures(&mut self, kelvins: &[f64]) {
        for (node, &t) in self.nodes.iter_mut().zip(kelvins) {
            node.temperature = ThermodynamicTemperature::new::<kelvin>(t);
        }
    }
}

fn joint_node(nodes: &[ThermalNode]) -> Option<usize> {
    let first = nodes.iter().position(|n| n.role == LayerRole::Joint)?;
    let layer = nodes[first].layer;
    nodes.iter().rposition(|n| n.layer == layer)
}

fn check_film_coefficient(h: f64) -> Result<(), ConstraintError> {
    StrictlyPositive::new(h)?;
    if h.is_finite() {
        Ok(())
    } else {
        Err(ConstraintError::NotFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{length::millimeter, thermodynamic_temperature::degree_celsius};

    use crate::models::thermal::laser_solder::core::test_support::{
        copper_lead_spec, materials, model_config,
    };
    use crate::support::materials::{MaterialId, MaterialLibrary};

    #[test]
    fn node_count_and_positions() {
        let spec = copper_lead_spec();
        for count in [4, 5, 12, 40] {
            let model = StackUpModel::build(&spec, &materials(), &model_config(count)).unwrap();
            assert!(model.node_count() >= count);

            let positions: Vec<f64> = model
                .nodes()
                .iter()
                .map(|n| n.position.get::<millimeter>())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");

            // Cells tile the stack without gaps.
            let covered: f64 = model.nodes().iter().map(|n| n.thickness.get::<millimeter>()).sum();
            assert_relative_eq!(covered, 2.2, epsilon = 1e-9);
        }
    }

    #[test]
    fn spacing_is_uniform_within_a_layer() {
        let model = StackUpModel::build(&copper_lead_spec(), &materials(), &model_config(12)).unwrap();
        let board: Vec<&ThermalNode> = model.nodes().iter().filter(|n| n.layer == 3).collect();
        assert_eq!(board.len(), 9);
        for node in &board {
            assert_relative_eq!(
                node.thickness.get::<millimeter>(),
                1.6 / 9.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn joint_node_is_deepest_solder_cell() {
        let model = StackUpModel::build(&copper_lead_spec(), &materials(), &model_config(12)).unwrap();
        // lead: nodes 0-1, solder: node 2, pad: node 3, board: 4-12
        assert_eq!(model.node_count(), 13);
        assert_eq!(model.joint_node(), 2);
        assert_eq!(model.nodes()[2].role, LayerRole::Joint);

        let model = StackUpModel::build(&copper_lead_spec(), &materials(), &model_config(40)).unwrap();
        let joint = model.joint_node();
        assert_eq!(model.nodes()[joint].role, LayerRole::Joint);
        assert_ne!(model.nodes()[joint + 1].role, LayerRole::Joint);
    }

    #[test]
    fn boundary_nodes_are_one_sided() {
        let model = StackUpModel::build(&copper_lead_spec(), &materials(), &model_config(12)).unwrap();
        let last = model.node_count() - 1;

        let top = model.neighbors(0);
        assert!(top.prev.is_none());
        assert_eq!(top.next.map(|l| l.node), Some(1));

        let bottom = model.neighbors(last);
        assert_eq!(bottom.prev.map(|l| l.node), Some(last - 1));
        assert!(bottom.next.is_none());

        let middle = model.neighbors(5);
        assert_eq!(middle.iter().count(), 2);
        assert_eq!(
            middle.prev.unwrap().conductance,
            model.neighbors(4).next.unwrap().conductance
        );
    }

    #[test]
    fn link_conductance_uses_series_half_cells() {
        // Two equal copper cells: G = kA / dx.
        let library = MaterialLibrary::new().with_material(
            "cu",
            materials().material(&MaterialId::new("copper")).unwrap(),
        );
        let spec = StackUpSpec::new(vec![
            Layer::new("cu", Length::new::<millimeter>(1.0), Length::new::<millimeter>(1.0), LayerRole::Joint).unwrap(),
            Layer::new("cu", Length::new::<millimeter>(1.0), Length::new::<millimeter>(1.0), LayerRole::Substrate).unwrap(),
        ])
        .unwrap();
        let model = StackUpModel::build(&spec, &library, &model_config(2)).unwrap();

        let area = PI * 1e-6;
        let expected = 398.0 * area / 1e-3;
        assert_relative_eq!(model.neighbors(0).next.unwrap().conductance, expected, max_relative = 1e-12);
        // Dirichlet far face is half a cell away.
        assert_relative_eq!(model.far_conductance(), 2.0 * expected, max_relative = 1e-12);
    }

    #[test]
    fn convective_far_boundary_adds_film_resistance() {
        let spec = copper_lead_spec();
        let dirichlet = StackUpModel::build(&spec, &materials(), &model_config(12)).unwrap();
        let convective = StackUpModel::build(
            &spec,
            &materials(),
            &ModelConfig {
                far_boundary: FarBoundary::Convective { h: 20.0 },
                ..model_config(12)
            },
        )
        .unwrap();
        assert!(convective.far_conductance() < dirichlet.far_conductance());

        let invalid = StackUpModel::build(
            &spec,
            &materials(),
            &ModelConfig {
                far_boundary: FarBoundary::Convective { h: 0.0 },
                ..model_config(12)
            },
        );
        assert!(matches!(invalid, Err(StackUpError::FilmCoefficient(ConstraintError::Zero))));
    }

    #[test]
    fn rejects_too_few_nodes_and_unknown_materials() {
        let spec = copper_lead_spec();
        assert!(matches!(
            StackUpModel::build(&spec, &materials(), &model_config(3)),
            Err(StackUpError::TooFewNodes { requested: 3, layers: 4 })
        ));
        assert!(matches!(
            StackUpModel::build(&spec, &MaterialLibrary::new(), &model_config(12)),
            Err(StackUpError::UnknownMaterial { layer: 0, .. })
        ));
    }

    #[test]
    fn reset_restores_ambient() {
        let mut model = StackUpModel::build(&copper_lead_spec(), &materials(), &model_config(12)).unwrap();
        let hot = vec![500.0; model.node_count()];
        model.store_temperatures(&hot);
        assert_relative_eq!(model.nodes()[0].temperature.get::<kelvin>(), 500.0);

        model.reset();
        for node in model.nodes() {
            assert_relative_eq!(node.temperature.get::<degree_celsius>(), 25.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn builds_from_component_catalog() {
        let catalog = ComponentCatalog::new().with_stack_up("J1", copper_lead_spec());
        let model =
            StackUpModel::from_catalog("J1", &catalog, &materials(), &model_config(12)).unwrap();
        assert_eq!(model.node_count(), 13);

        assert!(matches!(
            StackUpModel::from_catalog("J9", &catalog, &materials(), &model_config(12)),
            Err(StackUpError::Catalog(CatalogError::NotFound { .. }))
        ));
    }
}
