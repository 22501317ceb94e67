use uom::si::{f64::Length, length::meter};

use crate::support::{
    constraint::{ConstraintError, StrictlyPositive},
    materials::MaterialId,
};

use super::StackUpError;

/// Function of a layer in the soldered joint.
///
/// Roles decide which nodes the reflow window and the damage ceilings apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Component lead or body; limited by the component damage ceiling.
    Component,
    /// Solder forming the joint; must land inside the reflow window.
    Joint,
    /// Pad annulus or plated barrel; unconstrained.
    Pad,
    /// Board laminate; limited by the substrate damage ceiling.
    Substrate,
}

/// One physical layer of a stack-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    material: MaterialId,
    thickness: Length,
    cross_section_radius: Length,
    role: LayerRole,
}

impl Layer {
    /// Constructs a layer.
    ///
    /// # Errors
    ///
    /// Returns [`StackUpError::Thickness`] or [`StackUpError::Radius`] if either
    /// dimension is not strictly positive and finite.
    pub fn new(
        material: impl Into<MaterialId>,
        thickness: Length,
        cross_section_radius: Length,
        role: LayerRole,
    ) -> Result<Self, StackUpError> {
        check_dimension(thickness).map_err(StackUpError::Thickness)?;
        check_dimension(cross_section_radius).map_err(StackUpError::Radius)?;
        Ok(Self {
            material: material.into(),
            thickness,
            cross_section_radius,
            role,
        })
    }

    #[must_use]
    pub fn material(&self) -> &MaterialId {
        &self.material
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }

    #[must_use]
    pub fn cross_section_radius(&self) -> Length {
        self.cross_section_radius
    }

    #[must_use]
    pub fn role(&self) -> LayerRole {
        self.role
    }
}

fn check_dimension(value: Length) -> Result<(), ConstraintError> {
    StrictlyPositive::new(value)?;
    if value.get::<meter>().is_finite() {
        Ok(())
    } else {
        Err(ConstraintError::NotFinite)
    }
}

/// Ordered layers of a joint, from the laser-facing surface down.
///
/// A valid stack-up has at least two layers, including at least one
/// [`LayerRole::Joint`] and one [`LayerRole::Substrate`] layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StackUpSpec {
    layers: Vec<Layer>,
}

impl StackUpSpec {
    /// Constructs a validated stack-up.
    ///
    /// # Errors
    ///
    /// Returns [`StackUpError::TooFewLayers`] for fewer than two layers and
    /// [`StackUpError::MissingRole`] if no joint or no substrate layer is present.
    pub fn new(layers: Vec<Layer>) -> Result<Self, StackUpError> {
        if layers.len() < 2 {
            return Err(StackUpError::TooFewLayers {
                count: layers.len(),
            });
        }
        for role in [LayerRole::Joint, LayerRole::Substrate] {
            if !layers.iter().any(|layer| layer.role == role) {
                return Err(StackUpError::MissingRole(role));
            }
        }
        Ok(Self { layers })
    }

    /// Layers ordered top (laser-facing) to bottom.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Total thickness of the stack.
    #[must_use]
    pub fn total_thickness(&self) -> Length {
        self.layers
            .iter()
            .fold(Length::new::<meter>(0.0), |sum, layer| sum + layer.thickness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::millimeter;

    fn mm(value: f64) -> Length {
        Length::new::<millimeter>(value)
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            Layer::new("copper", mm(0.0), mm(0.5), LayerRole::Component),
            Err(StackUpError::Thickness(ConstraintError::Zero))
        ));
        assert!(matches!(
            Layer::new("copper", mm(0.3), mm(-0.5), LayerRole::Component),
            Err(StackUpError::Radius(ConstraintError::Negative))
        ));
        assert!(matches!(
            Layer::new("copper", mm(f64::INFINITY), mm(0.5), LayerRole::Component),
            Err(StackUpError::Thickness(ConstraintError::NotFinite))
        ));
    }

    #[test]
    fn requires_joint_and_substrate() {
        let solder = Layer::new("sac305", mm(0.2), mm(0.8), LayerRole::Joint).unwrap();
        let board = Layer::new("fr4", mm(1.6), mm(0.8), LayerRole::Substrate).unwrap();
        let pad = Layer::new("copper", mm(0.1), mm(0.8), LayerRole::Pad).unwrap();

        assert!(matches!(
            StackUpSpec::new(vec![solder.clone()]),
            Err(StackUpError::TooFewLayers { count: 1 })
        ));
        assert!(matches!(
            StackUpSpec::new(vec![solder.clone(), pad.clone()]),
            Err(StackUpError::MissingRole(LayerRole::Substrate))
        ));
        assert!(matches!(
            StackUpSpec::new(vec![pad, board.clone()]),
            Err(StackUpError::MissingRole(LayerRole::Joint))
        ));

        let spec = StackUpSpec::new(vec![solder, board]).unwrap();
        assert_relative_eq!(spec.total_thickness().get::<millimeter>(), 1.8, epsilon = 1e-12);
    }
}
