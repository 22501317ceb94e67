use thiserror::Error;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

/// Errors raised for inconsistent process limits.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LimitsError {
    /// A limit is `NaN` or infinite.
    #[error("temperature limits must be finite")]
    NotFinite,

    /// The reflow window is empty or inverted.
    #[error("reflow minimum {min:?} must be below reflow maximum {max:?}")]
    ReflowWindow {
        min: ThermodynamicTemperature,
        max: ThermodynamicTemperature,
    },

    /// A damage ceiling sits below the top of the reflow window.
    #[error("{layer} damage ceiling {ceiling:?} is below reflow maximum {reflow_max:?}")]
    Ceiling {
        layer: &'static str,
        ceiling: ThermodynamicTemperature,
        reflow_max: ThermodynamicTemperature,
    },
}

/// Reflow window for the joint and damage ceilings for the rest of the stack.
///
/// Holds `reflow_min < reflow_max ≤ substrate_damage_max` and
/// `reflow_max ≤ component_damage_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintSpec {
    reflow_min: ThermodynamicTemperature,
    reflow_max: ThermodynamicTemperature,
    substrate_damage_max: ThermodynamicTemperature,
    component_damage_max: ThermodynamicTemperature,
}

impl ConstraintSpec {
    /// Constructs validated limits.
    ///
    /// # Errors
    ///
    /// Returns a [`LimitsError`] if any limit is not finite or the ordering
    /// `reflow_min < reflow_max ≤ ceilings` does not hold.
    pub fn new(
        reflow_min: ThermodynamicTemperature,
        reflow_max: ThermodynamicTemperature,
        substrate_damage_max: ThermodynamicTemperature,
        component_damage_max: ThermodynamicTemperature,
    ) -> Result<Self, LimitsError> {
        let all = [reflow_min, reflow_max, substrate_damage_max, component_damage_max];
        if all.iter().any(|t| !t.get::<kelvin>().is_finite()) {
            return Err(LimitsError::NotFinite);
        }
        if reflow_min >= reflow_max {
            return Err(LimitsError::ReflowWindow {
                min: reflow_min,
                max: reflow_max,
            });
        }
        for (layer, ceiling) in [
            ("substrate", substrate_damage_max),
            ("component", component_damage_max),
        ] {
            if ceiling < reflow_max {
                return Err(LimitsError::Ceiling {
                    layer,
                    ceiling,
                    reflow_max,
                });
            }
        }
        Ok(Self {
            reflow_min,
            reflow_max,
            substrate_damage_max,
            component_damage_max,
        })
    }

    #[must_use]
    pub fn reflow_min(&self) -> ThermodynamicTemperature {
        self.reflow_min
    }

    #[must_use]
    pub fn reflow_max(&self) -> ThermodynamicTemperature {
        self.reflow_max
    }

    #[must_use]
    pub fn substrate_damage_max(&self) -> ThermodynamicTemperature {
        self.substrate_damage_max
    }

    #[must_use]
    pub fn component_damage_max(&self) -> ThermodynamicTemperature {
        self.component_damage_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::thermodynamic_temperature::degree_celsius;

    fn c(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    #[test]
    fn ordering_is_enforced() {
        assert!(ConstraintSpec::new(c(217.0), c(245.0), c(260.0), c(245.0)).is_ok());

        assert!(matches!(
            ConstraintSpec::new(c(220.0), c(220.0), c(250.0), c(300.0)),
            Err(LimitsError::ReflowWindow { .. })
        ));
        assert!(matches!(
            ConstraintSpec::new(c(180.0), c(220.0), c(210.0), c(300.0)),
            Err(LimitsError::Ceiling { layer: "substrate", .. })
        ));
        assert!(matches!(
            ConstraintSpec::new(c(180.0), c(220.0), c(250.0), c(219.0)),
            Err(LimitsError::Ceiling { layer: "component", .. })
        ));
        assert_eq!(
            ConstraintSpec::new(c(180.0), c(f64::NAN), c(250.0), c(300.0)),
            Err(LimitsError::NotFinite)
        );
    }
}
