use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// [`uom`] does not subtract two [`ThermodynamicTemperature`] values into a
/// [`TemperatureInterval`]; see
/// [#380](https://github.com/iliekturtles/uom/issues/380).
/// Margins against reflow and damage limits are intervals, so every
/// limit comparison in this crate goes through [`minus`](Self::minus).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn margin_sign_follows_operand_order() {
        let reflow_min = ThermodynamicTemperature::new::<degree_celsius>(217.0);
        let peak = ThermodynamicTemperature::new::<degree_celsius>(225.0);

        assert_relative_eq!(peak.minus(reflow_min).get::<delta_kelvin>(), 8.0, epsilon = 1e-9);
        assert_relative_eq!(reflow_min.minus(peak).get::<delta_kelvin>(), -8.0, epsilon = 1e-9);
    }

    #[test]
    fn celsius_and_kelvin_agree() {
        let t_c = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        let t_k = ThermodynamicTemperature::new::<abs_kelvin>(298.15);
        assert_relative_eq!(t_c.minus(t_k).get::<delta_kelvin>(), 0.0, epsilon = 1e-9);
    }
}
