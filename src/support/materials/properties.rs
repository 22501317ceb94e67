use thiserror::Error;
use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity, ThermalConductivity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::constraint::{Constrained, ConstraintError, StrictlyPositive};

/// Errors raised when material properties are not physical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MaterialError {
    #[error("thermal conductivity is invalid: {0}")]
    Conductivity(ConstraintError),
    #[error("specific heat is invalid: {0}")]
    SpecificHeat(ConstraintError),
    #[error("density is invalid: {0}")]
    Density(ConstraintError),
}

/// Bulk thermal properties of a material.
///
/// All three values are strictly positive and finite. The struct is immutable
/// once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    thermal_conductivity: ThermalConductivity,
    specific_heat: SpecificHeatCapacity,
    density: MassDensity,
}

impl MaterialProperties {
    /// Constructs validated material properties.
    ///
    /// # Errors
    ///
    /// Returns a [`MaterialError`] naming the first property that is zero,
    /// negative, `NaN`, or infinite.
    pub fn new(
        thermal_conductivity: ThermalConductivity,
        specific_heat: SpecificHeatCapacity,
        density: MassDensity,
    ) -> Result<Self, MaterialError> {
        let thermal_conductivity = positive_finite(
            thermal_conductivity,
            thermal_conductivity.get::<watt_per_meter_kelvin>(),
        )
        .map_err(MaterialError::Conductivity)?;
        let specific_heat =
            positive_finite(specific_heat, specific_heat.get::<joule_per_kilogram_kelvin>())
                .map_err(MaterialError::SpecificHeat)?;
        let density = positive_finite(density, density.get::<kilogram_per_cubic_meter>())
            .map_err(MaterialError::Density)?;

        Ok(Self {
            thermal_conductivity,
            specific_heat,
            density,
        })
    }

    /// Constructs material properties from SI values (W/m·K, J/kg·K, kg/m³).
    ///
    /// # Errors
    ///
    /// Same as [`MaterialProperties::new`].
    pub fn from_si(
        conductivity: f64,
        specific_heat: f64,
        density: f64,
    ) -> Result<Self, MaterialError> {
        Self::new(
            ThermalConductivity::new::<watt_per_meter_kelvin>(conductivity),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(specific_heat),
            MassDensity::new::<kilogram_per_cubic_meter>(density),
        )
    }

    #[must_use]
    pub fn thermal_conductivity(&self) -> ThermalConductivity {
        self.thermal_conductivity
    }

    #[must_use]
    pub fn specific_heat(&self) -> SpecificHeatCapacity {
        self.specific_heat
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        self.density
    }

    /// Heat capacity per unit volume, `ρ·c`, in J/(m³·K).
    #[must_use]
    pub fn volumetric_heat_capacity(&self) -> f64 {
        self.density.get::<kilogram_per_cubic_meter>()
            * self.specific_heat.get::<joule_per_kilogram_kelvin>()
    }

    /// Thermal diffusivity, `k / (ρ·c)`, in m²/s.
    #[must_use]
    pub fn thermal_diffusivity(&self) -> f64 {
        self.thermal_conductivity.get::<watt_per_meter_kelvin>() / self.volumetric_heat_capacity()
    }
}

fn positive_finite<T>(value: T, si_value: f64) -> Result<T, ConstraintError>
where
    T: PartialOrd + num_traits::Zero,
{
    let value = Constrained::<T, StrictlyPositive>::new(value)?;
    if !si_value.is_finite() {
        return Err(ConstraintError::NotFinite);
    }
    Ok(value.into_inner())
}
