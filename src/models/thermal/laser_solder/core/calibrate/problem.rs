//! Problem formulation for power calibration.

use twine_core::EquationProblem;
use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::kelvin,
};

use crate::models::thermal::laser_solder::core::{
    heat_source::{HeatPulse, PulseError},
    transient::TemperatureTrace,
};

/// Equation problem for matching a target joint peak.
///
/// The sole variable is laser power in watts. Dwell and spot radius come from
/// `template`. Computes the residual as `joint peak - target`.
pub(super) struct CalibrationProblem {
    target: ThermodynamicTemperature,
    template: HeatPulse,
}

impl CalibrationProblem {
    pub(super) fn new(target: ThermodynamicTemperature, template: HeatPulse) -> Self {
        Self { target, template }
    }
}

impl EquationProblem<1> for CalibrationProblem {
    type Input = HeatPulse;
    type Output = TemperatureTrace;
    type Error = PulseError;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        // Negative iterates clamp to zero.
        HeatPulse::new(
            Power::new::<watt>(x[0].max(0.0)),
            self.template.duration(),
            self.template.spot_radius(),
        )
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let peak = output.joint_peak().temperature.get::<kelvin>();
        Ok([peak - self.target.get::<kelvin>()])
    }
}
