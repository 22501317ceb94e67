use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, TemperatureInterval},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
};

/// Stopping rules for [`calibrate_power`](super::calibrate_power).
///
/// Each bisection step runs one full pulse simulation. The search stops as
/// soon as the power bracket is narrower than `power_tol` or the joint peak
/// lands within `temperature_tol` of the target.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationConfig {
    /// Simulations allowed before giving up with `MaxIters`.
    pub max_iters: usize,

    /// Width of the power bracket considered converged.
    pub power_tol: Power,

    /// Joint peak miss, in either direction, considered on target.
    pub temperature_tol: TemperatureInterval,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            power_tol: Power::new::<watt>(1e-9),
            temperature_tol: TemperatureInterval::new::<delta_kelvin>(1e-6),
        }
    }
}

impl CalibrationConfig {
    /// Power in watts is the only search variable, so only absolute
    /// tolerances apply.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.power_tol.get::<watt>(),
            x_rel_tol: 0.0,
            residual_tol: self.temperature_tol.get::<delta_kelvin>(),
        }
    }
}
