//! Power calibration for a fixed dwell.
//!
//! Finds the laser power whose joint peak equals a target temperature, for
//! reporting a nominal setting alongside an optimized pulse or for fixed-dwell
//! process recipes. Uses bisection on power over a caller-supplied bracket.

mod config;
mod error;
mod problem;

pub use config::CalibrationConfig;
pub use error::CalibrationError;

use twine_core::Model;
use twine_solvers::equation::bisection;
use uom::{
    ConstZero,
    si::{
        f64::{Length, Power, TemperatureInterval, ThermodynamicTemperature, Time},
        power::watt,
        temperature_interval::kelvin as delta_kelvin,
    },
};

use super::{
    heat_source::HeatPulse,
    optimize::Bounds,
    pulse_simulation::RunError,
    transient::TemperatureTrace,
};

use problem::CalibrationProblem;

/// Solves for the power that brings the joint peak to `target`.
///
/// Returns the trace of the calibrated pulse; its [`TemperatureTrace::pulse`]
/// carries the power.
///
/// # Errors
///
/// Returns [`CalibrationError`] for invalid dwell or spot radius, a failed
/// run, a bracket that does not straddle the target, or non-convergence.
pub(super) fn calibrate_power<M>(
    simulation: &M,
    target: ThermodynamicTemperature,
    dwell: Time,
    spot_radius: Length,
    power_bracket: Bounds<Power>,
    config: CalibrationConfig,
) -> Result<TemperatureTrace, CalibrationError>
where
    M: Model<Input = HeatPulse, Output = TemperatureTrace, Error = RunError>,
{
    let template = HeatPulse::new(Power::ZERO, dwell, spot_radius)?;
    let problem = CalibrationProblem::new(target, template);

    let solution = bisection::solve(
        simulation,
        &problem,
        [
            power_bracket.lo().get::<watt>().max(0.0),
            power_bracket.hi().get::<watt>(),
        ],
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(CalibrationError::MaxIters {
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output)
}
