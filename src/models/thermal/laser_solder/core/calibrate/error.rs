use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::TemperatureInterval;

use crate::models::thermal::laser_solder::core::{
    heat_source::PulseError, pulse_simulation::RunError,
};

/// Errors that can occur while calibrating laser power.
#[derive(Debug, Error)]
pub enum CalibrationError {
    /// The fixed dwell or spot radius is invalid.
    #[error("invalid pulse parameters")]
    Pulse(#[from] PulseError),

    /// The time step or stack-up was rejected before solving.
    #[error("simulation run failed")]
    Run(#[from] RunError),

    /// The bisection solver encountered an error.
    ///
    /// This includes a power bracket that does not straddle the target.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Smallest joint peak residual reached.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
