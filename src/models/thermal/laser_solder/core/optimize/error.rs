use thiserror::Error;

use crate::models::thermal::laser_solder::core::{
    heat_source::PulseError, pulse_simulation::RunError,
};

use super::SearchSpaceError;

/// Errors that stop an optimization call.
///
/// Running out of budget, finding no solution, and cancellation are
/// statuses on [`OptimizationResult`](super::OptimizationResult), not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// The search region is malformed.
    #[error("invalid search space")]
    InvalidSearchSpace(#[from] SearchSpaceError),

    /// A power or dwell tolerance is not strictly positive and finite.
    #[error("optimizer tolerances must be positive and finite")]
    InvalidTolerance,

    /// A candidate pulse could not be constructed.
    #[error("invalid candidate pulse")]
    Pulse(#[from] PulseError),

    /// Building the stack-up or running the solver failed.
    ///
    /// An unstable time step lands here, before the first iteration.
    #[error("simulation run failed")]
    Run(#[from] RunError),
}
