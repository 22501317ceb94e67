use thiserror::Error;
use uom::si::f64::Time;

/// Errors raised before a transient simulation produces any output.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimulationError {
    /// The time step is zero, negative, or not finite.
    #[error("time step must be positive and finite: time_step={time_step:?}")]
    InvalidTimeStep { time_step: Time },

    /// The time step exceeds the explicit scheme's stability bound.
    ///
    /// This is never coarsened or retried internally; the caller chooses a
    /// smaller step.
    #[error("time step {time_step:?} exceeds the stability bound {max_stable:?}")]
    UnstableStep {
        /// Requested time step.
        time_step: Time,

        /// Largest stable step for the model.
        max_stable: Time,
    },

    /// The simulated window leaves no cooldown after the pulse.
    #[error(
        "total duration {total_duration:?} must exceed the pulse duration {pulse_duration:?}"
    )]
    InsufficientDuration {
        total_duration: Time,
        pulse_duration: Time,
    },
}
