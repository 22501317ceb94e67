use uom::si::{f64::Time, time::second};

use crate::models::thermal::laser_solder::core::{
    heat_source::{HeatPulse, HeatSourceModel},
    stack_up::StackUpModel,
};

use super::{SimulationError, TemperatureTrace, simulate_sampled};

/// Time-stepping settings for one simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Explicit step size. Must not exceed the model's stability bound.
    pub time_step: Time,

    /// Cooldown after the pulse, as a multiple of the pulse duration.
    ///
    /// The simulated window is `duration × (1 + cooldown_factor)`.
    pub cooldown_factor: f64,

    /// Record every n-th step. Zero is treated as one.
    pub sample_every: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: Time::new::<second>(1e-4),
            cooldown_factor: 2.0,
            sample_every: 1,
        }
    }
}

impl SimulationConfig {
    /// Simulated window for `pulse`: the dwell plus its cooldown.
    #[must_use]
    pub fn total_duration(&self, pulse: &HeatPulse) -> Time {
        pulse.duration() * (1.0 + self.cooldown_factor)
    }

    /// Simulates `pulse` on `model` with these settings.
    ///
    /// # Errors
    ///
    /// See [`simulate_sampled`].
    pub fn run(
        &self,
        model: &mut StackUpModel,
        source: &impl HeatSourceModel,
        pulse: &HeatPulse,
    ) -> Result<TemperatureTrace, SimulationError> {
        simulate_sampled(
            model,
            source,
            pulse,
            self.total_duration(pulse),
            self.time_step,
            self.sample_every,
        )
    }
}
