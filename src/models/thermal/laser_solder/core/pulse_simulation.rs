//! [`twine_core::Model`] adapter from a candidate pulse to its temperature trace.

use thiserror::Error;
use twine_core::Model;
use uom::si::{
    f64::{Length, Power, ThermodynamicTemperature, Time},
    time::second,
};

use super::{
    calibrate::{self, CalibrationConfig, CalibrationError},
    evaluate::ConstraintSpec,
    heat_source::{HeatPulse, HeatSourceModel},
    optimize::{self, Bounds, OptimizationResult, OptimizeError, OptimizerConfig, SearchSpace},
    stack_up::{StackUpError, StackUpModel},
    transient::{SimulationConfig, SimulationError, TemperatureTrace, max_stable_time_step},
};

/// Errors from one simulated pulse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// The model factory could not build a stack-up.
    #[error("stack-up construction failed")]
    StackUp(#[from] StackUpError),

    /// The solver rejected its inputs.
    #[error("simulation failed")]
    Simulation(#[from] SimulationError),
}

/// Simulates pulses on freshly built stack-ups.
///
/// Every call builds a new [`StackUpModel`] from `model_factory` and a new
/// source from `source_factory`, so calls share no mutable state and a
/// trace depends only on the pulse and the factories.
#[derive(Debug, Clone)]
pub struct PulseSimulation<MF, SF> {
    model_factory: MF,
    source_factory: SF,
    config: SimulationConfig,
}

impl<MF, SF, S> PulseSimulation<MF, SF>
where
    MF: Fn() -> Result<StackUpModel, StackUpError>,
    SF: Fn() -> S,
    S: HeatSourceModel,
{
    pub fn new(model_factory: MF, source_factory: SF, config: SimulationConfig) -> Self {
        Self {
            model_factory,
            source_factory,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Stability bound of the stack-up the factory builds.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::StackUp`] if the factory fails.
    pub fn max_stable_time_step(&self) -> Result<Time, RunError> {
        let model = (self.model_factory)()?;
        Ok(max_stable_time_step(&model))
    }

    /// Checks the configured time step once, ahead of a batch of runs.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidTimeStep`] or
    /// [`SimulationError::UnstableStep`] wrapped in [`RunError`], or a factory error.
    pub fn check_time_step(&self) -> Result<(), RunError> {
        let time_step = self.config.time_step;
        let dt = time_step.get::<second>();
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimulationError::InvalidTimeStep { time_step }.into());
        }
        let max_stable = self.max_stable_time_step()?;
        if time_step > max_stable {
            return Err(SimulationError::UnstableStep {
                time_step,
                max_stable,
            }
            .into());
        }
        Ok(())
    }

    /// Searches `space` for the cheapest pulse satisfying `constraints`.
    ///
    /// The time step is checked once, before the first simulation.
    ///
    /// # Errors
    ///
    /// Returns an [`OptimizeError`] for an unstable step, invalid settings,
    /// or a failed simulation.
    pub fn optimize(
        &self,
        constraints: &ConstraintSpec,
        space: &SearchSpace,
        config: &OptimizerConfig,
    ) -> Result<OptimizationResult, OptimizeError> {
        self.check_time_step()?;
        optimize::search(self, constraints, space, config)
    }

    /// Finds the power within `power_bracket` whose joint peak hits `target`
    /// for a fixed dwell, and returns that pulse's trace.
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] for an unstable step, invalid pulse
    /// parameters, a bracket that misses the target, or non-convergence.
    pub fn calibrate_power(
        &self,
        target: ThermodynamicTemperature,
        dwell: Time,
        spot_radius: Length,
        power_bracket: Bounds<Power>,
        config: CalibrationConfig,
    ) -> Result<TemperatureTrace, CalibrationError> {
        self.check_time_step()?;
        calibrate::calibrate_power(self, target, dwell, spot_radius, power_bracket, config)
    }
}

impl<MF, SF, S> Model for PulseSimulation<MF, SF>
where
    MF: Fn() -> Result<StackUpModel, StackUpError>,
    SF: Fn() -> S,
    S: HeatSourceModel,
{
    type Input = HeatPulse;
    type Output = TemperatureTrace;
    type Error = RunError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut model = (self.model_factory)()?;
        let source = (self.source_factory)();
        Ok(self.config.run(&mut model, &source, input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::thermal::laser_solder::core::{
        heat_source::RectangularPulse,
        test_support::{copper_lead_model, pulse},
        transient::simulate,
    };

    #[test]
    fn call_matches_a_direct_simulation() {
        let simulation = PulseSimulation::new(
            || Ok(copper_lead_model()),
            || RectangularPulse,
            SimulationConfig::default(),
        );
        let pulse = pulse(4.0, 0.1);
        let trace = simulation.call(&pulse).unwrap();

        let mut model = copper_lead_model();
        let direct = simulate(
            &mut model,
            &RectangularPulse,
            &pulse,
            Time::new::<second>(0.3),
            Time::new::<second>(1e-4),
        )
        .unwrap();
        assert_eq!(trace, direct);
        assert_eq!(simulation.call(&pulse).unwrap(), trace);
    }

    #[test]
    fn time_step_is_checked_up_front() {
        let config = SimulationConfig {
            time_step: Time::new::<second>(1e-3),
            ..SimulationConfig::default()
        };
        let simulation = PulseSimulation::new(|| Ok(copper_lead_model()), || RectangularPulse, config);

        assert!(matches!(
            simulation.check_time_step(),
            Err(RunError::Simulation(SimulationError::UnstableStep { .. }))
        ));
        assert!(matches!(
            simulation.call(&pulse(4.0, 0.1)),
            Err(RunError::Simulation(SimulationError::UnstableStep { .. }))
        ));
    }

    #[test]
    fn factory_errors_surface() {
        let simulation = PulseSimulation::new(
            || Err(StackUpError::TooFewLayers { count: 1 }),
            || RectangularPulse,
            SimulationConfig::default(),
        );
        assert!(matches!(
            simulation.call(&pulse(4.0, 0.1)),
            Err(RunError::StackUp(StackUpError::TooFewLayers { count: 1 }))
        ));
    }
}
