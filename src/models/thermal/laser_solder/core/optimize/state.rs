//! Call-scoped search state: budget, candidate cache, and best-so-far.

use std::{collections::HashMap, time::Instant};

use tracing::debug;
use twine_core::Model;
use uom::si::{
    energy::joule,
    f64::{Length, Power, Time},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use crate::models::thermal::laser_solder::core::{
    evaluate::{ConstraintSpec, Verdict, evaluate},
    heat_source::HeatPulse,
    pulse_simulation::RunError,
    transient::TemperatureTrace,
};

use super::{OptimizationResult, OptimizeError, OptimizerConfig, SearchSpace, Status, Warning};

/// Why the search stopped before reaching a conclusion.
#[derive(Debug)]
pub(super) enum Halt {
    Budget,
    Cancelled,
    Failed(OptimizeError),
}

#[derive(Debug)]
struct Best {
    pulse: HeatPulse,
    trace: TemperatureTrace,
    verdict: Verdict,
}

/// Everything one optimization call accumulates.
///
/// Dropped when the call returns, so separate calls never share history.
pub(super) struct SearchState<'a, M> {
    simulation: &'a M,
    constraints: &'a ConstraintSpec,
    space: &'a SearchSpace,
    config: &'a OptimizerConfig,
    started: Instant,
    iterations: usize,
    /// Verdicts keyed by the bit patterns of (watts, seconds).
    cache: HashMap<(u64, u64), Verdict>,
    best: Option<Best>,
}

impl<'a, M> SearchState<'a, M>
where
    M: Model<Input = HeatPulse, Output = TemperatureTrace, Error = RunError>,
{
    pub(super) fn new(
        simulation: &'a M,
        constraints: &'a ConstraintSpec,
        space: &'a SearchSpace,
        config: &'a OptimizerConfig,
    ) -> Self {
        Self {
            simulation,
            constraints,
            space,
            config,
            started: Instant::now(),
            iterations: 0,
            cache: HashMap::new(),
            best: None,
        }
    }

    pub(super) fn space(&self) -> &SearchSpace {
        self.space
    }

    pub(super) fn config(&self) -> &OptimizerConfig {
        self.config
    }

    /// Simulates and scores the candidate, clamped into the search bounds.
    ///
    /// A candidate seen before is answered from the cache without spending
    /// an iteration. Budget and cancellation are checked before each new run.
    pub(super) fn evaluate(&mut self, watts: f64, seconds: f64) -> Result<Verdict, Halt> {
        let watts = self.space.clamp_power(watts);
        let seconds = self.space.clamp_dwell(seconds);
        let key = (watts.to_bits(), seconds.to_bits());
        if let Some(verdict) = self.cache.get(&key) {
            return Ok(*verdict);
        }

        if self.config.is_cancelled() {
            return Err(Halt::Cancelled);
        }
        if self.iterations >= self.config.max_iterations {
            return Err(Halt::Budget);
        }
        if self
            .config
            .wall_clock_budget
            .is_some_and(|budget| self.started.elapsed() >= budget)
        {
            return Err(Halt::Budget);
        }

        let pulse = candidate(watts, seconds, self.space.spot_radius()).map_err(Halt::Failed)?;
        self.iterations += 1;
        let trace = self
            .simulation
            .call(&pulse)
            .map_err(|err| Halt::Failed(err.into()))?;
        let verdict = evaluate(&trace, self.constraints);

        debug!(
            iteration = self.iterations,
            power_w = watts,
            dwell_s = seconds,
            joint_peak_c = verdict.peaks.joint.temperature.get::<degree_celsius>(),
            worst_margin_k = verdict.worst_margin().get::<delta_kelvin>(),
            feasible = verdict.feasible,
            "evaluated candidate"
        );

        if self
            .best
            .as_ref()
            .is_none_or(|best| outranks(&pulse, &verdict, best))
        {
            self.best = Some(Best {
                pulse,
                trace,
                verdict,
            });
        }
        self.cache.insert(key, verdict);
        Ok(verdict)
    }

    /// Energy of the best feasible candidate so far, in joules.
    pub(super) fn best_feasible_energy(&self) -> Option<f64> {
        self.best
            .as_ref()
            .filter(|best| best.verdict.feasible)
            .map(|best| best.pulse.energy().get::<joule>())
    }

    pub(super) fn finish(self, status: Status) -> OptimizationResult {
        let mut warnings = Vec::new();
        if let Some(best) = &self.best {
            if best.trace.joint_peak_at_end() {
                warnings.push(Warning::PeakNotSettled);
            }
            if !best.verdict.feasible {
                warnings.push(Warning::BestCandidateInfeasible);
            }
        }

        let (best_pulse, best_trace, best_verdict) = match self.best {
            Some(best) => (Some(best.pulse), Some(best.trace), Some(best.verdict)),
            None => (None, None, None),
        };

        OptimizationResult {
            status,
            best_pulse,
            best_trace,
            best_verdict,
            iterations_used: self.iterations,
            warnings,
        }
    }
}

fn candidate(watts: f64, seconds: f64, spot_radius: Length) -> Result<HeatPulse, OptimizeError> {
    Ok(HeatPulse::new(
        Power::new::<watt>(watts),
        Time::new::<second>(seconds),
        spot_radius,
    )?)
}

/// Ranks a new candidate against the incumbent.
///
/// Feasible beats infeasible. Feasible candidates rank by energy, then by
/// shorter dwell. Infeasible candidates rank by their worst margin.
fn outranks(pulse: &HeatPulse, verdict: &Verdict, best: &Best) -> bool {
    match (verdict.feasible, best.verdict.feasible) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => {
            let energy = pulse.energy().get::<joule>();
            let best_energy = best.pulse.energy().get::<joule>();
            energy < best_energy
                || (energy == best_energy && pulse.duration() < best.pulse.duration())
        }
        (false, false) => verdict.worst_margin() > best.verdict.worst_margin(),
    }
}
