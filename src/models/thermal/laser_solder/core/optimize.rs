//! Search for the cheapest feasible (power, dwell) pulse.
//!
//! The search assumes the joint peak rises with both power and dwell. It runs
//! in three phases:
//!
//! 1. **Boundary probe.** If the hottest corner (max power, max dwell) cannot
//!    reach reflow, or the coolest corner (min power, min dwell) already
//!    overheats or damages the stack, no pulse in the bounds can work.
//! 2. **Dwell scan.** At a handful of geometrically spaced dwells, bisect on
//!    power for the lowest power that reaches reflow, then classify that
//!    threshold pulse.
//! 3. **Refinement.** Bisect on dwell between the cheapest feasible level
//!    and its shorter neighbour, keeping a shorter dwell only while energy
//!    does not rise. With no feasible level, bisect every pair of adjacent
//!    levels that could hold a feasible dwell between them.
//!
//! Along increasing dwell the threshold pulse is expected to pass through
//! the classes in the order under-heated, component-damaged, feasible,
//! substrate-damaged, over-heated. A pair of levels can hide a feasible dwell
//! only if it straddles the feasible class or breaks that order. When every
//! such pair is bisected down to the dwell tolerance without a hit, the
//! result is [`Status::Inconclusive`]; [`Status::Infeasible`] is reserved for
//! a region the probe or the class order rules out entirely.
//!
//! Each distinct candidate is simulated once; repeats come from a cache.
//! The call owns all search state and drops it on return.

mod config;
mod error;
mod result;
mod search_space;
mod state;

pub use config::OptimizerConfig;
pub use error::OptimizeError;
pub use result::{OptimizationResult, Status, Warning};
pub use search_space::{Bounds, SearchSpace, SearchSpaceError};

use tracing::{debug, info, trace};
use twine_core::Model;
use uom::{
    ConstZero,
    si::{f64::TemperatureInterval, power::watt, time::second},
};

use super::{
    evaluate::{ConstraintSpec, JointCondition, Verdict},
    heat_source::{HeatPulse, HeatSourceModel},
    pulse_simulation::{PulseSimulation, RunError},
    stack_up::{StackUpError, StackUpModel},
    transient::{SimulationConfig, TemperatureTrace},
};

use state::{Halt, SearchState};

/// Classification of the threshold pulse at one dwell.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    /// Even maximum power cannot reach reflow.
    UnderHeated,
    /// The joint reflows but the component exceeds its ceiling.
    ComponentDamaged,
    /// The threshold pulse satisfies every constraint.
    Feasible { energy: f64 },
    /// The joint reflows but the substrate exceeds its ceiling.
    SubstrateDamaged,
    /// The lowest power that reaches reflow overshoots the window.
    OverHeated,
}

impl Level {
    const FEASIBLE_RANK: u8 = 2;

    /// Position in the expected order along increasing dwell.
    fn rank(self) -> u8 {
        match self {
            Level::UnderHeated => 0,
            Level::ComponentDamaged => 1,
            Level::Feasible { .. } => Self::FEASIBLE_RANK,
            Level::SubstrateDamaged => 3,
            Level::OverHeated => 4,
        }
    }
}

/// Returns `true` if a feasible dwell may lie between a shorter dwell
/// classified `short` and a longer one classified `long`.
fn may_hide_feasible(short: Level, long: Level) -> bool {
    let (short, long) = (short.rank(), long.rank());
    (short < Level::FEASIBLE_RANK && long > Level::FEASIBLE_RANK) || short > long
}

/// A dwell interval whose end points are both infeasible.
#[derive(Debug, Clone, Copy)]
struct Gap {
    short: (f64, Level),
    long: (f64, Level),
}

/// Builds a [`PulseSimulation`] from the factories and searches it.
///
/// # Errors
///
/// Returns an [`OptimizeError`] if the configuration is invalid, the time
/// step is unstable for the built stack-up, or a simulation fails.
pub fn optimize<MF, SF, S>(
    model_factory: MF,
    source_factory: SF,
    simulation: SimulationConfig,
    constraints: &ConstraintSpec,
    space: &SearchSpace,
    config: &OptimizerConfig,
) -> Result<OptimizationResult, OptimizeError>
where
    MF: Fn() -> Result<StackUpModel, StackUpError>,
    SF: Fn() -> S,
    S: HeatSourceModel,
{
    PulseSimulation::new(model_factory, source_factory, simulation).optimize(
        constraints,
        space,
        config,
    )
}

/// Runs the search on an already validated simulation.
pub(super) fn search<M>(
    simulation: &M,
    constraints: &ConstraintSpec,
    space: &SearchSpace,
    config: &OptimizerConfig,
) -> Result<OptimizationResult, OptimizeError>
where
    M: Model<Input = HeatPulse, Output = TemperatureTrace, Error = RunError>,
{
    config.validate()?;

    let mut state = SearchState::new(simulation, constraints, space, config);
    let status = match run(&mut state) {
        Ok(status) => status,
        Err(Halt::Budget) => Status::BudgetExhausted,
        Err(Halt::Cancelled) => Status::Cancelled,
        Err(Halt::Failed(err)) => return Err(err),
    };
    let result = state.finish(status);

    info!(
        status = ?result.status,
        iterations = result.iterations_used,
        power_w = result.best_pulse.map(|p| p.power().get::<watt>()),
        dwell_s = result.best_pulse.map(|p| p.duration().get::<second>()),
        feasible = result.is_feasible(),
        "optimization finished"
    );
    Ok(result)
}

fn run<M>(state: &mut SearchState<'_, M>) -> Result<Status, Halt>
where
    M: Model<Input = HeatPulse, Output = TemperatureTrace, Error = RunError>,
{
    let power = state.space().power();
    let dwell = state.space().dwell();
    let (p_lo, p_hi) = (power.lo().get::<watt>(), power.hi().get::<watt>());
    let (t_lo, t_hi) = (dwell.lo().get::<second>(), dwell.hi().get::<second>());

    let hottest = state.evaluate(p_hi, t_hi)?;
    if hottest.joint == JointCondition::UnderHeated {
        return Ok(Status::Infeasible);
    }
    let coolest = state.evaluate(p_lo, t_lo)?;
    if coolest.feasible {
        return Ok(Status::Converged);
    }
    if coolest.joint == JointCondition::OverHeated || coolest.is_damaged() {
        return Ok(Status::Infeasible);
    }

    let dwells = dwell_levels(t_lo, t_hi, state.config().levels());
    let mut levels = Vec::with_capacity(dwells.len());
    for &seconds in &dwells {
        let level = probe_dwell(state, seconds)?;
        debug!(dwell_s = seconds, level = ?level, "resolved dwell level");
        levels.push(level);
    }

    let cheapest = levels
        .iter()
        .enumerate()
        .filter_map(|(i, level)| match level {
            Level::Feasible { energy } => Some((i, *energy)),
            _ => None,
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((index, energy)) = cheapest {
        if index > 0 {
            refine_shorter(state, dwells[index - 1], dwells[index], energy)?;
        }
        return Ok(Status::Converged);
    }

    let mut gaps: Vec<Gap> = (1..dwells.len())
        .rev()
        .map(|i| Gap {
            short: (dwells[i - 1], levels[i - 1]),
            long: (dwells[i], levels[i]),
        })
        .filter(|gap| may_hide_feasible(gap.short.1, gap.long.1))
        .collect();

    let tolerance = state.config().dwell_tolerance.get::<second>();
    let mut unresolved = false;
    while let Some(gap) = gaps.pop() {
        let ((lo, lo_level), (hi, hi_level)) = (gap.short, gap.long);
        if hi - lo <= tolerance {
            unresolved = true;
            continue;
        }
        let mid = 0.5 * (lo + hi);
        let level = probe_dwell(state, mid)?;
        debug!(dwell_s = mid, level = ?level, "split dwell gap");
        if let Level::Feasible { energy } = level {
            refine_shorter(state, lo, mid, energy)?;
            return Ok(Status::Converged);
        }
        // Longer half first so the shorter half is popped next.
        if may_hide_feasible(level, hi_level) {
            gaps.push(Gap {
                short: (mid, level),
                long: (hi, hi_level),
            });
        }
        if may_hide_feasible(lo_level, level) {
            gaps.push(Gap {
                short: (lo, lo_level),
                long: (mid, level),
            });
        }
    }

    if unresolved {
        Ok(Status::Inconclusive)
    } else {
        Ok(Status::Infeasible)
    }
}

/// Geometrically spaced dwells from `lo` to `hi` inclusive.
fn dwell_levels(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let ratio = hi / lo;
    #[allow(clippy::cast_precision_loss)]
    let steps = (count - 1) as f64;
    let mut dwells: Vec<f64> = (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let fraction = i as f64 / steps;
            lo * ratio.powf(fraction)
        })
        .collect();
    dwells[count - 1] = hi;
    dwells
}

/// Finds the lowest power that reaches reflow at `dwell` and classifies it.
fn probe_dwell<M>(state: &mut SearchState<'_, M>, dwell: f64) -> Result<Level, Halt>
where
    M: Model<Input = HeatPulse, Output = TemperatureTrace, Error = RunError>,
{
    let power = state.space().power();
    let tolerance = state.config().power_tolerance.get::<watt>();
    let (mut lo, mut hi) = (power.lo().get::<watt>(), power.hi().get::<watt>());

    let mut at_hi = state.evaluate(hi, dwell)?;
    if at_hi.joint == JointCondition::UnderHeated {
        return Ok(Level::UnderHeated);
    }

    while hi - lo > tolerance {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let verdict = state.evaluate(mid, dwell)?;
        trace!(dwell_s = dwell, power_w = mid, joint = ?verdict.joint, "power bisection step");
        if verdict.joint == JointCondition::UnderHeated {
            lo = mid;
        } else {
            hi = mid;
            at_hi = verdict;
        }
    }

    Ok(classify(&at_hi, hi * dwell))
}

fn classify(verdict: &Verdict, energy: f64) -> Level {
    if verdict.feasible {
        Level::Feasible { energy }
    } else if verdict.joint == JointCondition::OverHeated {
        Level::OverHeated
    } else if verdict
        .margins
        .component
        .is_some_and(|margin| margin < TemperatureInterval::ZERO)
    {
        Level::ComponentDamaged
    } else {
        Level::SubstrateDamaged
    }
}

/// Bisects dwell in `[lo, hi]`, moving toward shorter dwell while the
/// threshold pulse stays feasible and its energy does not rise.
fn refine_shorter<M>(
    state: &mut SearchState<'_, M>,
    mut lo: f64,
    mut hi: f64,
    mut energy: f64,
) -> Result<(), Halt>
where
    M: Model<Input = HeatPulse, Output = TemperatureTrace, Error = RunError>,
{
    let tolerance = state.config().dwell_tolerance.get::<second>();
    while hi - lo > tolerance {
        let mid = 0.5 * (lo + hi);
        match probe_dwell(state, mid)? {
            Level::Feasible { energy: at_mid } if at_mid <= energy => {
                hi = mid;
                energy = at_mid;
            }
            _ => lo = mid,
        }
    }
    debug!(
        dwell_s = hi,
        energy_j = energy,
        best_energy_j = state.best_feasible_energy(),
        "refined dwell"
    );
    Ok(())
}
