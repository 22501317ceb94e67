use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use uom::si::{
    f64::{Power, Time},
    power::watt,
    time::{millisecond, second},
};

use super::OptimizeError;

/// Search settings for one optimization call.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Maximum number of simulations. Cached repeats are free.
    pub max_iterations: usize,

    /// Power bracket width at which a dwell level counts as resolved.
    pub power_tolerance: Power,

    /// Dwell bracket width at which refinement stops.
    pub dwell_tolerance: Time,

    /// Number of geometrically spaced dwell levels in the coarse scan.
    ///
    /// Values below two are raised to two.
    pub dwell_levels: usize,

    /// Optional wall-clock limit, checked before each simulation.
    pub wall_clock_budget: Option<Duration>,

    /// Optional cancellation flag, checked before each simulation.
    ///
    /// A cancel takes effect within one simulation's latency.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            power_tolerance: Power::new::<watt>(0.01),
            dwell_tolerance: Time::new::<millisecond>(10.0),
            dwell_levels: 6,
            wall_clock_budget: None,
            cancel: None,
        }
    }
}

impl OptimizerConfig {
    pub(super) fn validate(&self) -> Result<(), OptimizeError> {
        let power_tol = self.power_tolerance.get::<watt>();
        let dwell_tol = self.dwell_tolerance.get::<second>();
        if power_tol.is_finite() && power_tol > 0.0 && dwell_tol.is_finite() && dwell_tol > 0.0 {
            Ok(())
        } else {
            Err(OptimizeError::InvalidTolerance)
        }
    }

    pub(super) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    pub(super) fn levels(&self) -> usize {
        self.dwell_levels.max(2)
    }
}
