use crate::models::thermal::laser_solder::core::{
    evaluate::Verdict, heat_source::HeatPulse, transient::TemperatureTrace,
};

/// How an optimization call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A feasible pulse was found and the search bracket closed.
    Converged,

    /// No pulse in the bounds satisfies the constraints.
    ///
    /// The physical setup or the bounds need to change.
    Infeasible,

    /// The iteration or wall-clock budget ran out first.
    ///
    /// Re-running with a larger budget may succeed.
    BudgetExhausted,

    /// No feasible pulse was found, but a feasible dwell band narrower than
    /// the dwell tolerance was not ruled out.
    ///
    /// A smaller dwell tolerance or more dwell levels may find one.
    Inconclusive,

    /// The caller's cancellation flag was raised.
    Cancelled,
}

/// Advisory conditions attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// The best trace's joint was still at its peak when the simulation ended.
    ///
    /// A longer cooldown may reveal a higher peak.
    PeakNotSettled,

    /// The best candidate found violates at least one constraint.
    BestCandidateInfeasible,
}

/// Outcome of one optimization call.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub status: Status,

    /// Best candidate seen: the cheapest feasible pulse, or failing that the
    /// infeasible pulse closest to feasibility.
    pub best_pulse: Option<HeatPulse>,

    pub best_trace: Option<TemperatureTrace>,
    pub best_verdict: Option<Verdict>,

    /// Number of simulations run.
    pub iterations_used: usize,

    pub warnings: Vec<Warning>,
}

impl OptimizationResult {
    /// Returns `true` if a feasible pulse was found.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.best_verdict.is_some_and(|verdict| verdict.feasible)
    }
}
