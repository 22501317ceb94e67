//! Scoring a temperature trace against process limits.

mod limits;

pub use limits::{ConstraintSpec, LimitsError};

use uom::{
    ConstZero,
    si::f64::{TemperatureInterval, Time},
};

use crate::support::units::TemperatureDifference;

use super::{
    stack_up::LayerRole,
    transient::{NodePeak, TemperatureTrace},
};

/// Where the joint peak landed relative to the reflow window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointCondition {
    UnderHeated,
    InWindow,
    OverHeated,
}

/// Signed distance of each peak from the limit it must respect.
///
/// Negative means violated; zero counts as satisfied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Distance from the joint peak to the nearer reflow bound.
    pub joint: TemperatureInterval,

    /// `substrate_damage_max - substrate peak`.
    pub substrate: TemperatureInterval,

    /// `component_damage_max - component peak`, or `None` without a component layer.
    pub component: Option<TemperatureInterval>,
}

/// Peaks the margins were computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peaks {
    pub joint: NodePeak,
    pub substrate: NodePeak,
    pub component: Option<NodePeak>,
}

/// Outcome of scoring one trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// `true` iff every margin is non-negative.
    pub feasible: bool,
    pub joint: JointCondition,
    pub margins: Margins,
    pub peaks: Peaks,
}

impl Verdict {
    /// The most negative (or least positive) margin.
    ///
    /// Among infeasible candidates, the one with the largest worst margin is
    /// the closest to feasible.
    #[must_use]
    pub fn worst_margin(&self) -> TemperatureInterval {
        let mut worst = if self.margins.joint < self.margins.substrate {
            self.margins.joint
        } else {
            self.margins.substrate
        };
        if let Some(component) = self.margins.component {
            if component < worst {
                worst = component;
            }
        }
        worst
    }

    /// Returns `true` if the substrate or component exceeded its ceiling.
    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.margins.substrate < TemperatureInterval::ZERO
            || self
                .margins
                .component
                .is_some_and(|m| m < TemperatureInterval::ZERO)
    }
}

/// Scores `trace` against `constraints` using per-node peaks over the whole trace.
#[must_use]
pub fn evaluate(trace: &TemperatureTrace, constraints: &ConstraintSpec) -> Verdict {
    let joint_peak = trace.joint_peak();
    let substrate_peak = trace.role_peak(LayerRole::Substrate).unwrap_or(NodePeak {
        temperature: trace.ambient(),
        time: Time::ZERO,
    });
    let component_peak = trace.role_peak(LayerRole::Component);

    let peak = joint_peak.temperature;
    let (joint, joint_margin) = if peak < constraints.reflow_min() {
        (JointCondition::UnderHeated, peak.minus(constraints.reflow_min()))
    } else if peak > constraints.reflow_max() {
        (JointCondition::OverHeated, constraints.reflow_max().minus(peak))
    } else {
        let above_min = peak.minus(constraints.reflow_min());
        let below_max = constraints.reflow_max().minus(peak);
        let nearer = if above_min < below_max {
            above_min
        } else {
            below_max
        };
        (JointCondition::InWindow, nearer)
    };

    let margins = Margins {
        joint: joint_margin,
        substrate: constraints
            .substrate_damage_max()
            .minus(substrate_peak.temperature),
        component: component_peak.map(|p| constraints.component_damage_max().minus(p.temperature)),
    };

    let mut verdict = Verdict {
        feasible: false,
        joint,
        margins,
        peaks: Peaks {
            joint: joint_peak,
            substrate: substrate_peak,
            component: component_peak,
        },
    };
    verdict.feasible = verdict.worst_margin() >= TemperatureInterval::ZERO;
    verdict
}
