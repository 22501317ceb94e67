use uom::{
    ConstZero,
    si::f64::{ThermodynamicTemperature, Time},
};

use crate::models::thermal::laser_solder::core::{heat_source::HeatPulse, stack_up::LayerRole};

/// Node temperatures at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSample {
    /// Time since the pulse started.
    pub time: Time,

    /// Temperature of every node, ordered top to bottom.
    pub temperatures: Vec<ThermodynamicTemperature>,
}

/// Highest temperature a node reached and when it first reached it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePeak {
    pub temperature: ThermodynamicTemperature,
    pub time: Time,
}

/// Temperature history of one simulated pulse.
///
/// Peaks are tracked on every solver step, so they are exact even when the
/// samples are decimated. The joint node's peak instant is always among the
/// samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureTrace {
    pub(super) pulse: HeatPulse,
    pub(super) roles: Vec<LayerRole>,
    pub(super) joint_node: usize,
    pub(super) ambient: ThermodynamicTemperature,
    pub(super) samples: Vec<TraceSample>,
    pub(super) peaks: Vec<NodePeak>,
}

impl TemperatureTrace {
    /// The pulse that produced this trace.
    #[must_use]
    pub fn pulse(&self) -> &HeatPulse {
        &self.pulse
    }

    /// Samples in increasing time order, starting at `t = 0`.
    #[must_use]
    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    /// Per-node peaks, ordered top to bottom.
    #[must_use]
    pub fn peaks(&self) -> &[NodePeak] {
        &self.peaks
    }

    /// Layer role of each node.
    #[must_use]
    pub fn roles(&self) -> &[LayerRole] {
        &self.roles
    }

    #[must_use]
    pub fn joint_node(&self) -> usize {
        self.joint_node
    }

    #[must_use]
    pub fn ambient(&self) -> ThermodynamicTemperature {
        self.ambient
    }

    #[must_use]
    pub fn joint_peak(&self) -> NodePeak {
        self.peaks[self.joint_node]
    }

    /// Hottest peak among nodes with `role`, or `None` if the stack has no such layer.
    ///
    /// Ties keep the earlier node.
    #[must_use]
    pub fn role_peak(&self, role: LayerRole) -> Option<NodePeak> {
        self.roles
            .iter()
            .zip(&self.peaks)
            .filter(|(r, _)| **r == role)
            .map(|(_, peak)| *peak)
            .reduce(|hottest, peak| {
                if peak.temperature > hottest.temperature {
                    peak
                } else {
                    hottest
                }
            })
    }

    /// Time of the last sample.
    #[must_use]
    pub fn end_time(&self) -> Time {
        self.samples
            .last()
            .map_or(Time::ZERO, |sample| sample.time)
    }

    /// Returns `true` if the joint was still at its peak when the trace ended.
    ///
    /// A joint still heating at the end means the cooldown window was too
    /// short to observe the true peak.
    #[must_use]
    pub fn joint_peak_at_end(&self) -> bool {
        self.samples.len() > 1 && self.joint_peak().time == self.end_time()
    }
}
