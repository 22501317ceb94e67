//! Laser heat input to the top of a stack-up.
//!
//! A [`HeatSourceModel`] is a pure function of time: given a pulse and an
//! instant, it returns the heat flux reaching the laser-facing surface.
//! Beam shaping (ramps, modulation) would be a new implementor; the solver
//! only ever calls [`HeatSourceModel::flux_at`].

mod pulse;

pub use pulse::{HeatPulse, PulseError};

use uom::{
    ConstZero,
    si::{f64::Time, time::second},
};

use crate::support::units::HeatFlux;

/// Converts a laser pulse into a time-varying heat flux.
pub trait HeatSourceModel {
    /// Heat flux applied to the top node at `time` since the pulse started.
    fn flux_at(&self, pulse: &HeatPulse, time: Time) -> HeatFlux;
}

impl<S: HeatSourceModel + ?Sized> HeatSourceModel for &S {
    fn flux_at(&self, pulse: &HeatPulse, time: Time) -> HeatFlux {
        (**self).flux_at(pulse, time)
    }
}

/// A laser that switches fully on at `t = 0` and fully off at the pulse duration.
///
/// Inside `[0, duration)` the flux is the pulse power spread uniformly over
/// the spot, `P / (π·r²)`. Outside that interval it is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RectangularPulse;

impl HeatSourceModel for RectangularPulse {
    fn flux_at(&self, pulse: &HeatPulse, time: Time) -> HeatFlux {
        let t = time.get::<second>();
        if t >= 0.0 && t < pulse.duration().get::<second>() {
            pulse.power() / pulse.spot_area()
        } else {
            HeatFlux::ZERO
        }
    }
}
