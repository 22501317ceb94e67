use thiserror::Error;
use uom::si::{
    f64::{Length, Power, Time},
    length::meter,
    power::watt,
    time::second,
};

use crate::support::constraint::{ConstraintError, StrictlyPositive};

/// Errors raised for a malformed search region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchSpaceError {
    /// A bound is `NaN` or infinite, or the lower bound exceeds the upper.
    #[error("bounds must be finite with lo <= hi")]
    Bounds,

    /// The lower power bound is negative.
    #[error("power bounds must be non-negative")]
    NegativePower,

    /// The lower dwell bound is zero or negative.
    #[error("dwell bounds must be strictly positive")]
    NonPositiveDwell,

    #[error("spot radius is invalid: {0}")]
    SpotRadius(ConstraintError),
}

/// A closed interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    lo: T,
    hi: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Constructs bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SearchSpaceError::Bounds`] if `lo > hi` or they are unordered (`NaN`).
    pub fn new(lo: T, hi: T) -> Result<Self, SearchSpaceError> {
        if lo <= hi {
            Ok(Self { lo, hi })
        } else {
            Err(SearchSpaceError::Bounds)
        }
    }

    pub fn lo(&self) -> T {
        self.lo
    }

    pub fn hi(&self) -> T {
        self.hi
    }
}

/// The (power, dwell) region the optimizer may explore, and the spot it fires on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSpace {
    power: Bounds<Power>,
    dwell: Bounds<Time>,
    spot_radius: Length,
}

impl SearchSpace {
    /// Constructs a search region.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchSpaceError`] if a bound is infinite, power may go
    /// negative, dwell may reach zero, or the spot radius is not positive.
    pub fn new(
        power: Bounds<Power>,
        dwell: Bounds<Time>,
        spot_radius: Length,
    ) -> Result<Self, SearchSpaceError> {
        let finite = [
            power.lo.get::<watt>(),
            power.hi.get::<watt>(),
            dwell.lo.get::<second>(),
            dwell.hi.get::<second>(),
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(SearchSpaceError::Bounds);
        }
        if power.lo.get::<watt>() < 0.0 {
            return Err(SearchSpaceError::NegativePower);
        }
        if dwell.lo.get::<second>() <= 0.0 {
            return Err(SearchSpaceError::NonPositiveDwell);
        }
        StrictlyPositive::new(spot_radius).map_err(SearchSpaceError::SpotRadius)?;
        if !spot_radius.get::<meter>().is_finite() {
            return Err(SearchSpaceError::SpotRadius(ConstraintError::NotFinite));
        }
        Ok(Self {
            power,
            dwell,
            spot_radius,
        })
    }

    #[must_use]
    pub fn power(&self) -> Bounds<Power> {
        self.power
    }

    #[must_use]
    pub fn dwell(&self) -> Bounds<Time> {
        self.dwell
    }

    #[must_use]
    pub fn spot_radius(&self) -> Length {
        self.spot_radius
    }

    /// Clamps a power in watts into the bounds.
    pub(super) fn clamp_power(&self, watts: f64) -> f64 {
        watts.clamp(self.power.lo.get::<watt>(), self.power.hi.get::<watt>())
    }

    /// Clamps a dwell in seconds into the bounds.
    pub(super) fn clamp_dwell(&self, seconds: f64) -> f64 {
        seconds.clamp(self.dwell.lo.get::<second>(), self.dwell.hi.get::<second>())
    }
}
