use std::f64::consts::PI;

use thiserror::Error;
use uom::si::{
    area::square_meter,
    energy::joule,
    f64::{Area, Energy, Length, Power, Time},
    length::meter,
    power::watt,
    time::second,
};

use crate::support::constraint::{
    Constrained, Constraint, ConstraintError, NonNegative, StrictlyPositive,
};

/// Errors raised for malformed pulse parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PulseError {
    #[error("laser power is invalid: {0}")]
    Power(ConstraintError),
    #[error("pulse duration is invalid: {0}")]
    Duration(ConstraintError),
    #[error("spot radius is invalid: {0}")]
    SpotRadius(ConstraintError),
}

/// A candidate laser pulse: constant power over a dwell time on a circular spot.
///
/// Power and duration may be zero; the spot radius is strictly positive.
/// All three are finite. Construction validates, so a `HeatPulse` in hand is
/// always usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPulse {
    power: Power,
    duration: Time,
    spot_radius: Length,
}

impl HeatPulse {
    /// Constructs a validated pulse.
    ///
    /// # Errors
    ///
    /// Returns a [`PulseError`] naming the first invalid parameter.
    pub fn new(power: Power, duration: Time, spot_radius: Length) -> Result<Self, PulseError> {
        let power = finite(NonNegative::new(power), power.get::<watt>()).map_err(PulseError::Power)?;
        let duration =
            finite(NonNegative::new(duration), duration.get::<second>()).map_err(PulseError::Duration)?;
        let spot_radius = finite(StrictlyPositive::new(spot_radius), spot_radius.get::<meter>())
            .map_err(PulseError::SpotRadius)?;
        Ok(Self::from_constrained(power, duration, spot_radius))
    }

    /// Constructs a pulse from parameters whose signs are already checked.
    ///
    /// Finiteness is the caller's responsibility.
    #[must_use]
    pub fn from_constrained(
        power: Constrained<Power, NonNegative>,
        duration: Constrained<Time, NonNegative>,
        spot_radius: Constrained<Length, StrictlyPositive>,
    ) -> Self {
        Self {
            power: power.into_inner(),
            duration: duration.into_inner(),
            spot_radius: spot_radius.into_inner(),
        }
    }

    #[must_use]
    pub fn power(&self) -> Power {
        self.power
    }

    /// Dwell time, the interval during which the laser is on.
    #[must_use]
    pub fn duration(&self) -> Time {
        self.duration
    }

    #[must_use]
    pub fn spot_radius(&self) -> Length {
        self.spot_radius
    }

    /// Illuminated area, `π·r²`.
    #[must_use]
    pub fn spot_area(&self) -> Area {
        let r = self.spot_radius.get::<meter>();
        Area::new::<square_meter>(PI * r * r)
    }

    /// Delivered energy, power × duration.
    #[must_use]
    pub fn energy(&self) -> Energy {
        Energy::new::<joule>(self.power.get::<watt>() * self.duration.get::<second>())
    }
}

fn finite<T, C>(
    value: Result<Constrained<T, C>, ConstraintError>,
    si_value: f64,
) -> Result<Constrained<T, C>, ConstraintError>
where
    C: Constraint<T>,
{
    let value = value?;
    if si_value.is_finite() {
        Ok(value)
    } else {
        Err(ConstraintError::NotFinite)
    }
}
