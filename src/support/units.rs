//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (temperature, power, length, time).
//! This module provides the pieces the thermal models need that [`uom`] lacks.
//!
//! ## Temperature differences
//!
//! [`TemperatureDifference::minus`] subtracts one absolute temperature from
//! another and yields a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use laser_reflow::support::units::TemperatureDifference;
//!
//! let peak = ThermodynamicTemperature::new::<degree_celsius>(231.0);
//! let reflow = ThermodynamicTemperature::new::<degree_celsius>(217.0);
//! let margin = peak.minus(reflow);
//! // margin is a TemperatureInterval of 14 K
//! ```
//!
//! ## Heat flux
//!
//! [`HeatFlux`] is the areal power density delivered by a laser spot.

mod quantities;
mod temperature_difference;

pub use quantities::HeatFlux;
pub use temperature_difference::TemperatureDifference;
