//! # Laser Reflow
//!
//! Thermal simulation and process-parameter search for laser soldering of
//! through-hole joints, built on
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Process models, starting with
//!   [`laser_solder`](models::thermal::laser_solder).
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Support code
//!
//! Modules in [`support`] are part of the public API because they're useful
//! on their own (material catalogs, numeric constraints, unit helpers), but
//! their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once more than one model, or callers outside this crate, need it.
//!
//! ## Logging
//!
//! Searches emit [`tracing`] events: `debug` per evaluated candidate, `trace`
//! per bisection step, `info` when a search finishes, and `warn` when a time
//! step is rejected as unstable. The crate never installs a subscriber.

pub mod models;
pub mod support;
