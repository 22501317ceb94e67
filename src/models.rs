//! Public process models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the computation and domain logic live. The model module re-exports
//! the public pieces of its `core`; the module layout underneath is an
//! implementation detail.
//!
//! Where a model plugs into [Twine](https://github.com/isentropic-dev/twine),
//! its [`twine_core::Model`] implementation is a thin adapter that delegates to
//! the core API, so solvers from `twine-solvers` can drive it directly.

pub mod thermal;
