//! One-dimensional transient conduction through a through-hole solder stack,
//! and the search for laser pulses that reflow the joint without damage.
//!
//! A stack-up (component lead, solder, pad, substrate) is discretized into a
//! column of finite-volume nodes. A laser pulse heats the top node; heat
//! conducts down the column and leaves through the far substrate face.
//! Explicit time stepping produces a [`TemperatureTrace`], which is scored
//! against process limits to give a [`Verdict`].
//!
//! [`PulseSimulation`] wraps the solver as a [`twine_core::Model`] and is the
//! entry point for optimization and power calibration.

mod calibrate;
mod evaluate;
mod heat_source;
mod optimize;
mod pulse_simulation;
mod stack_up;
mod transient;

#[cfg(test)]
mod test_support;

pub use calibrate::{CalibrationConfig, CalibrationError};
pub use evaluate::{
    ConstraintSpec, JointCondition, LimitsError, Margins, Peaks, Verdict, evaluate,
};
pub use heat_source::{HeatPulse, HeatSourceModel, PulseError, RectangularPulse};
pub use optimize::{
    Bounds, OptimizationResult, OptimizeError, OptimizerConfig, SearchSpace, SearchSpaceError,
    Status, Warning, optimize,
};
pub use pulse_simulation::{PulseSimulation, RunError};
pub use stack_up::{
    CatalogError, ComponentCatalog, FarBoundary, Layer, LayerRole, ModelConfig, Neighbors,
    NodeLink, StackUpCatalog, StackUpError, StackUpModel, StackUpSpec, ThermalNode,
};
pub use transient::{
    NodePeak, SimulationConfig, SimulationError, TemperatureTrace, TraceSample,
    max_stable_time_step, simulate, simulate_sampled,
};
