//! Laser soldering of through-hole joints.
//!
//! Simulates the thermal response of a component lead, solder joint, pad,
//! and substrate to a rectangular laser pulse, and searches for the
//! (power, dwell) pair that reflows the joint with the least energy while
//! keeping the substrate and component below their damage ceilings.
//!
//! # Example
//!
//! ```
//! use laser_reflow::models::thermal::laser_solder::{
//!     Bounds, ConstraintSpec, Layer, LayerRole, ModelConfig, OptimizerConfig, PulseSimulation,
//!     RectangularPulse, SearchSpace, SimulationConfig, StackUpModel, StackUpSpec,
//! };
//! use laser_reflow::support::materials::MaterialLibrary;
//! use uom::si::{
//!     f64::{Length, Power, ThermodynamicTemperature, Time},
//!     length::millimeter,
//!     power::watt,
//!     thermodynamic_temperature::degree_celsius,
//!     time::second,
//! };
//!
//! let mm = Length::new::<millimeter>;
//! let spec = StackUpSpec::new(vec![
//!     Layer::new("copper", mm(0.3), mm(0.5), LayerRole::Component)?,
//!     Layer::new("sac305", mm(0.2), mm(0.8), LayerRole::Joint)?,
//!     Layer::new("copper", mm(0.1), mm(0.8), LayerRole::Pad)?,
//!     Layer::new("fr4", mm(1.6), mm(0.8), LayerRole::Substrate)?,
//! ])?;
//! let materials = MaterialLibrary::with_common_materials();
//! let config = ModelConfig { discretization_count: 12, ..ModelConfig::default() };
//!
//! let simulation = PulseSimulation::new(
//!     || StackUpModel::build(&spec, &materials, &config),
//!     || RectangularPulse,
//!     SimulationConfig { sample_every: 10, ..SimulationConfig::default() },
//! );
//!
//! let celsius = ThermodynamicTemperature::new::<degree_celsius>;
//! let constraints = ConstraintSpec::new(celsius(180.0), celsius(220.0), celsius(250.0), celsius(300.0))?;
//! let space = SearchSpace::new(
//!     Bounds::new(Power::new::<watt>(1.0), Power::new::<watt>(10.0))?,
//!     Bounds::new(Time::new::<second>(0.1), Time::new::<second>(2.0))?,
//!     Length::new::<millimeter>(0.5),
//! )?;
//!
//! let result = simulation.optimize(&constraints, &space, &OptimizerConfig::default())?;
//! assert!(result.is_feasible());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;

pub use self::core::*;
