use uom::si::{
    f64::{Length, Power, ThermodynamicTemperature, Time},
    length::millimeter,
    power::watt,
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use crate::support::materials::MaterialLibrary;

use super::{
    evaluate::ConstraintSpec,
    heat_source::HeatPulse,
    stack_up::{FarBoundary, Layer, LayerRole, ModelConfig, StackUpModel, StackUpSpec},
};

fn mm(value: f64) -> Length {
    Length::new::<millimeter>(value)
}

fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

pub(super) fn materials() -> MaterialLibrary {
    MaterialLibrary::with_common_materials()
}

pub(super) fn model_config(discretization_count: usize) -> ModelConfig {
    ModelConfig {
        discretization_count,
        ambient: celsius(25.0),
        far_boundary: FarBoundary::Dirichlet,
    }
}

/// Copper lead through SAC305 onto a copper pad over FR-4.
pub(super) fn copper_lead_spec() -> StackUpSpec {
    StackUpSpec::new(vec![
        Layer::new("copper", mm(0.3), mm(0.5), LayerRole::Component).unwrap(),
        Layer::new("sac305", mm(0.2), mm(0.8), LayerRole::Joint).unwrap(),
        Layer::new("copper", mm(0.1), mm(0.8), LayerRole::Pad).unwrap(),
        Layer::new("fr4", mm(1.6), mm(0.8), LayerRole::Substrate).unwrap(),
    ])
    .unwrap()
}

/// A thick, poorly conducting Kovar lead on the same joint.
///
/// At short dwells the lead overheats before the solder reflows.
pub(super) fn kovar_lead_spec() -> StackUpSpec {
    StackUpSpec::new(vec![
        Layer::new("kovar", mm(1.0), mm(0.4), LayerRole::Component).unwrap(),
        Layer::new("sac305", mm(0.2), mm(0.8), LayerRole::Joint).unwrap(),
        Layer::new("copper", mm(0.1), mm(0.8), LayerRole::Pad).unwrap(),
        Layer::new("fr4", mm(1.6), mm(0.8), LayerRole::Substrate).unwrap(),
    ])
    .unwrap()
}

/// 13 nodes; stable below about 1.35e-4 s.
pub(super) fn copper_lead_model() -> StackUpModel {
    StackUpModel::build(&copper_lead_spec(), &materials(), &model_config(12)).unwrap()
}

/// 15 nodes; stable below about 5.9e-4 s.
pub(super) fn kovar_lead_model() -> StackUpModel {
    StackUpModel::build(&kovar_lead_spec(), &materials(), &model_config(14)).unwrap()
}

/// A pulse on a 0.5 mm spot.
pub(super) fn pulse(power: f64, dwell: f64) -> HeatPulse {
    HeatPulse::new(Power::new::<watt>(power), Time::new::<second>(dwell), mm(0.5)).unwrap()
}

/// Reflow 180–220 °C, board ceiling 250 °C, component ceiling 300 °C.
pub(super) fn constraints() -> ConstraintSpec {
    ConstraintSpec::new(celsius(180.0), celsius(220.0), celsius(250.0), celsius(300.0)).unwrap()
}
