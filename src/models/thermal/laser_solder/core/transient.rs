//! Explicit finite-volume time stepping of a stack-up under a laser pulse.
//!
//! Every step, each node exchanges heat with its neighbours through the link
//! conductances, the last node also loses heat to the far boundary, and the
//! top node absorbs the source flux over `min(spot area, top cross-section)`.
//! Node temperatures advance by forward Euler.
//!
//! The step is checked against [`max_stable_time_step`] before any work is
//! done. An unstable step is an error, never silently reduced.

mod config;
mod error;
mod stability;
mod trace;

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use stability::max_stable_time_step;
pub use trace::{NodePeak, TemperatureTrace, TraceSample};

use std::cmp::Ordering;

use tracing::warn;
use uom::si::{
    area::square_meter,
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::kelvin,
    time::second,
};

use super::{
    heat_source::{HeatPulse, HeatSourceModel},
    stack_up::StackUpModel,
};

/// Simulates `pulse` on `model`, recording every step.
///
/// # Errors
///
/// See [`simulate_sampled`].
pub fn simulate(
    model: &mut StackUpModel,
    source: &impl HeatSourceModel,
    pulse: &HeatPulse,
    total_duration: Time,
    time_step: Time,
) -> Result<TemperatureTrace, SimulationError> {
    simulate_sampled(model, source, pulse, total_duration, time_step, 1)
}

/// Simulates `pulse` on `model`, recording every `sample_every`-th step.
///
/// The model is reset to ambient first, then stepped until `total_duration`
/// is reached or passed. The trace always holds `t = 0`, the final step, and
/// the step at which the joint node peaks. Node peaks are tracked on every
/// step. On return the model holds the final temperatures.
///
/// # Errors
///
/// Returns a [`SimulationError`] before stepping if the time step is not
/// positive and finite, exceeds the stability bound, or if `total_duration`
/// does not exceed the pulse duration.
pub fn simulate_sampled(
    model: &mut StackUpModel,
    source: &impl HeatSourceModel,
    pulse: &HeatPulse,
    total_duration: Time,
    time_step: Time,
    sample_every: usize,
) -> Result<TemperatureTrace, SimulationError> {
    let dt = time_step.get::<second>();
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimulationError::InvalidTimeStep { time_step });
    }

    let max_stable = max_stable_time_step(model);
    if time_step > max_stable {
        warn!(
            time_step = dt,
            max_stable = max_stable.get::<second>(),
            "rejecting unstable time step"
        );
        return Err(SimulationError::UnstableStep {
            time_step,
            max_stable,
        });
    }

    if total_duration.partial_cmp(&pulse.duration()) != Some(Ordering::Greater)
        || !total_duration.get::<second>().is_finite()
    {
        return Err(SimulationError::InsufficientDuration {
            total_duration,
            pulse_duration: pulse.duration(),
        });
    }

    model.reset();

    let sample_every = sample_every.max(1);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (total_duration.get::<second>() / dt - 1e-9).ceil() as usize;

    let n = model.node_count();
    let last = n - 1;
    let joint = model.joint_node();
    let ambient = model.ambient().get::<kelvin>();
    let absorbing_area = pulse
        .spot_area()
        .get::<square_meter>()
        .min(model.top_area().get::<square_meter>());

    let mut temps = model.temperatures_kelvin();
    let mut next = vec![0.0; n];
    let mut peaks: Vec<(f64, f64)> = temps.iter().map(|&t| (t, 0.0)).collect();

    let mut samples = vec![sample(0.0, &temps)];
    let mut joint_peak_sample: Option<TraceSample> = None;

    for step in 0..steps {
        #[allow(clippy::cast_precision_loss)]
        let t = step as f64 * dt;
        let flux = source.flux_at(pulse, Time::new::<second>(t));
        let absorbed = flux.value * absorbing_area;

        for (i, next_t) in next.iter_mut().enumerate() {
            let mut heat = model
                .neighbors(i)
                .iter()
                .map(|link| link.conductance * (temps[link.node] - temps[i]))
                .sum::<f64>();
            if i == 0 {
                heat += absorbed;
            }
            if i == last {
                heat += model.far_conductance() * (ambient - temps[i]);
            }
            *next_t = temps[i] + dt * heat / model.heat_capacity(i);
        }
        std::mem::swap(&mut temps, &mut next);

        #[allow(clippy::cast_precision_loss)]
        let now = (step + 1) as f64 * dt;
        let mut joint_rose = false;
        for (i, (peak, at)) in peaks.iter_mut().enumerate() {
            if temps[i] > *peak {
                *peak = temps[i];
                *at = now;
                joint_rose |= i == joint;
            }
        }

        let recorded = (step + 1) % sample_every == 0 || step + 1 == steps;
        if recorded {
            samples.push(sample(now, &temps));
        }
        if joint_rose {
            joint_peak_sample = (!recorded).then(|| sample(now, &temps));
        }
    }

    if let Some(peak_sample) = joint_peak_sample {
        let at = samples.partition_point(|s| s.time < peak_sample.time);
        samples.insert(at, peak_sample);
    }

    model.store_temperatures(&temps);

    Ok(TemperatureTrace {
        pulse: *pulse,
        roles: model.nodes().iter().map(|node| node.role).collect(),
        joint_node: joint,
        ambient: model.ambient(),
        samples,
        peaks: peaks
            .into_iter()
            .map(|(temperature, time)| NodePeak {
                temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
                time: Time::new::<second>(time),
            })
            .collect(),
    })
}

fn sample(time: f64, temps: &[f64]) -> TraceSample {
    TraceSample {
        time: Time::new::<second>(time),
        temperatures: temps
            .iter()
            .map(|&t| ThermodynamicTemperature::new::<kelvin>(t))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, Power},
        energy::joule,
        length::millimeter,
        power::watt,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::models::thermal::laser_solder::core::{
        heat_source::RectangularPulse,
        stack_up::{FarBoundary, LayerRole, ModelConfig},
        test_support::{copper_lead_model, copper_lead_spec, materials, model_config, pulse},
    };

    fn run(power: f64, dwell: f64) -> TemperatureTrace {
        let mut model = copper_lead_model();
        let pulse = pulse(power, dwell);
        simulate(
            &mut model,
            &RectangularPulse,
            &pulse,
            pulse.duration() * 3.0,
            Time::new::<second>(1e-4),
        )
        .unwrap()
    }

    #[test]
    fn identical_inputs_give_identical_traces() {
        assert_eq!(run(4.0, 0.1), run(4.0, 0.1));
    }

    #[test]
    fn reusing_a_model_resets_it() {
        let mut model = copper_lead_model();
        let pulse = pulse(4.0, 0.1);
        let total = Time::new::<second>(0.3);
        let dt = Time::new::<second>(1e-4);

        let first = simulate(&mut model, &RectangularPulse, &pulse, total, dt).unwrap();
        assert!(model.nodes()[0].temperature > model.ambient());

        let second_run = simulate(&mut model, &RectangularPulse, &pulse, total, dt).unwrap();
        assert_eq!(first, second_run);
    }

    #[test]
    fn zero_power_stays_at_ambient() {
        let trace = run(0.0, 0.1);
        for sample in trace.samples() {
            for t in &sample.temperatures {
                assert_eq!(t.get::<degree_celsius>(), trace.ambient().get::<degree_celsius>());
            }
        }
    }

    #[test]
    fn more_power_never_lowers_the_joint_peak() {
        let peaks: Vec<f64> = [0.5, 1.0, 2.0, 4.0, 8.0]
            .iter()
            .map(|&p| run(p, 0.1).joint_peak().temperature.get::<kelvin>())
            .collect();
        assert!(peaks.windows(2).all(|w| w[0] <= w[1]), "{peaks:?}");
    }

    #[test]
    fn copper_lead_reference_peaks() {
        // Joint peaks from an independent reference integration.
        let cool = run(1.0, 0.1).joint_peak().temperature.get::<degree_celsius>();
        let hot = run(4.0, 0.1).joint_peak().temperature.get::<degree_celsius>();
        assert_relative_eq!(cool, 65.6, epsilon = 0.5);
        assert_relative_eq!(hot, 187.6, epsilon = 0.5);
    }

    #[test]
    fn heat_flows_down_the_stack() {
        let trace = run(4.0, 0.1);
        let peaks = trace.peaks();
        assert!(peaks[0].temperature > peaks[trace.joint_node()].temperature);
        assert!(
            trace.role_peak(LayerRole::Joint).unwrap().temperature
                > trace.role_peak(LayerRole::Substrate).unwrap().temperature
        );
        // The lead peaks when the laser switches off.
        assert_relative_eq!(peaks[0].time.get::<second>(), 0.1, epsilon = 1e-9);
    }

    #[test]
    fn convective_far_face_runs_hotter_than_a_held_one() {
        let trace_with = |far_boundary| {
            let config = ModelConfig {
                far_boundary,
                ..model_config(12)
            };
            let mut model = StackUpModel::build(&copper_lead_spec(), &materials(), &config).unwrap();
            simulate(
                &mut model,
                &RectangularPulse,
                &pulse(1.0, 2.0),
                Time::new::<second>(6.0),
                Time::new::<second>(1e-4),
            )
            .unwrap()
        };
        let held = trace_with(FarBoundary::Dirichlet);
        let cooled = trace_with(FarBoundary::Convective { h: 20.0 });

        assert!(cooled.joint_peak().temperature >= held.joint_peak().temperature);

        // The bottom board cell feels the weaker sink most.
        let last = held.peaks().len() - 1;
        let held_bottom = held.peaks()[last].temperature.get::<degree_celsius>();
        let cooled_bottom = cooled.peaks()[last].temperature.get::<degree_celsius>();
        assert!(cooled_bottom > held_bottom + 100.0, "{held_bottom} vs {cooled_bottom}");
    }

    #[test]
    fn samples_cover_every_step() {
        let trace = run(2.0, 0.1);
        assert_eq!(trace.samples().len(), 3001);
        assert_eq!(trace.samples()[0].time.get::<second>(), 0.0);
        assert_relative_eq!(trace.end_time().get::<second>(), 0.3, epsilon = 1e-9);
        assert!(trace.samples().windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn decimated_trace_keeps_the_joint_peak() {
        let mut model = copper_lead_model();
        let pulse = pulse(4.0, 0.1);
        let total = Time::new::<second>(0.3);
        let dt = Time::new::<second>(1e-4);

        let full = simulate(&mut model, &RectangularPulse, &pulse, total, dt).unwrap();
        let sparse =
            simulate_sampled(&mut model, &RectangularPulse, &pulse, total, dt, 37).unwrap();

        assert_eq!(full.peaks(), sparse.peaks());
        assert!(sparse.samples().len() < full.samples().len() / 30);
        assert!(sparse.samples().windows(2).all(|w| w[0].time < w[1].time));

        let peak = sparse.joint_peak();
        let at_peak = sparse
            .samples()
            .iter()
            .find(|s| s.time == peak.time)
            .expect("joint peak is sampled");
        assert_eq!(at_peak.temperatures[sparse.joint_node()], peak.temperature);
        assert_eq!(sparse.end_time(), full.end_time());
    }

    #[test]
    fn stored_heat_never_exceeds_delivered_energy() {
        let mut model = copper_lead_model();
        let pulse = pulse(4.0, 0.1);
        let dt = Time::new::<second>(1e-4);
        simulate(&mut model, &RectangularPulse, &pulse, Time::new::<second>(0.3), dt).unwrap();

        // Spot and lead share a radius, so the whole pulse is absorbed.
        let delivered = pulse.energy().get::<joule>();
        assert_relative_eq!(delivered, 0.4, max_relative = 1e-12);

        let ambient = model.ambient().get::<kelvin>();
        let stored: f64 = model
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| model.heat_capacity(i) * (node.temperature.get::<kelvin>() - ambient))
            .sum();
        assert!(stored > 0.0 && stored < delivered, "stored {stored} J");
    }

    #[test]
    fn rejects_unstable_step_before_stepping() {
        let mut model = copper_lead_model();
        let pulse = pulse(4.0, 0.1);
        let bound = max_stable_time_step(&model);

        let result = simulate(
            &mut model,
            &RectangularPulse,
            &pulse,
            Time::new::<second>(0.3),
            bound * 1.01,
        );
        assert!(matches!(result, Err(SimulationError::UnstableStep { .. })));
        // Untouched: still at ambient.
        assert_eq!(model.nodes()[0].temperature, model.ambient());

        assert!(
            simulate(&mut model, &RectangularPulse, &pulse, Time::new::<second>(0.3), bound).is_ok()
        );
    }

    #[test]
    fn rejects_bad_step_and_window() {
        let mut model = copper_lead_model();
        let pulse = pulse(4.0, 0.1);
        let total = Time::new::<second>(0.3);

        for dt in [0.0, -1e-4, f64::NAN] {
            assert!(matches!(
                simulate(&mut model, &RectangularPulse, &pulse, total, Time::new::<second>(dt)),
                Err(SimulationError::InvalidTimeStep { .. })
            ));
        }
        assert!(matches!(
            simulate(
                &mut model,
                &RectangularPulse,
                &pulse,
                Time::new::<second>(0.1),
                Time::new::<second>(1e-4)
            ),
            Err(SimulationError::InsufficientDuration { .. })
        ));
    }

    #[test]
    fn config_runs_pulse_plus_cooldown() {
        let mut model = copper_lead_model();
        let pulse = HeatPulse::new(
            Power::new::<watt>(4.0),
            Time::new::<second>(0.1),
            Length::new::<millimeter>(0.5),
        )
        .unwrap();
        let config = SimulationConfig {
            sample_every: 10,
            ..SimulationConfig::default()
        };

        assert_relative_eq!(config.total_duration(&pulse).get::<second>(), 0.3, epsilon = 1e-12);
        let trace = config.run(&mut model, &RectangularPulse, &pulse).unwrap();
        assert_relative_eq!(trace.end_time().get::<second>(), 0.3, epsilon = 1e-9);
        assert_eq!(trace.joint_peak(), run(4.0, 0.1).joint_peak());
    }
}
