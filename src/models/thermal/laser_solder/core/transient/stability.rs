//! Stability bound of the explicit update.
//!
//! Forward Euler advances node `i` as
//! `T_i' = T_i + Δt/C_i · (Σ G_ij (T_j - T_i) + q_i)`.
//! The coefficient on `T_i` is `1 - Δt·ΣG_ij / C_i`, which must stay
//! non-negative or the update overshoots and oscillates. For an interior
//! node of a uniform layer this is the familiar `Δt ≤ Δx² / 2α`.

use uom::si::{f64::Time, time::second};

use crate::models::thermal::laser_solder::core::stack_up::StackUpModel;

/// Largest time step for which the explicit update stays bounded on `model`.
#[must_use]
pub fn max_stable_time_step(model: &StackUpModel) -> Time {
    let last = model.node_count() - 1;
    let bound = (0..model.node_count())
        .map(|i| {
            let mut conductance = model.neighbors(i).total_conductance();
            if i == last {
                conductance += model.far_conductance();
            }
            model.heat_capacity(i) / conductance
        })
        .fold(f64::INFINITY, f64::min);
    Time::new::<second>(bound)
}
