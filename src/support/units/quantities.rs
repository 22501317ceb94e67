use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N3, P1, Z0},
};

/// Heat flux (areal power density), W/m² in SI.
pub type HeatFlux = Quantity<ISQ<Z0, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
