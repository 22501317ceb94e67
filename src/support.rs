//! Supporting utilities used by models.
//!
//! - [`constraint`]: type-level numeric invariants checked at construction
//! - [`materials`]: material properties and catalogs
//! - [`units`]: extensions to [`uom`]

pub mod constraint;
pub mod materials;
pub mod units;
