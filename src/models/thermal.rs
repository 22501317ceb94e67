//! Thermal process models.
//!
//! This module contains conduction models for thermal manufacturing
//! processes, currently laser soldering.

pub mod laser_solder;
