//! # blk2m-rs
//!
//! Rain sedimentation for bulk two-moment cloud microphysics.
//!
//! This crate provides the columnwise sedimentation pass of a two-moment
//! (mass and number) rain scheme:
//! - Upstream (donor-cell) fluxes of rain mass and rain-drop number
//! - Edge-averaged terminal velocity, conserving mass exactly
//! - Domain outflow for surface precipitation accounting
//! - SI quantity newtypes for dimension-checked flux arithmetic
//! - Terminal-velocity evaluators (constant, Simmel et al. 2002)

pub mod error;
pub mod physics;
pub mod sedimentation;
pub mod types;

// Re-export main types for convenience
pub use error::{Result, SedimentationError};
pub use physics::{ConstantTerminalVelocity, SimmelTerminalVelocity, TerminalVelocity};
pub use sedimentation::{ColumnFields, ColumnForcings, MassBudget, Opts, forcings_columnwise};
pub use types::{
    Length, MassDensity, MassDensityRate, MassFluxDensity, NumberDensity, NumberDensityRate,
    NumberFluxDensity, Velocity,
};
