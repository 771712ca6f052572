//! Strongly-typed physical quantities.
//!
//! Quantity newtypes keep the dimensional bookkeeping of the sedimentation
//! flux in the type system: a flux divergence can only be formed as
//! velocity × density ÷ length, and the result can only be accumulated into
//! a forcing of the same dimension.
//!
//! # Units
//!
//! All quantities are stored in SI base units (kg, m, s). Column buffers
//! handed to the integrator are plain `f64` slices in the same units.
//!
//! # Example
//!
//! ```
//! use blk2m_rs::types::{Length, MassDensity, MassDensityRate, Velocity};
//!
//! let w = Velocity::from_metres_per_second(-4.0);   // falling at 4 m/s
//! let rr = MassDensity::from_kilograms_per_cubic_metre(1e-3);
//! let dz = Length::from_metres(100.0);
//!
//! let rate: MassDensityRate = w * rr / dz;
//! assert!((rate.kilograms_per_cubic_metre_second() + 4e-5).abs() < 1e-15);
//! ```

mod physical;

pub use physical::{
    Length, MassDensity, MassDensityRate, MassFluxDensity, NumberDensity, NumberDensityRate,
    NumberFluxDensity, RHO_WATER, Velocity,
};
