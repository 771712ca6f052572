//! Rain-drop physics consumed by the sedimentation integrator.
//!
//! # Key Traits
//!
//! - [`TerminalVelocity`]: fall speed of a drop population from its mass and
//!   number densities
//!
//! # Evaluators
//!
//! - [`ConstantTerminalVelocity`]: fixed speed, for idealised columns and tests
//! - [`SimmelTerminalVelocity`]: Simmel et al. (2002) piecewise power law

pub mod terminal_velocity;

pub use terminal_velocity::{ConstantTerminalVelocity, SimmelTerminalVelocity, TerminalVelocity};
