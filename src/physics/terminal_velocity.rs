//! Terminal fall speed of a rain-drop population.
//!
//! The sedimentation integrator treats terminal velocity as a black box
//! `v_term(rhod_rr, rhod_nr) → |v|`. This module provides the trait for that
//! black box together with two evaluators:
//!
//! - [`ConstantTerminalVelocity`]: one fixed speed for every non-empty cell
//! - [`SimmelTerminalVelocity`]: mass-weighted mean fall speed from the
//!   Gunn & Kinzer (1949) / Beard (1976) data as fitted by Simmel et al. (2002)
//!
//! Any closure `Fn(MassDensity, NumberDensity) -> Velocity` is also an
//! evaluator.
//!
//! # Example
//!
//! ```
//! use blk2m_rs::physics::{SimmelTerminalVelocity, TerminalVelocity};
//! use blk2m_rs::types::{MassDensity, NumberDensity, Velocity};
//!
//! let rr = MassDensity::from_kilograms_per_cubic_metre(1e-3);
//! let nr = NumberDensity::from_per_cubic_metre(1e3);
//!
//! let v = SimmelTerminalVelocity.v_term(rr, nr);
//! assert!(v.metres_per_second() > 0.0);
//!
//! let fixed = |_: MassDensity, _: NumberDensity| Velocity::from_metres_per_second(5.0);
//! assert_eq!(fixed.v_term(rr, nr).metres_per_second(), 5.0);
//! ```

use crate::types::{MassDensity, NumberDensity, RHO_WATER, Velocity};

/// Evaluator of the terminal fall speed of a rain-drop population.
///
/// # Implementation Notes
///
/// - The returned value is a non-negative magnitude; orientation is applied
///   by the caller.
/// - Evaluators own the handling of empty or non-physical input. The
///   integrator propagates whatever is returned, NaN included.
/// - `v_term` is called once per cell per sweep and should not allocate.
pub trait TerminalVelocity: Send + Sync {
    /// Mass-weighted mean fall speed for a cell holding rain mass density
    /// `rhod_rr` and rain-drop number density `rhod_nr`.
    fn v_term(&self, rhod_rr: MassDensity, rhod_nr: NumberDensity) -> Velocity;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> TerminalVelocity for F
where
    F: Fn(MassDensity, NumberDensity) -> Velocity + Send + Sync,
{
    #[inline]
    fn v_term(&self, rhod_rr: MassDensity, rhod_nr: NumberDensity) -> Velocity {
        self(rhod_rr, rhod_nr)
    }
}

// =============================================================================
// Constant fall speed
// =============================================================================

/// The same fall speed for every cell that holds rain.
///
/// Cells where either moment is zero (or negative) fall at zero speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantTerminalVelocity {
    speed: Velocity,
}

impl ConstantTerminalVelocity {
    /// Create an evaluator falling at `metres_per_second`.
    pub fn new(metres_per_second: f64) -> Self {
        debug_assert!(
            metres_per_second >= 0.0,
            "Fall speed must be a non-negative magnitude, got {}",
            metres_per_second
        );
        Self {
            speed: Velocity::from_metres_per_second(metres_per_second),
        }
    }

    /// The configured fall speed.
    #[inline]
    pub fn speed(&self) -> Velocity {
        self.speed
    }
}

impl TerminalVelocity for ConstantTerminalVelocity {
    #[inline]
    fn v_term(&self, rhod_rr: MassDensity, rhod_nr: NumberDensity) -> Velocity {
        if rhod_rr.mean_mass(rhod_nr).is_some() {
            self.speed
        } else {
            Velocity::ZERO
        }
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

// =============================================================================
// Simmel et al. (2002)
// =============================================================================

/// Diameter breakpoints (m) of the piecewise fit, Simmel et al. (2002), Table 2.
const SIMMEL_D1: f64 = 134.43e-6;
const SIMMEL_D2: f64 = 1511.64e-6;
const SIMMEL_D3: f64 = 3477.84e-6;

/// `(α, β)` of `v = α · m^β` with m in g and v in cm/s, one pair per size range.
const SIMMEL_COEFFS: [(f64, f64); 4] = [
    (4.5795e5, 2.0 / 3.0),
    (4.962e3, 1.0 / 3.0),
    (1.732e3, 1.0 / 6.0),
    (9.17e2, 0.0),
];

/// Mass-weighted mean fall speed of rain drops after Simmel et al. (2002).
///
/// The mean drop mass `m = rhod_rr / rhod_nr` selects one of four power laws
/// `v = α · m^β` (m in grams, v in cm/s) by the diameter of a water sphere of
/// that mass:
///
/// | D (µm)              | α         | β   |
/// |---------------------|-----------|-----|
/// | D < 134.43          | 4.5795e5  | 2/3 |
/// | 134.43 ≤ D < 1511.64| 4.962e3   | 1/3 |
/// | 1511.64 ≤ D < 3477.84| 1.732e3  | 1/6 |
/// | D ≥ 3477.84         | 9.17e2    | 0   |
///
/// The pieces are continuous at the breakpoints. Empty cells (either moment
/// not strictly positive) fall at zero speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimmelTerminalVelocity;

impl SimmelTerminalVelocity {
    /// Diameter (m) of a water sphere of mass `mass_kg`.
    #[inline]
    pub fn drop_diameter(mass_kg: f64) -> f64 {
        (6.0 * mass_kg / (std::f64::consts::PI * RHO_WATER)).cbrt()
    }

    /// Fall speed of a drop of mass `mass_kg`.
    pub fn fall_speed(mass_kg: f64) -> Velocity {
        let d = Self::drop_diameter(mass_kg);
        let (alpha, beta) = if d < SIMMEL_D1 {
            SIMMEL_COEFFS[0]
        } else if d < SIMMEL_D2 {
            SIMMEL_COEFFS[1]
        } else if d < SIMMEL_D3 {
            SIMMEL_COEFFS[2]
        } else {
            SIMMEL_COEFFS[3]
        };

        let mass_g = mass_kg * 1e3;
        let v_cm_per_s = alpha * mass_g.powf(beta);
        Velocity::from_metres_per_second(v_cm_per_s * 1e-2)
    }
}

impl TerminalVelocity for SimmelTerminalVelocity {
    #[inline]
    fn v_term(&self, rhod_rr: MassDensity, rhod_nr: NumberDensity) -> Velocity {
        match rhod_rr.mean_mass(rhod_nr) {
            Some(mass) => Self::fall_speed(mass),
            None => Velocity::ZERO,
        }
    }

    fn name(&self) -> &'static str {
        "simmel2002"
    }
}
