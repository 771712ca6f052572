//! Physical quantity newtypes in SI base units.
//!
//! Every quantity is stored as a bare `f64` in kilograms, metres and seconds.
//! Only the products and quotients that make dimensional sense are
//! implemented, so a flux can not be added to a density by accident:
//!
//! ```text
//! Velocity        × MassDensity    → MassFluxDensity    (kg m⁻² s⁻¹)
//! MassFluxDensity ÷ Length         → MassDensityRate    (kg m⁻³ s⁻¹)
//! MassDensityRate × Length         → MassFluxDensity
//! Velocity        × NumberDensity  → NumberFluxDensity  (m⁻² s⁻¹)
//! NumberFluxDensity ÷ Length       → NumberDensityRate  (m⁻³ s⁻¹)
//! MassDensity     ÷ NumberDensity  → mean drop mass     (kg, plain f64)
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Seconds per hour.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Density of liquid water (kg/m³), used to express mass fluxes as depths.
pub const RHO_WATER: f64 = 1000.0;

/// Generates a quantity newtype with the arithmetic shared by all quantities:
/// addition, subtraction and negation within the same dimension, and scaling
/// by a dimensionless `f64`.
macro_rules! define_quantity {
    (
        $(#[$meta:meta])*
        $name:ident, $ctor:ident, $getter:ident, $unit:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
        #[repr(transparent)]
        pub struct $name(f64);

        impl $name {
            /// Zero of this quantity.
            pub const ZERO: Self = Self(0.0);

            /// Create the quantity from a value in SI base units.
            #[inline]
            pub const fn $ctor(value: f64) -> Self {
                Self(value)
            }

            /// Value in SI base units.
            #[inline]
            pub const fn $getter(self) -> f64 {
                self.0
            }

            /// Convert to raw f64.
            #[inline]
            pub const fn into_inner(self) -> f64 {
                self.0
            }

            /// Absolute value.
            #[inline]
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            /// Whether the value is neither NaN nor infinite.
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.6e} {}", self.0, $unit)
            }
        }

        impl From<$name> for f64 {
            #[inline]
            fn from(q: $name) -> f64 {
                q.0
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$name> for f64 {
            type Output = $name;
            #[inline]
            fn mul(self, rhs: $name) -> $name {
                $name(self * rhs.0)
            }
        }
    };
}

/// Implements `$lhs × $rhs → $out` in both operand orders.
macro_rules! impl_product {
    ($lhs:ident, $rhs:ident, $out:ident) => {
        impl Mul<$rhs> for $lhs {
            type Output = $out;
            #[inline]
            fn mul(self, rhs: $rhs) -> $out {
                $out(self.0 * rhs.0)
            }
        }

        impl Mul<$lhs> for $rhs {
            type Output = $out;
            #[inline]
            fn mul(self, rhs: $lhs) -> $out {
                $out(self.0 * rhs.0)
            }
        }
    };
}

/// Implements `$lhs ÷ $rhs → $out`.
macro_rules! impl_quotient {
    ($lhs:ident, $rhs:ident, $out:ident) => {
        impl Div<$rhs> for $lhs {
            type Output = $out;
            #[inline]
            fn div(self, rhs: $rhs) -> $out {
                $out(self.0 / rhs.0)
            }
        }
    };
}

define_quantity!(
    /// Length (m), e.g. the uniform cell height `dz`.
    ///
    /// ```
    /// use blk2m_rs::types::Length;
    ///
    /// let dz = Length::from_metres(20.0);
    /// assert_eq!(dz.metres(), 20.0);
    /// ```
    Length, from_metres, metres, "m"
);

define_quantity!(
    /// Vertical velocity (m/s), positive upward.
    ///
    /// Terminal fall speeds are reported as non-negative magnitudes; the
    /// flux-carrying velocity at a cell edge is their negation.
    Velocity, from_metres_per_second, metres_per_second, "m/s"
);

define_quantity!(
    /// Mass density (kg/m³), e.g. dry-air density or rain mass density.
    MassDensity, from_kilograms_per_cubic_metre, kilograms_per_cubic_metre, "kg/m³"
);

define_quantity!(
    /// Number density (1/m³), e.g. rain-drop concentration.
    NumberDensity, from_per_cubic_metre, per_cubic_metre, "1/m³"
);

define_quantity!(
    /// Vertical mass flux through a horizontal surface (kg m⁻² s⁻¹).
    ///
    /// Negative values point downward, so surface precipitation is negative.
    ///
    /// ```
    /// use blk2m_rs::types::MassFluxDensity;
    ///
    /// // 1 kg of water per m² per hour is 1 mm of rain per hour
    /// let precip = MassFluxDensity::from_kilograms_per_square_metre_second(-1.0 / 3600.0);
    /// assert!((precip.mm_per_hour() - (-1.0)).abs() < 1e-12);
    /// ```
    MassFluxDensity,
    from_kilograms_per_square_metre_second,
    kilograms_per_square_metre_second,
    "kg/(m² s)"
);

define_quantity!(
    /// Vertical number flux through a horizontal surface (m⁻² s⁻¹).
    NumberFluxDensity, from_per_square_metre_second, per_square_metre_second, "1/(m² s)"
);

define_quantity!(
    /// Rate of change of a mass density (kg m⁻³ s⁻¹).
    ///
    /// This is the dimension of the mass forcings and of the domain outflow
    /// returned by [`crate::sedimentation::forcings_columnwise`].
    MassDensityRate,
    from_kilograms_per_cubic_metre_second,
    kilograms_per_cubic_metre_second,
    "kg/(m³ s)"
);

define_quantity!(
    /// Rate of change of a number density (m⁻³ s⁻¹).
    NumberDensityRate, from_per_cubic_metre_second, per_cubic_metre_second, "1/(m³ s)"
);

impl_product!(Velocity, MassDensity, MassFluxDensity);
impl_product!(Velocity, NumberDensity, NumberFluxDensity);
impl_product!(MassDensityRate, Length, MassFluxDensity);
impl_product!(NumberDensityRate, Length, NumberFluxDensity);

impl_quotient!(MassFluxDensity, Length, MassDensityRate);
impl_quotient!(NumberFluxDensity, Length, NumberDensityRate);

impl MassFluxDensity {
    /// Equivalent liquid-water depth rate in mm/h (sign preserved).
    #[inline]
    pub fn mm_per_hour(self) -> f64 {
        // kg/m² of water is mm of depth for ρ_w = 1000 kg/m³
        self.0 / RHO_WATER * 1e3 * SECONDS_PER_HOUR
    }
}

impl MassDensity {
    /// Mean particle mass (kg) for a population with this mass density and
    /// the given number density.
    ///
    /// Returns `None` when either moment is not strictly positive.
    #[inline]
    pub fn mean_mass(self, number: NumberDensity) -> Option<f64> {
        if self.0 > 0.0 && number.0 > 0.0 {
            Some(self.0 / number.0)
        } else {
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
