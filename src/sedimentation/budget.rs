//! Column mass budget of a sedimentation pass.
//!
//! Interior face fluxes cancel in pairs, so the mass forcing added to a
//! column sums to the outflow returned by
//! [`forcings_columnwise`](super::forcings_columnwise). [`MassBudget`]
//! measures how far a pass is from that identity.

use crate::error::{Result, SedimentationError};
use crate::types::MassDensityRate;

/// Mass forcing added to a column compared with its bottom outflow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassBudget {
    /// Sum over cells of the mass forcing change.
    forcing_change: MassDensityRate,
    /// Sum over cells of the absolute mass forcing change.
    gross_change: MassDensityRate,
    /// Outflow returned by the sweep.
    surface_flux: MassDensityRate,
}

impl MassBudget {
    /// Budget from the mass accumulators before and after a pass.
    ///
    /// # Errors
    ///
    /// [`SedimentationError::LengthMismatch`] if the two snapshots differ in
    /// length.
    pub fn from_forcings(
        before: &[f64],
        after: &[f64],
        surface_flux: MassDensityRate,
    ) -> Result<Self> {
        if before.len() != after.len() {
            return Err(SedimentationError::length_mismatch(
                "drhod_rr",
                before.len(),
                after.len(),
            ));
        }

        let (net, gross) = before
            .iter()
            .zip(after)
            .map(|(b, a)| a - b)
            .fold((0.0, 0.0), |(net, gross), d| (net + d, gross + d.abs()));

        Ok(Self {
            forcing_change: MassDensityRate::from_kilograms_per_cubic_metre_second(net),
            gross_change: MassDensityRate::from_kilograms_per_cubic_metre_second(gross),
            surface_flux,
        })
    }

    /// Net mass forcing added to the column.
    #[inline]
    pub fn forcing_change(&self) -> MassDensityRate {
        self.forcing_change
    }

    /// Outflow through the bottom face.
    #[inline]
    pub fn surface_flux(&self) -> MassDensityRate {
        self.surface_flux
    }

    /// Forcing change not explained by the outflow. Zero up to round-off.
    #[inline]
    pub fn residual(&self) -> MassDensityRate {
        self.forcing_change - self.surface_flux
    }

    /// Whether the residual is within `rel_tol` of the gross forcing change.
    ///
    /// Logs a warning when it is not.
    pub fn is_closed(&self, rel_tol: f64) -> bool {
        let residual = self.residual().abs().into_inner();
        let scale = self.gross_change.into_inner();
        let closed = residual <= rel_tol * scale;
        if !closed {
            log::warn!(
                "column mass budget open: residual {} against gross change {}",
                self.residual(),
                self.gross_change
            );
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(x: f64) -> MassDensityRate {
        MassDensityRate::from_kilograms_per_cubic_metre_second(x)
    }

    #[test]
    fn test_closed_budget() {
        let before = [1.0, 2.0, 3.0];
        let after = [-1.0, 3.5, 4.0];
        // net change = -2 + 1.5 + 1 = 0.5
        let budget = MassBudget::from_forcings(&before, &after, rate(0.5)).unwrap();

        assert_eq!(budget.forcing_change(), rate(0.5));
        assert_eq!(budget.residual(), rate(0.0));
        assert!(budget.is_closed(1e-12));
    }

    #[test]
    fn test_open_budget() {
        let before = [0.0, 0.0];
        let after = [-1.0, 0.5];
        let budget = MassBudget::from_forcings(&before, &after, rate(0.0)).unwrap();

        assert_eq!(budget.residual(), rate(-0.5));
        assert!(!budget.is_closed(1e-6));
    }

    #[test]
    fn test_untouched_column_is_closed() {
        let before = [0.1, 0.2];
        let budget = MassBudget::from_forcings(&before, &before, MassDensityRate::ZERO).unwrap();
        assert!(budget.is_closed(0.0));
    }

    #[test]
    fn test_snapshot_length_mismatch() {
        let err = MassBudget::from_forcings(&[0.0; 3], &[0.0; 2], MassDensityRate::ZERO)
            .unwrap_err();
        assert_eq!(err, SedimentationError::length_mismatch("drhod_rr", 3, 2));
    }
}
