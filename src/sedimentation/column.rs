//! Upstream (donor-cell) sedimentation of rain mass and number in one column.
//!
//! Rain falls, so the flux through every cell face is carried by the state
//! of the cell above it. With cells indexed from the top (`0`) to the
//! surface (`n-1`) and `w ≤ 0` the face velocity:
//!
//! ```text
//! w_{i+1/2} = -(v_term(i) + v_term(i+1)) / 2      interior faces
//! w_{n-1/2} = -v_term(n-1)                        bottom face
//!
//! F_{i+1/2} = w_{i+1/2} · q_i / Δz                q = rhod_rr or rhod_nr
//! dq_i     -= F_{i-1/2} - F_{i+1/2}               F_{-1/2} = 0
//! ```
//!
//! Each interior face flux is used twice, as outflow of the cell above and
//! inflow of the cell below, so the column total changes only by the bottom
//! outflow `F_{n-1/2}`. That outflow is returned for surface precipitation
//! accounting.

use crate::error::{Result, SedimentationError};
use crate::physics::TerminalVelocity;
use crate::types::{
    Length, MassDensity, MassDensityRate, NumberDensity, NumberDensityRate, Velocity,
};

use super::Opts;

/// Read-only state of one column, top cell first.
///
/// All slices hold one value per cell in SI units and must have the same
/// length.
#[derive(Clone, Copy, Debug)]
pub struct ColumnFields<'a> {
    /// Dry-air density (kg/m³).
    pub rhod: &'a [f64],
    /// Rain mass density, dry-air density times rain mixing ratio (kg/m³).
    pub rhod_rr: &'a [f64],
    /// Rain-drop number density (1/m³).
    pub rhod_nr: &'a [f64],
}

impl<'a> ColumnFields<'a> {
    /// Bundle the column state.
    pub fn new(rhod: &'a [f64], rhod_rr: &'a [f64], rhod_nr: &'a [f64]) -> Self {
        Self {
            rhod,
            rhod_rr,
            rhod_nr,
        }
    }

    /// Number of cells, taken from `rhod`.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.rhod.len()
    }

    /// Rain moments of cell `i`.
    #[inline]
    fn rain(&self, i: usize) -> (MassDensity, NumberDensity) {
        (
            MassDensity::from_kilograms_per_cubic_metre(self.rhod_rr[i]),
            NumberDensity::from_per_cubic_metre(self.rhod_nr[i]),
        )
    }
}

/// Forcing accumulators of one column, top cell first.
///
/// The sweep only subtracts flux divergences from these buffers, so they
/// may already hold contributions from other processes.
#[derive(Debug)]
pub struct ColumnForcings<'a> {
    /// Rain mass forcing (kg m⁻³ s⁻¹).
    pub drhod_rr: &'a mut [f64],
    /// Rain number forcing (m⁻³ s⁻¹).
    pub drhod_nr: &'a mut [f64],
}

impl<'a> ColumnForcings<'a> {
    /// Bundle the accumulators.
    pub fn new(drhod_rr: &'a mut [f64], drhod_nr: &'a mut [f64]) -> Self {
        Self { drhod_rr, drhod_nr }
    }

    /// Subtract the net convergence `inflow - outflow` from cell `i`.
    #[inline]
    fn apply(&mut self, i: usize, inflow: FaceFlux, outflow: FaceFlux) {
        self.drhod_rr[i] -= (inflow.rr - outflow.rr).into_inner();
        self.drhod_nr[i] -= (inflow.nr - outflow.nr).into_inner();
    }
}

/// Mass and number flux through one face, already divided by `dz`.
#[derive(Clone, Copy, Debug)]
struct FaceFlux {
    rr: MassDensityRate,
    nr: NumberDensityRate,
}

impl FaceFlux {
    /// No rain enters through the model top.
    const ZERO: Self = Self {
        rr: MassDensityRate::ZERO,
        nr: NumberDensityRate::ZERO,
    };

    /// Donor-cell flux carried by `w` out of a cell holding `(rr, nr)`.
    #[inline]
    fn donor_cell(w: Velocity, rr: MassDensity, nr: NumberDensity, dz: Length) -> Self {
        Self {
            rr: w * rr / dz,
            nr: w * nr / dz,
        }
    }
}

/// Face velocity between two cells: mean of their fall speeds, pointing down.
#[inline]
fn edge_velocity(v_above: Velocity, v_below: Velocity) -> Velocity {
    -(0.5 * (v_above + v_below))
}

/// Check the column shape before anything is mutated. Returns the cell count.
fn validate(
    fields: &ColumnFields<'_>,
    forcings: &ColumnForcings<'_>,
    dz: Length,
) -> Result<usize> {
    let n = fields.n_cells();
    if n == 0 {
        return Err(SedimentationError::EmptyColumn);
    }

    let lengths = [
        ("rhod_rr", fields.rhod_rr.len()),
        ("rhod_nr", fields.rhod_nr.len()),
        ("drhod_rr", forcings.drhod_rr.len()),
        ("drhod_nr", forcings.drhod_nr.len()),
    ];
    for (field, len) in lengths {
        if len != n {
            return Err(SedimentationError::length_mismatch(field, n, len));
        }
    }

    let dz = dz.metres();
    if !(dz.is_finite() && dz > 0.0) {
        return Err(SedimentationError::InvalidCellHeight(dz));
    }

    Ok(n)
}

/// Add the sedimentation forcings of one column and return the rain mass
/// flux leaving through its bottom face.
///
/// Cells are ordered from the model top (index 0) to the surface. The
/// accumulators in `forcings` are decremented by the flux divergence of
/// every cell; existing contents are kept. `dz` is the uniform cell height.
///
/// The return value is the bottom-face mass flux divided by `dz`
/// (kg m⁻³ s⁻¹), non-positive for physical input since it points down.
/// Multiply by `dz` for the surface precipitation flux. The matching number
/// outflow is not reported.
///
/// When `opts.sedi` is false nothing is read or written and zero is
/// returned.
///
/// # Errors
///
/// The column is checked before the sweep starts, so on error no
/// accumulator has been touched:
///
/// - [`SedimentationError::EmptyColumn`] if the column has no cells
/// - [`SedimentationError::LengthMismatch`] if any slice differs in length
///   from `fields.rhod`
/// - [`SedimentationError::InvalidCellHeight`] if `dz` is not finite and
///   positive
///
/// # Example
///
/// ```
/// use blk2m_rs::physics::ConstantTerminalVelocity;
/// use blk2m_rs::sedimentation::{forcings_columnwise, ColumnFields, ColumnForcings, Opts};
/// use blk2m_rs::types::Length;
///
/// let rhod = [1.0, 1.1];
/// let rhod_rr = [1e-3, 0.0];
/// let rhod_nr = [1e3, 0.0];
/// let mut drhod_rr = [0.0; 2];
/// let mut drhod_nr = [0.0; 2];
///
/// let outflow = forcings_columnwise(
///     &Opts::default(),
///     &ConstantTerminalVelocity::new(4.0),
///     &ColumnFields::new(&rhod, &rhod_rr, &rhod_nr),
///     &mut ColumnForcings::new(&mut drhod_rr, &mut drhod_nr),
///     Length::from_metres(100.0),
/// )
/// .unwrap();
///
/// // rain leaves the top cell and arrives in the empty one below
/// assert!(drhod_rr[0] < 0.0);
/// assert!(drhod_rr[1] > 0.0);
/// // the empty bottom cell has nothing to drop through the surface yet
/// assert_eq!(outflow.into_inner(), 0.0);
/// ```
pub fn forcings_columnwise<V>(
    opts: &Opts,
    v_term: &V,
    fields: &ColumnFields<'_>,
    forcings: &mut ColumnForcings<'_>,
    dz: Length,
) -> Result<MassDensityRate>
where
    V: TerminalVelocity + ?Sized,
{
    if !opts.sedi {
        log::debug!("sedimentation disabled, column left untouched");
        return Ok(MassDensityRate::ZERO);
    }

    let n = validate(fields, forcings, dz)?;

    let mut inflow = FaceFlux::ZERO;

    // fall speed of the cell above the current face, evaluated once per cell
    let (rr, nr) = fields.rain(0);
    let mut v_above = v_term.v_term(rr, nr);

    for i in 0..n - 1 {
        let (rr_below, nr_below) = fields.rain(i + 1);
        let v_below = v_term.v_term(rr_below, nr_below);

        let (rr, nr) = fields.rain(i);
        let outflow = FaceFlux::donor_cell(edge_velocity(v_above, v_below), rr, nr, dz);

        forcings.apply(i, inflow, outflow);
        inflow = outflow;
        v_above = v_below;
    }

    // bottom face: no neighbour below, use the cell's own fall speed
    let (rr, nr) = fields.rain(n - 1);
    let outflow = FaceFlux::donor_cell(-v_above, rr, nr, dz);
    forcings.apply(n - 1, inflow, outflow);

    log::trace!(
        "sedimentation over {} cells ({}): bottom outflow {}",
        n,
        v_term.name(),
        outflow.rr
    );

    Ok(outflow.rr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ConstantTerminalVelocity;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TOL: f64 = 1e-14;

    fn dz(metres: f64) -> Length {
        Length::from_metres(metres)
    }

    #[test]
    fn test_edge_velocity_points_down() {
        let w = edge_velocity(
            Velocity::from_metres_per_second(2.0),
            Velocity::from_metres_per_second(4.0),
        );
        assert!((w.metres_per_second() - (-3.0)).abs() < TOL);
    }

    #[test]
    fn test_edge_velocity_uniform_field() {
        let v = Velocity::from_metres_per_second(5.5);
        assert_eq!(edge_velocity(v, v), -v);
    }

    #[test]
    fn test_v_term_called_once_per_cell() {
        let calls = AtomicUsize::new(0);
        let v_term = |_: MassDensity, _: NumberDensity| {
            calls.fetch_add(1, Ordering::Relaxed);
            Velocity::from_metres_per_second(1.0)
        };

        let rhod = [1.0; 7];
        let q = [1.0; 7];
        let mut d_rr = [0.0; 7];
        let mut d_nr = [0.0; 7];

        forcings_columnwise(
            &Opts::default(),
            &v_term,
            &ColumnFields::new(&rhod, &q, &q),
            &mut ColumnForcings::new(&mut d_rr, &mut d_nr),
            dz(1.0),
        )
        .unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn test_disabled_skips_validation() {
        // even a malformed column is left alone when sedimentation is off
        let rhod = [1.0, 1.0];
        let q = [1.0];
        let mut d_rr = [7.0; 3];
        let mut d_nr = [8.0; 3];

        let flux = forcings_columnwise(
            &Opts::disabled(),
            &ConstantTerminalVelocity::new(1.0),
            &ColumnFields::new(&rhod, &q, &q),
            &mut ColumnForcings::new(&mut d_rr, &mut d_nr),
            dz(-1.0),
        )
        .unwrap();

        assert_eq!(flux, MassDensityRate::ZERO);
        assert_eq!(d_rr, [7.0; 3]);
        assert_eq!(d_nr, [8.0; 3]);
    }

    #[test]
    fn test_empty_column() {
        let empty: [f64; 0] = [];
        let mut d_rr: [f64; 0] = [];
        let mut d_nr: [f64; 0] = [];

        let err = forcings_columnwise(
            &Opts::default(),
            &ConstantTerminalVelocity::new(1.0),
            &ColumnFields::new(&empty, &empty, &empty),
            &mut ColumnForcings::new(&mut d_rr, &mut d_nr),
            dz(1.0),
        )
        .unwrap_err();

        assert_eq!(err, SedimentationError::EmptyColumn);
    }

    #[test]
    fn test_length_mismatch_leaves_forcings_untouched() {
        let rhod = [1.0; 4];
        let rr = [1.0; 4];
        let nr = [1.0; 4];
        let mut d_rr = [0.5; 4];
        let mut d_nr = [0.25; 3];

        let err = forcings_columnwise(
            &Opts::default(),
            &ConstantTerminalVelocity::new(1.0),
            &ColumnFields::new(&rhod, &rr, &nr),
            &mut ColumnForcings::new(&mut d_rr, &mut d_nr),
            dz(1.0),
        )
        .unwrap_err();

        assert_eq!(err, SedimentationError::length_mismatch("drhod_nr", 4, 3));
        assert_eq!(d_rr, [0.5; 4]);
        assert_eq!(d_nr, [0.25; 3]);
    }

    #[test]
    fn test_field_length_mismatch() {
        let rhod = [1.0; 3];
        let rr = [1.0; 2];
        let nr = [1.0; 3];
        let mut d_rr = [0.0; 3];
        let mut d_nr = [0.0; 3];

        let err = forcings_columnwise(
            &Opts::default(),
            &ConstantTerminalVelocity::new(1.0),
            &ColumnFields::new(&rhod, &rr, &nr),
            &mut ColumnForcings::new(&mut d_rr, &mut d_nr),
            dz(1.0),
        )
        .unwrap_err();

        assert_eq!(err, SedimentationError::length_mismatch("rhod_rr", 3, 2));
    }

    #[test]
    fn test_invalid_cell_height() {
        let q = [1.0; 2];
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let mut d_rr = [0.0; 2];
            let mut d_nr = [0.0; 2];

            let err = forcings_columnwise(
                &Opts::default(),
                &ConstantTerminalVelocity::new(1.0),
                &ColumnFields::new(&q, &q, &q),
                &mut ColumnForcings::new(&mut d_rr, &mut d_nr),
                dz(bad),
            )
            .unwrap_err();

            assert!(matches!(err, SedimentationError::InvalidCellHeight(_)));
            assert_eq!(d_rr, [0.0; 2]);
            assert_eq!(d_nr, [0.0; 2]);
        }
    }

    #[test]
    fn test_nan_fall_speed_propagates() {
        let v_term = |_: MassDensity, _: NumberDensity| Velocity::from_metres_per_second(f64::NAN);
        let q = [1.0; 2];
        let mut d_rr = [0.0; 2];
        let mut d_nr = [0.0; 2];

        let flux = forcings_columnwise(
            &Opts::default(),
            &v_term,
            &ColumnFields::new(&q, &q, &q),
            &mut ColumnForcings::new(&mut d_rr, &mut d_nr),
            dz(1.0),
        )
        .unwrap();

        assert!(flux.into_inner().is_nan());
        assert!(d_rr.iter().all(|x| x.is_nan()));
        assert!(d_nr.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_trait_object_evaluator() {
        let v_term: &dyn TerminalVelocity = &ConstantTerminalVelocity::new(2.0);
        let q = [1.0];
        let mut d_rr = [0.0];
        let mut d_nr = [0.0];

        let flux = forcings_columnwise(
            &Opts::default(),
            v_term,
            &ColumnFields::new(&q, &q, &q),
            &mut ColumnForcings::new(&mut d_rr, &mut d_nr),
            dz(0.5),
        )
        .unwrap();

        // w = -2 m/s, rr = 1 kg/m³, dz = 0.5 m
        assert!((flux.into_inner() - (-4.0)).abs() < TOL);
        assert!((d_rr[0] - (-4.0)).abs() < TOL);
    }
}
