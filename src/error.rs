//! Error types for column sedimentation.

use thiserror::Error;

/// Caller contract violations detected before a column sweep starts.
///
/// None of these are recoverable inside the kernel: they mean the column
/// handed over is malformed. They are reported before any accumulator is
/// touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SedimentationError {
    /// The column has no cells.
    #[error("Empty column: sedimentation needs at least one cell")]
    EmptyColumn,

    /// A column field does not have the same number of cells as `rhod`.
    #[error("Column length mismatch: `{field}` has {actual} cells, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Cell height is zero, negative or not finite.
    #[error("Invalid cell height: dz must be finite and positive, got {0} m")]
    InvalidCellHeight(f64),
}

impl SedimentationError {
    /// Create a length mismatch error.
    pub fn length_mismatch(field: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            field,
            expected,
            actual,
        }
    }
}

/// Result alias for sedimentation operations.
pub type Result<T> = std::result::Result<T, SedimentationError>;
