//! patches::errors — error type for patch extraction and aggregation.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by every routine in the
//! `patches` subtree, together with a conversion to Python exceptions for
//! the PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`PatchError`] and [`PatchResult`] as the canonical error and
//!   result types for [`PatchOptions`](crate::patches::options::PatchOptions),
//!   patch extraction, mean aggregation, and ray flattening.
//! - Split variants into *configuration* failures (bad patch size, overlap,
//!   mode name, or reduction axes) and *shape* failures (grid too small or
//!   of the wrong rank), queryable via [`PatchError::is_configuration`] and
//!   [`PatchError::is_shape`].
//! - Implement `From<PatchError> for PyErr` behind the `python-bindings`
//!   feature.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the violated constraint
//!   (e.g. "overlap must be < patch_size") and embed the offending values.
//! - Axis indices are 0-based, matching `ndarray` and NumPy.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::patches::options::PatchMode;

pub type PatchResult<T> = Result<T, PatchError>;

/// PatchError — failures raised while building or reducing patched grids.
///
/// Variants
/// --------
/// - `InvalidPatchSize { patch_size }`
///   `patch_size == 0` (or negative at the Python boundary).
/// - `InvalidOverlap { overlap, patch_size }`
///   `overlap >= patch_size`, which would give a zero column stride.
/// - `InvalidMode { name }`
///   A mode string that is neither `"2d"` nor `"3d"`.
/// - `InvalidAxis { axis, ndim, reason }`
///   A reduction axis that is out of range or repeated, or an empty axis
///   list.
/// - `GridTooSmall { patch_size, rows, cols }`
///   The grid cannot admit a single full patch.
/// - `RankMismatch { expected, actual, mode }`
///   The grid rank disagrees with the requested [`PatchMode`] (or with the
///   rank an operation requires, in which case `mode` is `None`).
#[derive(Debug, Clone, PartialEq)]
pub enum PatchError {
    // ---- Configuration ----
    InvalidPatchSize { patch_size: i64 },
    InvalidOverlap { overlap: i64, patch_size: usize },
    InvalidMode { name: String },
    InvalidAxis { axis: usize, ndim: usize, reason: &'static str },

    // ---- Shape ----
    GridTooSmall { patch_size: usize, rows: usize, cols: usize },
    RankMismatch { expected: usize, actual: usize, mode: Option<PatchMode> },
}

impl PatchError {
    /// `true` for invalid parameters (patch size, overlap, mode, axes).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PatchError::InvalidPatchSize { .. }
                | PatchError::InvalidOverlap { .. }
                | PatchError::InvalidMode { .. }
                | PatchError::InvalidAxis { .. }
        )
    }

    /// `true` for inputs whose dimensions cannot be patched as requested.
    pub fn is_shape(&self) -> bool {
        !self.is_configuration()
    }
}

impl std::error::Error for PatchError {}

impl std::fmt::Display for PatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            PatchError::InvalidPatchSize { patch_size } => {
                write!(f, "Invalid patch_size {patch_size}: must be > 0.")
            }
            PatchError::InvalidOverlap { overlap, patch_size } => write!(
                f,
                "Invalid overlap {overlap}: must satisfy 0 <= overlap < patch_size ({patch_size})."
            ),
            PatchError::InvalidMode { name } => {
                write!(f, "Invalid patch mode {name:?}: expected '2d' or '3d'.")
            }
            PatchError::InvalidAxis { axis, ndim, reason } => {
                write!(f, "Invalid reduction axis {axis} for array of rank {ndim}: {reason}")
            }

            // ---- Shape ----
            PatchError::GridTooSmall { patch_size, rows, cols } => write!(
                f,
                "Grid of shape ({rows}, {cols}) is too small for patch_size {patch_size}."
            ),
            PatchError::RankMismatch { expected, actual, mode: Some(mode) } => write!(
                f,
                "Patch mode {mode} expects a rank-{expected} grid; got rank {actual}."
            ),
            PatchError::RankMismatch { expected, actual, mode: None } => {
                write!(f, "Expected a rank-{expected} array; got rank {actual}.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<PatchError> for PyErr {
    fn from(err: PatchError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that configuration and shape variants are classified into
    // disjoint groups.
    //
    // Given
    // -----
    // - One configuration variant (`InvalidOverlap`) and one shape variant
    //   (`GridTooSmall`).
    //
    // Expect
    // ------
    // - `is_configuration` holds only for the first, `is_shape` only for the
    //   second.
    fn patch_error_classifies_configuration_and_shape_variants() {
        // Arrange
        let config = PatchError::InvalidOverlap { overlap: 3, patch_size: 3 };
        let shape = PatchError::GridTooSmall { patch_size: 4, rows: 2, cols: 8 };

        // Act / Assert
        assert!(config.is_configuration());
        assert!(!config.is_shape());
        assert!(shape.is_shape());
        assert!(!shape.is_configuration());
    }

    #[test]
    // Purpose
    // -------
    // Ensure `GridTooSmall` embeds the grid extents and patch size.
    //
    // Given
    // -----
    // - `GridTooSmall { patch_size: 5, rows: 4, cols: 9 }`.
    //
    // Expect
    // ------
    // - The message contains "(4, 9)" and "5".
    fn patch_error_grid_too_small_includes_payload_in_display() {
        // Arrange
        let err = PatchError::GridTooSmall { patch_size: 5, rows: 4, cols: 9 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("(4, 9)"), "Message should include grid extents.\nGot: {msg}");
        assert!(msg.contains('5'), "Message should include patch size.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure `RankMismatch` names the mode when one was requested.
    //
    // Given
    // -----
    // - A mismatch raised for `PatchMode::ThreeD` on a rank-2 grid.
    //
    // Expect
    // ------
    // - The message mentions "3d" and both ranks.
    fn patch_error_rank_mismatch_mentions_mode() {
        // Arrange
        let err = PatchError::RankMismatch { expected: 3, actual: 2, mode: Some(PatchMode::ThreeD) };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("3d"), "Message should name the mode.\nGot: {msg}");
        assert!(msg.contains("rank-3") && msg.contains("rank 2"), "Got: {msg}");
    }
}
