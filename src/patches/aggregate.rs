//! patches::aggregate — reduce patched grids to footprint means.
//!
//! [`aggregate_mean`] averages over an arbitrary set of axes, keeping every
//! other axis (channels included) in order. [`coarsen`] chains extraction
//! and the usual `(2, 3)` spatial reduction, producing the aggregated grid
//! `(R, Col)` or `(R, Col, C)`.
use crate::patches::{
    errors::{PatchError, PatchResult},
    extract::overlapping_patches,
    options::PatchOptions,
};
use ndarray::{ArrayD, ArrayViewD, Axis};

/// Spatial axes of a patched grid (`p × p` block rows and columns).
pub const PATCH_SPATIAL_AXES: [usize; 2] = [2, 3];

/// Arithmetic mean of `patched` over `axes`.
///
/// Parameters
/// ----------
/// - `patched`: array of any rank, typically the output of
///   [`overlapping_patches`].
/// - `axes`: distinct axis indices to reduce, in any order. `(2, 3)` reduces
///   each patch to a scalar per channel; `(2,)` pre-aggregates a single
///   layers dimension.
///
/// Returns
/// -------
/// Array with the selected axes removed. The mean is computed as one sum
/// over all reduced positions divided once by their count.
///
/// Errors
/// ------
/// - `PatchError::InvalidAxis` if `axes` is empty, contains a duplicate, an
///   index `>= patched.ndim()`, or an axis of length zero.
pub fn aggregate_mean(patched: &ArrayViewD<'_, f64>, axes: &[usize]) -> PatchResult<ArrayD<f64>> {
    let ndim = patched.ndim();
    if axes.is_empty() {
        return Err(PatchError::InvalidAxis { axis: 0, ndim, reason: "no axes to reduce" });
    }

    let mut sorted = axes.to_vec();
    sorted.sort_unstable();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(PatchError::InvalidAxis { axis: pair[0], ndim, reason: "axis repeated" });
        }
    }

    let mut count = 1usize;
    for &axis in &sorted {
        if axis >= ndim {
            return Err(PatchError::InvalidAxis { axis, ndim, reason: "axis out of range" });
        }
        let len = patched.len_of(Axis(axis));
        if len == 0 {
            return Err(PatchError::InvalidAxis { axis, ndim, reason: "axis has zero length" });
        }
        count *= len;
    }
    log::debug!("aggregate_mean: shape {:?}, axes {:?}", patched.shape(), sorted);

    // Reduce from the highest axis down so lower indices stay valid.
    let mut reduced = sorted.iter().rev();
    let mut sums = match reduced.next() {
        Some(&axis) => patched.sum_axis(Axis(axis)),
        None => patched.to_owned(),
    };
    for &axis in reduced {
        sums = sums.sum_axis(Axis(axis));
    }
    Ok(sums / count as f64)
}

/// Extract patches and average each one over its spatial block.
///
/// `(H, W)` → `(R, Col)` in 2-D mode, `(H, W, C)` → `(R, Col, C)` in 3-D
/// mode.
///
/// # Errors
/// Propagates the errors of [`overlapping_patches`].
pub fn coarsen(grid: &ArrayViewD<'_, f64>, opts: &PatchOptions) -> PatchResult<ArrayD<f64>> {
    let patched = overlapping_patches(grid, opts)?;
    aggregate_mean(&patched.view(), &PATCH_SPATIAL_AXES)
}
