//! Flatten an aggregated grid into a ray list.
//!
//! Footprints are ordered scan row by scan row: ray `k` is footprint
//! `(k / Col, k % Col)`. A trailing channel axis stays as the second axis.
use crate::patches::errors::{PatchError, PatchResult};
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};

/// `(R, Col)` → `(R·Col,)` and `(R, Col, C)` → `(R·Col, C)`.
///
/// # Errors
/// - [`PatchError::RankMismatch`] for inputs that are not rank 2 or 3.
pub fn flatten_rays<A: Clone>(aggregated: &ArrayViewD<'_, A>) -> PatchResult<ArrayD<A>> {
    let ndim = aggregated.ndim();
    if ndim != 2 && ndim != 3 {
        return Err(PatchError::RankMismatch {
            expected: if ndim < 2 { 2 } else { 3 },
            actual: ndim,
            mode: None,
        });
    }
    let rows = aggregated.len_of(Axis(0));
    let cols = aggregated.len_of(Axis(1));
    let n_rays = rows * cols;

    let out = if ndim == 2 {
        ArrayD::from_shape_fn(IxDyn(&[n_rays]), |idx| {
            aggregated[[idx[0] / cols, idx[0] % cols]].clone()
        })
    } else {
        let channels = aggregated.len_of(Axis(2));
        ArrayD::from_shape_fn(IxDyn(&[n_rays, channels]), |idx| {
            aggregated[[idx[0] / cols, idx[0] % cols, idx[1]]].clone()
        })
    };
    log::debug!("flatten_rays: {:?} -> {:?}", aggregated.shape(), out.shape());
    Ok(out)
}
