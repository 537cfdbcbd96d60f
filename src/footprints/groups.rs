//! Grid → coarsened footprints → ray list → rolling groups, in one call.
use crate::{
    footprints::errors::{FootprintError, FootprintResult},
    patches::{PatchOptions, coarsen, flatten_rays},
    windows::rolling_window,
};
use ndarray::{ArrayD, ArrayViewD};

/// Pipeline configuration: patch geometry plus the number of consecutive
/// footprints grouped per window.
///
/// Default: [`PatchOptions::default`] with `window_size = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FootprintOptions {
    pub patch: PatchOptions,
    pub window_size: usize,
}

impl FootprintOptions {
    /// # Errors
    /// - [`FootprintError::InvalidWindowSize`] if `window_size == 0`.
    pub fn new(patch: PatchOptions, window_size: usize) -> FootprintResult<Self> {
        if window_size == 0 {
            return Err(FootprintError::InvalidWindowSize { window_size });
        }
        Ok(Self { patch, window_size })
    }
}

impl Default for FootprintOptions {
    fn default() -> Self {
        Self { patch: PatchOptions::default(), window_size: 3 }
    }
}

/// Coarsen `grid`, flatten the footprints in scan order and group them
/// into stride-1 windows.
///
/// Output is `(R·Col - k + 1, k)` for a 2-D grid and
/// `(R·Col - k + 1, k, C)` for a 3-D grid.
///
/// # Errors
/// - [`FootprintError::Patch`] for invalid geometry or grid shape.
/// - [`FootprintError::Window`] if there are fewer than `k` footprints.
pub fn footprint_groups(
    grid: &ArrayViewD<'_, f64>, opts: &FootprintOptions,
) -> FootprintResult<ArrayD<f64>> {
    let coarse = coarsen(grid, &opts.patch)?;
    let rays = flatten_rays(&coarse.view())?;
    log::debug!(
        "footprint_groups: grid {:?} -> coarse {:?} -> {} rays, window_size = {}",
        grid.shape(),
        coarse.shape(),
        rays.shape()[0],
        opts.window_size
    );
    Ok(rolling_window(&rays.view(), opts.window_size)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        patches::{PatchError, PatchMode},
        windows::WindowError,
    };
    use approx::assert_relative_eq;
    use ndarray::{Array2, Array3};

    #[test]
    // Purpose
    // -------
    // Run the default pipeline on a small 2-D grid.
    //
    // Given
    // -----
    // - A 6×5 grid with value r*5 + c; p = 3, o = 2, k = 3.
    //
    // Expect
    // ------
    // - Coarse grid (2, 3) → 6 rays → output (4, 3).
    // - Group 0 holds the first three footprint means of scan row 0.
    fn footprint_groups_runs_default_pipeline_on_2d_grid() {
        // Arrange
        let grid = Array2::from_shape_fn((6, 5), |(r, c)| (r * 5 + c) as f64).into_dyn();
        let opts = FootprintOptions::default();

        // Act
        let groups = footprint_groups(&grid.view(), &opts).unwrap();

        // Assert
        assert_eq!(groups.shape(), &[4, 3]);
        // Mean of rows 0..3, cols j..j+3 is 5 + 1 + j.
        assert_relative_eq!(groups[[0, 0]], 6.0);
        assert_relative_eq!(groups[[0, 1]], 7.0);
        assert_relative_eq!(groups[[0, 2]], 8.0);
        // Group 1 crosses into scan row 1 (mean 21 at j = 0).
        assert_relative_eq!(groups[[1, 2]], 21.0);
    }

    #[test]
    // Purpose
    // -------
    // Channels survive every stage.
    //
    // Given
    // -----
    // - A 3×4×2 grid, channel 1 = 10 × channel 0; p = 3, o = 2, k = 2.
    //
    // Expect
    // ------
    // - Coarse (1, 2, 2) → 2 rays → output (1, 2, 2), channel ratio kept.
    fn footprint_groups_preserves_channels_in_3d_mode() {
        // Arrange
        let grid = Array3::from_shape_fn((3, 4, 2), |(r, c, ch)| {
            let base = (r * 4 + c) as f64;
            if ch == 0 { base } else { 10.0 * base }
        })
        .into_dyn();
        let patch = PatchOptions::new(3, 2, PatchMode::ThreeD).unwrap();
        let opts = FootprintOptions::new(patch, 2).unwrap();

        // Act
        let groups = footprint_groups(&grid.view(), &opts).unwrap();

        // Assert
        assert_eq!(groups.shape(), &[1, 2, 2]);
        for j in 0..2 {
            assert_relative_eq!(groups[[0, j, 1]], 10.0 * groups[[0, j, 0]], epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Stage failures surface as the wrapped stage error.
    fn footprint_groups_reports_stage_errors() {
        let grid = Array2::<f64>::zeros((3, 4)).into_dyn();

        let err = footprint_groups(&grid.view(), &FootprintOptions::default()).unwrap_err();
        assert_eq!(
            err,
            FootprintError::Window(WindowError::InvalidWindowSize { window_size: 3, len: 2 })
        );

        let small = Array2::<f64>::zeros((2, 2)).into_dyn();
        let err = footprint_groups(&small.view(), &FootprintOptions::default()).unwrap_err();
        assert!(matches!(err, FootprintError::Patch(PatchError::GridTooSmall { .. })));

        let literal = FootprintOptions {
            patch: PatchOptions { patch_size: 3, overlap: 3, mode: PatchMode::TwoD },
            window_size: 3,
        };
        let grid = Array2::<f64>::zeros((6, 6)).into_dyn();
        assert_eq!(
            footprint_groups(&grid.view(), &literal).unwrap_err(),
            FootprintError::Patch(PatchError::InvalidOverlap { overlap: 3, patch_size: 3 })
        );

        assert_eq!(
            FootprintOptions::new(PatchOptions::default(), 0).unwrap_err(),
            FootprintError::InvalidWindowSize { window_size: 0 }
        );
    }
}
