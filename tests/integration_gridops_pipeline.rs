//! Integration tests for the grid → footprint → window pipeline and the
//! sign-change root scan.
//!
//! Purpose
//! -------
//! - Validate the end-to-end data flow on realistic grids: overlapping patch
//!   extraction, per-patch averaging, row-major ray flattening, rolling
//!   window grouping and trailing-entry labels.
//! - Exercise root scanning both on closed-form functions and on the slope
//!   of a kernel density estimate built from a sample.
//!
//! Coverage
//! --------
//! - `patches`: `overlapping_patches`, `PatchGrid`, `coarsen`,
//!   `aggregate_mean`, `flatten_rays` in 2-D and 3-D mode.
//! - `windows`: `rolling_window`, `WindowBatch::at_offset`.
//! - `footprints`: `footprint_groups` against the staged calls.
//! - `root_finding`: `find_roots`, `scan_roots`, `GaussianKdeSlope`.
//!
//! Exclusions
//! ----------
//! - Individual error branches and Display payloads; those are covered by
//!   unit tests.
//! - Python bindings; those are exercised from the Python package.
use approx::assert_relative_eq;
use ndarray::{Array2, Array3, ArrayD, Axis, IxDyn, s};
use rust_gridops::{
    footprints::{FootprintOptions, footprint_groups},
    patches::{
        PATCH_SPATIAL_AXES, PatchGrid, PatchMode, PatchOptions, aggregate_mean, coarsen,
        flatten_rays, overlapping_patches,
    },
    root_finding::{GaussianKdeSlope, RootError, find_roots, scan_roots},
    windows::{WindowBatch, rolling_window},
};

/// Purpose
/// -------
/// Build a smooth `(h, w)` field with distinct values at every cell so that
/// misplaced indices show up as value mismatches.
fn smooth_field(h: usize, w: usize) -> Array2<f64> {
    Array2::from_shape_fn((h, w), |(r, c)| {
        let (r, c) = (r as f64, c as f64);
        (0.3 * r).sin() + 0.05 * c * c + 0.001 * r * c
    })
}

#[test]
// Purpose
// -------
// Check patch geometry and contents on a grid with leftover rows and
// columns.
//
// Given
// -----
// - A 10×11 grid, p = 4, o = 1 (column stride 3).
//
// Expect
// ------
// - R = (10 - 4)/4 + 1 = 2, Col = (11 - 4)/3 + 1 = 3.
// - Patch (i, j) equals grid[4i..4i+4, 3j..3j+4].
// - The zero-copy `PatchGrid` view agrees with the owned output.
fn patches_match_direct_slices_with_leftovers_dropped() {
    // Arrange
    let grid = smooth_field(10, 11).into_dyn();
    let opts = PatchOptions::new(4, 1, PatchMode::TwoD).unwrap();

    // Act
    let patched = overlapping_patches(&grid.view(), &opts).unwrap();
    let view = PatchGrid::new(grid.view(), opts).unwrap();

    // Assert
    assert_eq!(patched.shape(), &[2, 3, 4, 4]);
    assert_eq!(view.shape(), patched.shape().to_vec());
    let grid2 = grid.view().into_dimensionality::<ndarray::Ix2>().unwrap();
    for i in 0..2 {
        for j in 0..3 {
            let expected = grid2.slice(s![4 * i..4 * i + 4, 3 * j..3 * j + 4]).into_dyn();
            let got = patched.slice(s![i, j, .., ..]).into_dyn();
            assert_eq!(got, expected, "patch ({i}, {j})");
            assert_eq!(view.patch(i, j).unwrap(), expected);
        }
    }
    assert_eq!(view.to_array(), patched);
}

#[test]
// Purpose
// -------
// Run the full staged pipeline on a 2-D field and compare with the single
// `footprint_groups` call.
//
// Given
// -----
// - A 9×8 field, default options (p = 3, o = 2, k = 3).
//
// Expect
// ------
// - Coarse grid (3, 6) → 18 rays → windows (16, 3).
// - Ray k equals coarse[k / 6, k % 6].
// - Labels at offset 2 are rays 2..18.
// - `footprint_groups` equals the staged result.
fn staged_pipeline_matches_footprint_groups_in_2d() {
    // Arrange
    let _ = env_logger::builder().is_test(true).try_init();
    let grid = smooth_field(9, 8).into_dyn();
    let opts = FootprintOptions::default();

    // Act
    let coarse = coarsen(&grid.view(), &opts.patch).unwrap();
    let rays = flatten_rays(&coarse.view()).unwrap();
    let windows = rolling_window(&rays.view(), opts.window_size).unwrap();
    let labels = WindowBatch::new(rays.view(), opts.window_size).unwrap().at_offset(2).unwrap();
    let grouped = footprint_groups(&grid.view(), &opts).unwrap();

    // Assert
    assert_eq!(coarse.shape(), &[3, 6]);
    assert_eq!(rays.shape(), &[18]);
    assert_eq!(windows.shape(), &[16, 3]);
    for k in 0..18 {
        assert_relative_eq!(rays[[k]], coarse[[k / 6, k % 6]]);
    }
    assert_eq!(labels.shape(), &[16]);
    for i in 0..16 {
        assert_relative_eq!(labels[[i]], rays[[i + 2]]);
        assert_relative_eq!(windows[[i, 2]], labels[[i]]);
    }
    assert_eq!(grouped, windows);
}

#[test]
// Purpose
// -------
// Carry a channel axis through every stage.
//
// Given
// -----
// - A 6×7×3 grid, channel c = field + 100·c; p = 3, o = 1, k = 2.
//
// Expect
// ------
// - Patched (2, 3, 3, 3, 3); coarse (2, 3, 3); rays (6, 3); windows (5, 2, 3).
// - Per-channel means differ by exactly 100 between consecutive channels.
fn channel_axis_survives_the_pipeline_in_3d() {
    // Arrange
    let field = smooth_field(6, 7);
    let grid = Array3::from_shape_fn((6, 7, 3), |(r, c, ch)| field[[r, c]] + 100.0 * ch as f64)
        .into_dyn();
    let patch = PatchOptions::new(3, 1, PatchMode::ThreeD).unwrap();
    let opts = FootprintOptions::new(patch, 2).unwrap();

    // Act
    let patched = overlapping_patches(&grid.view(), &patch).unwrap();
    let coarse = aggregate_mean(&patched.view(), &PATCH_SPATIAL_AXES).unwrap();
    let rays = flatten_rays(&coarse.view()).unwrap();
    let grouped = footprint_groups(&grid.view(), &opts).unwrap();

    // Assert
    assert_eq!(patched.shape(), &[2, 3, 3, 3, 3]);
    assert_eq!(coarse.shape(), &[2, 3, 3]);
    assert_eq!(rays.shape(), &[6, 3]);
    assert_eq!(grouped.shape(), &[5, 2, 3]);
    for ray in rays.axis_iter(Axis(0)) {
        assert_relative_eq!(ray[[1]] - ray[[0]], 100.0, epsilon = 1e-9);
        assert_relative_eq!(ray[[2]] - ray[[1]], 100.0, epsilon = 1e-9);
    }
    assert_eq!(grouped.slice(s![0, 1, ..]), rays.slice(s![1, ..]));
}

#[test]
// Purpose
// -------
// Pre-aggregating a layers axis before patching is the same as reducing it
// alongside the spatial axes afterwards.
//
// Given
// -----
// - A (H = 6, W = 6, L = 4) stack treated as a 3-D grid, p = 3, o = 2.
//
// Expect
// ------
// - mean over the layer axis then coarsen (2-D) equals
//   aggregate_mean(patched, [2, 3, 4]) of the 3-D patches.
fn layer_preaggregation_commutes_with_patch_means() {
    // Arrange
    let stack = Array3::from_shape_fn((6, 6, 4), |(r, c, l)| (r * 31 + c * 7 + l * 3) as f64 * 0.1)
        .into_dyn();
    let flat = aggregate_mean(&stack.view(), &[2]).unwrap();
    let opts_2d = PatchOptions::new(3, 2, PatchMode::TwoD).unwrap();
    let opts_3d = PatchOptions::new(3, 2, PatchMode::ThreeD).unwrap();

    // Act
    let coarse_2d = coarsen(&flat.view(), &opts_2d).unwrap();
    let patched_3d = overlapping_patches(&stack.view(), &opts_3d).unwrap();
    let coarse_3d = aggregate_mean(&patched_3d.view(), &[2, 3, 4]).unwrap();

    // Assert
    assert_eq!(coarse_2d.shape(), coarse_3d.shape());
    for (a, b) in coarse_2d.iter().zip(coarse_3d.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
// Purpose
// -------
// Root scanning recovers every crossing of a multi-root function and stays
// within tol / 2 of each true root.
//
// Given
// -----
// - f(x) = (x - 1.3)(x + 2.7)(x - 4.1) on [-5, 6], tol = 1e-3.
//
// Expect
// ------
// - Three roots in ascending order, each within 5e-4 of the exact value.
fn scan_roots_recovers_all_crossings_of_a_cubic() {
    // Arrange
    let f = |x: f64| (x - 1.3) * (x + 2.7) * (x - 4.1);

    // Act
    let roots = scan_roots(-5.0, 6.0, 1e-3, f).unwrap();

    // Assert
    assert_eq!(roots.len(), 3, "roots = {roots:?}");
    for (got, want) in roots.iter().zip([-2.7, 1.3, 4.1]) {
        assert!((got - want).abs() <= 5e-4, "got {got}, want {want}");
    }
    assert!(roots.as_slice().windows(2).all(|w| w[0] < w[1]));
}

#[test]
// Purpose
// -------
// Scanning the KDE slope of a sample locates its modes and antimode, as the
// density-based pipeline does with bandwidth / 10 tolerance.
//
// Given
// -----
// - 40 deterministic samples, 25 spread around 1.0 and 15 around 6.0.
// - Scott's rule bandwidth.
//
// Expect
// ------
// - Three extrema: a mode near 1, an antimode between the clusters, and a
//   mode near 6.
// - The antimode density is below both mode densities.
fn kde_slope_scan_locates_modes_of_two_clusters() {
    // Arrange
    let left = (0..25).map(|i| 1.0 + 0.8 * ((i as f64) * 0.7).sin());
    let right = (0..15).map(|i| 6.0 + 0.6 * ((i as f64) * 1.3).cos());
    let samples: Vec<f64> = left.chain(right).collect();
    let kde = GaussianKdeSlope::with_scott_bandwidth(&samples).unwrap();

    // Act
    let extrema = kde.extrema(0.1).unwrap();

    // Assert
    assert_eq!(extrema.len(), 3, "extrema = {extrema:?}, bw = {}", kde.bandwidth());
    let e = extrema.as_slice();
    assert!((e[0] - 1.0).abs() < 0.6, "left mode {}", e[0]);
    assert!(e[1] > 2.0 && e[1] < 5.5, "antimode {}", e[1]);
    assert!((e[2] - 6.0).abs() < 0.6, "right mode {}", e[2]);
    assert!(kde.density(e[1]) < kde.density(e[0]));
    assert!(kde.density(e[1]) < kde.density(e[2]));
}

#[test]
// Purpose
// -------
// User errors abort the scan and come back unchanged; validation failures
// arrive in the caller's error type.
//
// Given
// -----
// - A function failing for x > 0.5 on [0, 1].
// - A caller error type with a `From<RootError>` conversion.
//
// Expect
// ------
// - The function's own error for the failing scan.
// - `Invalid(RootError::InvalidInterval)` for a reversed interval.
fn find_roots_propagates_caller_errors_and_converts_validation() {
    #[derive(Debug, PartialEq)]
    enum CallerError {
        OutOfDomain(f64),
        Invalid(RootError),
    }
    impl From<RootError> for CallerError {
        fn from(err: RootError) -> Self {
            CallerError::Invalid(err)
        }
    }

    let res = find_roots(0.0, 1.0, 0.01, |x| {
        if x > 0.5 { Err(CallerError::OutOfDomain(x)) } else { Ok(x - 0.25) }
    });
    assert!(matches!(res, Err(CallerError::OutOfDomain(x)) if x > 0.5));

    let res = find_roots(1.0, 0.0, 0.01, Ok::<f64, CallerError>);
    assert_eq!(
        res.unwrap_err(),
        CallerError::Invalid(RootError::InvalidInterval { a: 1.0, b: 0.0 })
    );
}

#[test]
// Purpose
// -------
// Coarsening a constant grid yields that constant everywhere, for any
// valid geometry.
fn coarsen_of_constant_grid_is_constant() {
    let grid = ArrayD::from_elem(IxDyn(&[7, 9]), 2.5);
    for (p, o) in [(1, 0), (2, 1), (3, 0), (3, 2), (7, 6)] {
        let opts = PatchOptions::new(p, o, PatchMode::TwoD).unwrap();
        let coarse = coarsen(&grid.view(), &opts).unwrap();
        assert!(coarse.iter().all(|&v| (v - 2.5).abs() < 1e-12), "p = {p}, o = {o}");
    }
}
