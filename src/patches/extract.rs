//! patches::extract — overlapping block views of 2-D and 3-D grids.
//!
//! Purpose
//! -------
//! Cut a grid into square `p × p` blocks that tile the rows without overlap
//! and slide across the columns with stride `p - o`, as a zero-copy
//! [`PatchGrid`] view or as an owned rank-4/5 array.
//!
//! Key behaviors
//! -------------
//! - [`PatchGrid`] validates the grid against [`PatchOptions`] once and then
//!   hands out sub-views `grid[i*p .. i*p+p, j*s .. j*s+p (, ..)]` where
//!   `s = p - o`, in row-major patch order.
//! - [`overlapping_patches`] materializes the view into the documented
//!   `(R, Col, p, p)` or `(R, Col, p, p, C)` layout, dispatching on
//!   [`PatchMode`]; [`patches_2d`] and [`patches_3d`] are the statically
//!   ranked forms.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input grid is only ever borrowed; outputs never alias it.
//! - Block counts use floor division; trailing rows/columns that cannot
//!   fill a full patch are dropped.
//! - Every output element is read from exactly one input position, so two
//!   calls with identical inputs give identical outputs.
//!
//! Performance
//! -----------
//! - [`PatchGrid`] is O(1) to construct and each `patch(i, j)` is O(1).
//! - Materialization is O(R · Col · p² · C) time and space; with heavy
//!   overlap this is up to `p / (p - o)` times the input size.
use crate::patches::{
    errors::{PatchError, PatchResult},
    options::{PatchMode, PatchOptions},
};
use ndarray::{
    Array4, Array5, ArrayD, ArrayView2, ArrayView3, ArrayViewD, Axis, Ix2, Ix3, IxDyn, Slice,
};

/// PatchGrid — index-addressable, zero-copy view of a patched grid.
///
/// Fields
/// ------
/// - `grid`: borrowed input of rank 2 (`TwoD`) or 3 (`ThreeD`).
/// - `opts`: validated patch geometry.
/// - `rows`, `cols`: patch counts `R` and `Col`.
///
/// Invariants
/// ----------
/// - `grid.ndim() == opts.mode.grid_rank()`.
/// - `rows >= 1` and `cols >= 1`.
#[derive(Debug, Clone)]
pub struct PatchGrid<'a, A> {
    grid: ArrayViewD<'a, A>,
    opts: PatchOptions,
    rows: usize,
    cols: usize,
}

impl<'a, A> PatchGrid<'a, A> {
    /// Validate `grid` against `opts` and build the view.
    ///
    /// # Errors
    /// - [`PatchError::RankMismatch`] if the grid rank disagrees with
    ///   `opts.mode`.
    /// - [`PatchError::GridTooSmall`] if `patch_size` exceeds either the row
    ///   or column extent.
    pub fn new(grid: ArrayViewD<'a, A>, opts: PatchOptions) -> PatchResult<Self> {
        let expected = opts.mode.grid_rank();
        if grid.ndim() != expected {
            return Err(PatchError::RankMismatch {
                expected,
                actual: grid.ndim(),
                mode: Some(opts.mode),
            });
        }
        let (rows, cols) = opts.grid_dims(grid.len_of(Axis(0)), grid.len_of(Axis(1)))?;
        Ok(Self { grid, opts, rows, cols })
    }

    /// Number of patch rows `R`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of patch columns `Col`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn options(&self) -> &PatchOptions {
        &self.opts
    }

    /// Shape of the materialized patched grid: `[R, Col, p, p]` plus `[C]`
    /// in 3-D mode.
    pub fn shape(&self) -> Vec<usize> {
        let p = self.opts.patch_size;
        let mut shape = vec![self.rows, self.cols, p, p];
        if self.opts.mode == PatchMode::ThreeD {
            shape.push(self.grid.len_of(Axis(2)));
        }
        shape
    }

    /// Patch `(i, j)` as a view into the grid, or `None` if out of range.
    pub fn patch(&self, i: usize, j: usize) -> Option<ArrayViewD<'a, A>> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        Some(self.view_at(i, j))
    }

    /// All patches in row-major patch order (`(0,0), (0,1), …, (R-1,Col-1)`).
    pub fn iter(&self) -> impl Iterator<Item = ArrayViewD<'a, A>> + '_ {
        (0..self.rows).flat_map(move |i| (0..self.cols).map(move |j| self.view_at(i, j)))
    }

    fn view_at(&self, i: usize, j: usize) -> ArrayViewD<'a, A> {
        let p = self.opts.patch_size;
        let r0 = i * self.opts.row_stride();
        let c0 = j * self.opts.col_stride();
        let mut view = self.grid.clone();
        view.slice_axis_inplace(Axis(0), Slice::from(r0..r0 + p));
        view.slice_axis_inplace(Axis(1), Slice::from(c0..c0 + p));
        view
    }
}

impl<A: Clone> PatchGrid<'_, A> {
    /// Copy every patch into an owned array of shape [`PatchGrid::shape`].
    pub fn to_array(&self) -> ArrayD<A> {
        let row_stride = self.opts.row_stride();
        let col_stride = self.opts.col_stride();
        let grid = &self.grid;
        match self.opts.mode {
            PatchMode::TwoD => ArrayD::from_shape_fn(IxDyn(&self.shape()), |idx| {
                grid[[idx[0] * row_stride + idx[2], idx[1] * col_stride + idx[3]]].clone()
            }),
            PatchMode::ThreeD => ArrayD::from_shape_fn(IxDyn(&self.shape()), |idx| {
                grid[[idx[0] * row_stride + idx[2], idx[1] * col_stride + idx[3], idx[4]]].clone()
            }),
        }
    }
}

/// Extract overlapping patches from a 2-D or 3-D grid.
///
/// Parameters
/// ----------
/// - `grid`: `&ArrayViewD<A>`
///   Rank-2 `(H, W)` grid for [`PatchMode::TwoD`] or rank-3 `(H, W, C)` grid
///   for [`PatchMode::ThreeD`].
/// - `opts`: `&PatchOptions`
///   Validated patch size, overlap, and mode.
///
/// Returns
/// -------
/// `PatchResult<ArrayD<A>>`
///   Array of shape `(R, Col, p, p)` or `(R, Col, p, p, C)` with
///   `R = (H - p)/p + 1` and `Col = (W - p)/(p - o) + 1`.
///
/// Errors
/// ------
/// - `PatchError::RankMismatch` when the grid rank does not match the mode.
/// - `PatchError::GridTooSmall` when `p > H` or `p > W`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::Array2;
/// # use rust_gridops::patches::{overlapping_patches, PatchMode, PatchOptions};
/// let grid = Array2::from_shape_fn((6, 5), |(r, c)| (r * 5 + c) as f64).into_dyn();
/// let opts = PatchOptions::new(3, 2, PatchMode::TwoD).unwrap();
/// let patches = overlapping_patches(&grid.view(), &opts).unwrap();
/// assert_eq!(patches.shape(), &[2, 3, 3, 3]);
/// assert_eq!(patches[[1, 2, 0, 0]], grid[[3, 2]]);
/// ```
pub fn overlapping_patches<A: Clone>(
    grid: &ArrayViewD<'_, A>, opts: &PatchOptions,
) -> PatchResult<ArrayD<A>> {
    let rank_mismatch = || PatchError::RankMismatch {
        expected: opts.mode.grid_rank(),
        actual: grid.ndim(),
        mode: Some(opts.mode),
    };
    match opts.mode {
        PatchMode::TwoD => {
            let grid = grid.view().into_dimensionality::<Ix2>().map_err(|_| rank_mismatch())?;
            Ok(patches_2d(&grid, opts)?.into_dyn())
        }
        PatchMode::ThreeD => {
            let grid = grid.view().into_dimensionality::<Ix3>().map_err(|_| rank_mismatch())?;
            Ok(patches_3d(&grid, opts)?.into_dyn())
        }
    }
}

/// Statically ranked 2-D extraction: `(H, W)` → `(R, Col, p, p)`.
///
/// # Errors
/// - `PatchError::RankMismatch` if `opts.mode` is `ThreeD`.
/// - `PatchError::GridTooSmall` as for [`overlapping_patches`].
pub fn patches_2d<A: Clone>(grid: &ArrayView2<'_, A>, opts: &PatchOptions) -> PatchResult<Array4<A>> {
    if opts.mode != PatchMode::TwoD {
        return Err(PatchError::RankMismatch { expected: 3, actual: 2, mode: Some(opts.mode) });
    }
    let (h, w) = grid.dim();
    let (rows, cols) = opts.grid_dims(h, w)?;
    let p = opts.patch_size;
    let (row_stride, col_stride) = (opts.row_stride(), opts.col_stride());
    log::debug!(
        "patches_2d: grid ({h}, {w}), p = {p}, overlap = {} -> ({rows}, {cols}, {p}, {p})",
        opts.overlap
    );

    Ok(Array4::from_shape_fn((rows, cols, p, p), |(i, j, a, b)| {
        grid[[i * row_stride + a, j * col_stride + b]].clone()
    }))
}

/// Statically ranked 3-D extraction: `(H, W, C)` → `(R, Col, p, p, C)`.
///
/// The channel axis is copied verbatim into every patch.
///
/// # Errors
/// - `PatchError::RankMismatch` if `opts.mode` is `TwoD`.
/// - `PatchError::GridTooSmall` as for [`overlapping_patches`].
pub fn patches_3d<A: Clone>(grid: &ArrayView3<'_, A>, opts: &PatchOptions) -> PatchResult<Array5<A>> {
    if opts.mode != PatchMode::ThreeD {
        return Err(PatchError::RankMismatch { expected: 2, actual: 3, mode: Some(opts.mode) });
    }
    let (h, w, channels) = grid.dim();
    let (rows, cols) = opts.grid_dims(h, w)?;
    let p = opts.patch_size;
    let (row_stride, col_stride) = (opts.row_stride(), opts.col_stride());
    log::debug!(
        "patches_3d: grid ({h}, {w}, {channels}), p = {p}, overlap = {} -> ({rows}, {cols}, {p}, {p}, {channels})",
        opts.overlap
    );

    Ok(Array5::from_shape_fn((rows, cols, p, p, channels), |(i, j, a, b, c)| {
        grid[[i * row_stride + a, j * col_stride + b, c]].clone()
    }))
}
