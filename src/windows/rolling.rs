//! windows::rolling — stride-1 rolling windows over a leading axis.
//!
//! Purpose
//! -------
//! Group `k` consecutive entries of a sequence (for footprints, `k`
//! adjacent rays that share physical overlap) into windows
//! `seq[i .. i + k]`, `i = 0 ..= N - k`, with trailing axes carried through.
//!
//! Key behaviors
//! -------------
//! - [`WindowBatch`] is a zero-copy view: each window is an `ndarray` slice
//!   of the input along axis 0.
//! - [`rolling_window`] / [`WindowBatch::to_array`] materialize the batch
//!   as an owned `(N - k + 1, k, ...)` array.
//! - [`WindowBatch::at_offset`] picks one position from every window, the
//!   way a consumer selects a reference label per group.
//!
//! Invariants & assumptions
//! ------------------------
//! - `1 <= k <= N`; windows advance by exactly one row and never skip.
//! - Inputs are borrowed and never mutated.
//!
//! Performance
//! -----------
//! - View construction and window access are O(1).
//! - Materialization copies `(N - k + 1) · k · (trailing size)` elements.
use crate::windows::errors::{WindowError, WindowResult};
use ndarray::{Array2, ArrayD, ArrayView1, ArrayViewD, Axis, IxDyn, Slice};

/// WindowBatch — rolling windows of a sequence, addressed by start index.
///
/// Invariants
/// ----------
/// - `seq.ndim() >= 1`.
/// - `1 <= window_size <= seq.len_of(Axis(0))`.
#[derive(Debug, Clone)]
pub struct WindowBatch<'a, A> {
    seq: ArrayViewD<'a, A>,
    window_size: usize,
}

impl<'a, A> WindowBatch<'a, A> {
    /// Validate the sequence and window size.
    ///
    /// # Errors
    /// - [`WindowError::ScalarInput`] for a rank-0 input.
    /// - [`WindowError::InvalidWindowSize`] if `window_size == 0` or exceeds
    ///   the leading-axis length.
    pub fn new(seq: ArrayViewD<'a, A>, window_size: usize) -> WindowResult<Self> {
        if seq.ndim() == 0 {
            return Err(WindowError::ScalarInput);
        }
        let len = seq.len_of(Axis(0));
        if window_size == 0 || window_size > len {
            return Err(WindowError::InvalidWindowSize { window_size: window_size as i64, len });
        }
        Ok(Self { seq, window_size })
    }

    /// Number of windows, `N - k + 1`.
    pub fn len(&self) -> usize {
        self.seq.len_of(Axis(0)) - self.window_size + 1
    }

    /// Never `true` for a constructed batch.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Shape of the materialized batch: `[N - k + 1, k, trailing...]`.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = Vec::with_capacity(self.seq.ndim() + 1);
        shape.push(self.len());
        shape.push(self.window_size);
        shape.extend_from_slice(&self.seq.shape()[1..]);
        shape
    }

    /// Window `i` (`seq[i .. i + k]`) as a view, or `None` if out of range.
    pub fn window(&self, i: usize) -> Option<ArrayViewD<'a, A>> {
        if i >= self.len() {
            return None;
        }
        Some(self.view_at(i))
    }

    /// All windows in order of their start index.
    pub fn iter(&self) -> impl Iterator<Item = ArrayViewD<'a, A>> + '_ {
        (0..self.len()).map(move |i| self.view_at(i))
    }

    fn view_at(&self, i: usize) -> ArrayViewD<'a, A> {
        let mut view = self.seq.clone();
        view.slice_axis_inplace(Axis(0), Slice::from(i..i + self.window_size));
        view
    }
}

impl<A: Clone> WindowBatch<'_, A> {
    /// Copy the batch into an owned array of shape [`WindowBatch::shape`].
    pub fn to_array(&self) -> ArrayD<A> {
        let shape = self.shape();
        let seq = &self.seq;
        let mut src = vec![0usize; seq.ndim()];
        ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
            src[0] = idx[0] + idx[1];
            for axis in 1..src.len() {
                src[axis] = idx[axis + 1];
            }
            seq[src.as_slice()].clone()
        })
    }

    /// Element `offset` of every window, shape `(N - k + 1, trailing...)`.
    ///
    /// Offset `k / 2` selects the middle footprint of each group; offset
    /// `k - 1` the trailing one.
    ///
    /// # Errors
    /// - [`WindowError::InvalidOffset`] if `offset >= window_size`.
    pub fn at_offset(&self, offset: usize) -> WindowResult<ArrayD<A>> {
        if offset >= self.window_size {
            return Err(WindowError::InvalidOffset { offset, window_size: self.window_size });
        }
        let n = self.len();
        Ok(self.seq.slice_axis(Axis(0), Slice::from(offset..offset + n)).to_owned())
    }
}

/// Build stride-1 rolling windows over the leading axis of `seq`.
///
/// Parameters
/// ----------
/// - `seq`: `&ArrayViewD<A>`
///   Sequence of rank >= 1 whose axis 0 has length `N`.
/// - `window_size`: `usize`
///   Window length `k`, `1 <= k <= N`.
///
/// Returns
/// -------
/// `WindowResult<ArrayD<A>>`
///   Array of rank `seq.ndim() + 1` and shape `(N - k + 1, k, ...)` whose
///   row `i` equals `seq[i .. i + k]`.
///
/// Errors
/// ------
/// - `WindowError::ScalarInput` for rank-0 input.
/// - `WindowError::InvalidWindowSize` if `k == 0` or `k > N`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_gridops::windows::rolling_window;
/// let seq = array![1.0, 2.0, 3.0, 4.0].into_dyn();
/// let windows = rolling_window(&seq.view(), 3).unwrap();
/// assert_eq!(windows, array![[1.0, 2.0, 3.0], [2.0, 3.0, 4.0]].into_dyn());
/// ```
pub fn rolling_window<A: Clone>(seq: &ArrayViewD<'_, A>, window_size: usize) -> WindowResult<ArrayD<A>> {
    let batch = WindowBatch::new(seq.view(), window_size)?;
    log::debug!(
        "rolling_window: sequence {:?}, window_size {window_size} -> {:?}",
        seq.shape(),
        batch.shape()
    );
    Ok(batch.to_array())
}

/// Statically ranked form for 1-D sequences: `(N,)` → `(N - k + 1, k)`.
///
/// # Errors
/// - `WindowError::InvalidWindowSize` if `k == 0` or `k > N`.
pub fn rolling_window_1d<A: Clone>(
    seq: &ArrayView1<'_, A>, window_size: usize,
) -> WindowResult<Array2<A>> {
    let len = seq.len();
    if window_size == 0 || window_size > len {
        return Err(WindowError::InvalidWindowSize { window_size: window_size as i64, len });
    }
    Ok(Array2::from_shape_fn((len - window_size + 1, window_size), |(i, j)| seq[i + j].clone()))
}
