//! Patch geometry: block size, horizontal overlap, and channel mode.
//!
//! Rows are traversed without overlap (stride `patch_size`); columns advance
//! by `patch_size - overlap`, so consecutive patches along a scan row share
//! `overlap` columns. Leftover rows/columns that cannot fill a full patch
//! are dropped.
use crate::patches::errors::{PatchError, PatchResult};
use std::str::FromStr;

/// Whether a trailing channel axis is carried inside each patch.
///
/// - `TwoD`: grid is `(H, W)`, patches are `(p, p)`.
/// - `ThreeD`: grid is `(H, W, C)`, patches are `(p, p, C)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatchMode {
    #[default]
    TwoD,
    ThreeD,
}

impl PatchMode {
    /// Rank of the grid this mode accepts.
    pub fn grid_rank(self) -> usize {
        match self {
            PatchMode::TwoD => 2,
            PatchMode::ThreeD => 3,
        }
    }
}

impl std::fmt::Display for PatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchMode::TwoD => write!(f, "2d"),
            PatchMode::ThreeD => write!(f, "3d"),
        }
    }
}

impl FromStr for PatchMode {
    type Err = PatchError;

    /// Parse `"2d"` / `"3d"` (case-insensitive; `"twod"` / `"threed"` also
    /// accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2d" | "twod" => Ok(PatchMode::TwoD),
            "3d" | "threed" => Ok(PatchMode::ThreeD),
            _ => Err(PatchError::InvalidMode { name: s.to_string() }),
        }
    }
}

/// Validated patch configuration.
///
/// Fields
/// ------
/// - `patch_size`: side length `p` of the square patch (rows and columns).
/// - `overlap`: number of columns `o` shared by horizontally adjacent
///   patches.
/// - `mode`: see [`PatchMode`].
///
/// Invariants
/// ----------
/// - `patch_size > 0`.
/// - `overlap < patch_size`, so the column stride `p - o` is at least 1.
///
/// Default
/// -------
/// `patch_size = 3`, `overlap = 2`, `mode = TwoD`: 3×3 footprints that
/// advance one column at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchOptions {
    pub patch_size: usize,
    pub overlap: usize,
    pub mode: PatchMode,
}

impl PatchOptions {
    /// Construct validated patch options.
    ///
    /// # Errors
    /// - [`PatchError::InvalidPatchSize`] if `patch_size == 0`.
    /// - [`PatchError::InvalidOverlap`] if `overlap >= patch_size`.
    pub fn new(patch_size: usize, overlap: usize, mode: PatchMode) -> PatchResult<Self> {
        let opts = Self { patch_size, overlap, mode };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check the invariants of [`PatchOptions::new`].
    ///
    /// Fields are public (and deserializable), so values that bypassed the
    /// constructor are validated again before any stride arithmetic.
    ///
    /// # Errors
    /// - [`PatchError::InvalidPatchSize`] if `patch_size == 0`.
    /// - [`PatchError::InvalidOverlap`] if `overlap >= patch_size`.
    pub fn validate(&self) -> PatchResult<()> {
        if self.patch_size == 0 {
            return Err(PatchError::InvalidPatchSize { patch_size: 0 });
        }
        if self.overlap >= self.patch_size {
            return Err(PatchError::InvalidOverlap {
                overlap: self.overlap as i64,
                patch_size: self.patch_size,
            });
        }
        Ok(())
    }

    /// Construct options from signed integers, as received from dynamic
    /// callers. Negative values are rejected rather than wrapped.
    pub fn from_signed(patch_size: i64, overlap: i64, mode: PatchMode) -> PatchResult<Self> {
        if patch_size <= 0 {
            return Err(PatchError::InvalidPatchSize { patch_size });
        }
        let p = patch_size as usize;
        if overlap < 0 {
            return Err(PatchError::InvalidOverlap { overlap, patch_size: p });
        }
        Self::new(p, overlap as usize, mode)
    }

    /// Row advance between vertically adjacent patches.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.patch_size
    }

    /// Column advance between horizontally adjacent patches.
    ///
    /// Zero for options that fail [`PatchOptions::validate`].
    #[inline]
    pub fn col_stride(&self) -> usize {
        self.patch_size.saturating_sub(self.overlap)
    }

    /// Number of patch rows and columns `(R, Col)` for an `h × w` grid.
    ///
    /// `R = (h - p)/p + 1` and `Col = (w - p)/(p - o) + 1` (floor division).
    ///
    /// # Errors
    /// - [`PatchError::InvalidPatchSize`] / [`PatchError::InvalidOverlap`]
    ///   for options that fail [`PatchOptions::validate`].
    /// - [`PatchError::GridTooSmall`] if `p > h` or `p > w`.
    pub fn grid_dims(&self, h: usize, w: usize) -> PatchResult<(usize, usize)> {
        self.validate()?;
        let p = self.patch_size;
        if p > h || p > w {
            return Err(PatchError::GridTooSmall { patch_size: p, rows: h, cols: w });
        }
        Ok(((h - p) / self.row_stride() + 1, (w - p) / self.col_stride() + 1))
    }
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self { patch_size: 3, overlap: 2, mode: PatchMode::TwoD }
    }
}
