//! patches — overlapping block extraction and footprint aggregation.
//!
//! Purpose
//! -------
//! Turn a dense 2-D `(H, W)` or 3-D `(H, W, C)` grid into square patches
//! that tile the rows and overlap along the columns, then reduce each patch
//! to its mean to obtain a coarsened grid of footprints.
//!
//! Key behaviors
//! -------------
//! - Validate patch geometry once via [`PatchOptions`] (`patch_size > 0`,
//!   `overlap < patch_size`) and grid extents via
//!   [`PatchOptions::grid_dims`].
//! - Offer both a zero-copy [`PatchGrid`] view and owned outputs from
//!   [`overlapping_patches`], [`patches_2d`], and [`patches_3d`].
//! - Reduce patches with [`aggregate_mean`] (arbitrary axes) or the
//!   combined [`coarsen`]; linearize footprints with [`flatten_rays`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Rows advance by `patch_size`; columns advance by
//!   `patch_size - overlap`.
//! - Patched grids have shape `(R, Col, p, p)` or `(R, Col, p, p, C)` with
//!   `R = (H - p)/p + 1` and `Col = (W - p)/(p - o) + 1`.
//! - No routine mutates its input or keeps state between calls.
//!
//! Conventions
//! -----------
//! - Axis 0 of a grid is the row (along-track) axis, axis 1 the column
//!   (cross-track) axis, axis 2 the optional channel axis.
//! - All failures are reported through [`PatchError`]; configuration and
//!   shape failures are distinguished by [`PatchError::is_configuration`].
//!
//! Testing notes
//! -------------
//! - Unit tests in each file cover shape formulas, element-wise agreement
//!   with direct slicing, channel preservation, and every error branch.

pub mod aggregate;
pub mod errors;
pub mod extract;
pub mod flatten;
pub mod options;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::aggregate::{PATCH_SPATIAL_AXES, aggregate_mean, coarsen};
pub use self::errors::{PatchError, PatchResult};
pub use self::extract::{PatchGrid, overlapping_patches, patches_2d, patches_3d};
pub use self::flatten::flatten_rays;
pub use self::options::{PatchMode, PatchOptions};

pub mod prelude {
    pub use super::aggregate::{aggregate_mean, coarsen};
    pub use super::errors::{PatchError, PatchResult};
    pub use super::extract::{PatchGrid, overlapping_patches};
    pub use super::options::{PatchMode, PatchOptions};
}
