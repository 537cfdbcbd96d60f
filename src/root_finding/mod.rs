//! root_finding — sign-change root scanning by interval bisection.
//!
//! Purpose
//! -------
//! Locate *all* roots of a scalar function on a closed interval, not just
//! one. The interval is halved until sub-intervals are no longer than
//! `tol`; every leaf whose endpoint values have strictly opposite signs
//! contributes its midpoint as a root.
//!
//! Key behaviors
//! -------------
//! - [`find_roots`] accepts a fallible `FnMut(f64) -> Result<f64, E>` and
//!   propagates the caller's error unchanged.
//! - [`find_roots_with_args`] threads an extra argument bundle through every
//!   call; [`scan_roots`] is the infallible convenience form and
//!   [`try_scan_roots`] the form for `anyhow::Result` callbacks.
//! - [`density::GaussianKdeSlope`] supplies the KDE slope whose roots are
//!   the estimate's modes and antimodes.
//!
//! Invariants & assumptions
//! ------------------------
//! - Roots come back in left-to-right leaf discovery order, at most one per
//!   leaf; they are never sorted or de-duplicated.
//! - Roots sitting exactly on a leaf boundary, and tangential roots without
//!   a sign change, are not reported.
//! - Each returned root is within `tol / 2` of a true sign change for a
//!   continuous function.
//!
//! Conventions
//! -----------
//! - Validation failures are [`RootError`]s and are converted into the
//!   caller's error type through `E: From<RootError>`.
//!
//! Testing notes
//! -------------
//! - `scan.rs` tests compare against a direct recursive reference and cover
//!   boundary misses, deep subdivision and error propagation.
//! - `density.rs` tests check the analytic slope against finite differences
//!   and recover the extrema of a bimodal sample.

pub mod density;
pub mod errors;
pub mod scan;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::density::{GaussianKdeSlope, scott_bandwidth};
pub use self::errors::{RootError, RootResult};
pub use self::scan::{
    RootSet, ScanOptions, find_roots, find_roots_with_args, scan_roots, try_scan_roots,
};

pub mod prelude {
    pub use super::errors::{RootError, RootResult};
    pub use super::scan::{RootSet, ScanOptions, find_roots, scan_roots};
}
