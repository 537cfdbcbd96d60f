//! windows — rolling windows over the leading axis of an array.
//!
//! Purpose
//! -------
//! Group consecutive entries of a sequence (typically the flattened
//! footprint rays produced by [`crate::patches::flatten_rays`]) into
//! fixed-length, stride-1 windows so neighbouring footprints can be
//! processed together.
//!
//! Key behaviors
//! -------------
//! - [`WindowBatch`] exposes the windows as zero-copy views.
//! - [`rolling_window`] and [`rolling_window_1d`] materialize the batch as
//!   an owned array of shape `(N - k + 1, k, ...)`.
//! - [`WindowBatch::at_offset`] selects one position from every window,
//!   e.g. offset `k - 1` to label each window by its trailing entry.
//!
//! Invariants & assumptions
//! ------------------------
//! - `1 <= window_size <= N`; trailing axes are carried along unchanged.
//! - Window `i` holds entries `i..i + k` of the input.
//!
//! Testing notes
//! -------------
//! - Unit tests cover shapes, trailing-axis preservation, offset selection
//!   and every error branch.

pub mod errors;
pub mod rolling;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{WindowError, WindowResult};
pub use self::rolling::{WindowBatch, rolling_window, rolling_window_1d};

pub mod prelude {
    pub use super::errors::{WindowError, WindowResult};
    pub use super::rolling::{WindowBatch, rolling_window};
}
