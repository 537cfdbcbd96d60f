//! footprints — the grid-to-window-group pipeline as a single call.
//!
//! [`footprint_groups`] chains [`crate::patches::coarsen`],
//! [`crate::patches::flatten_rays`] and [`crate::windows::rolling_window`]
//! under one [`FootprintOptions`]. Stage errors are wrapped in
//! [`FootprintError`].

pub mod errors;
pub mod groups;

pub use self::errors::{FootprintError, FootprintResult};
pub use self::groups::{FootprintOptions, footprint_groups};
