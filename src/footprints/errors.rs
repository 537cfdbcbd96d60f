//! Errors for the end-to-end footprint grouping pipeline.
//!
//! [`FootprintError`] wraps the stage errors so a single `?` chain can run
//! patching, flattening and windowing. Stage errors are preserved as-is.

use crate::{patches::PatchError, windows::WindowError};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type FootprintResult<T> = Result<T, FootprintError>;

#[derive(Debug, Clone, PartialEq)]
pub enum FootprintError {
    /// Patch extraction, aggregation or flattening failed.
    Patch(PatchError),

    /// Window grouping failed.
    Window(WindowError),

    /// `window_size` must be at least 1.
    InvalidWindowSize { window_size: usize },
}

impl std::error::Error for FootprintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FootprintError::Patch(err) => Some(err),
            FootprintError::Window(err) => Some(err),
            FootprintError::InvalidWindowSize { .. } => None,
        }
    }
}

impl std::fmt::Display for FootprintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FootprintError::Patch(err) => write!(f, "Footprint patch stage failed: {err}"),
            FootprintError::Window(err) => write!(f, "Footprint window stage failed: {err}"),
            FootprintError::InvalidWindowSize { window_size } => {
                write!(f, "Invalid footprint window_size {window_size}: must be >= 1.")
            }
        }
    }
}

impl From<PatchError> for FootprintError {
    fn from(err: PatchError) -> Self {
        FootprintError::Patch(err)
    }
}

impl From<WindowError> for FootprintError {
    fn from(err: WindowError) -> Self {
        FootprintError::Window(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<FootprintError> for PyErr {
    fn from(err: FootprintError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
