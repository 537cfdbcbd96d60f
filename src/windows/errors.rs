//! Errors for rolling-window construction.
//!
//! [`WindowError`] covers invalid window sizes and selection offsets
//! (configuration) and rank-0 inputs that have no leading axis (shape).
//! [`WindowResult<T>`] is the return type of every routine in `windows`.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type WindowResult<T> = Result<T, WindowError>;

/// Failures raised while building or reading a [`WindowBatch`](crate::windows::WindowBatch).
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    // ---- Configuration ----
    /// `window_size` must satisfy `1 <= window_size <= len`.
    InvalidWindowSize { window_size: i64, len: usize },

    /// Offset within a window must satisfy `offset < window_size`.
    InvalidOffset { offset: usize, window_size: usize },

    // ---- Shape ----
    /// A rank-0 array has no leading axis to window over.
    ScalarInput,
}

impl WindowError {
    /// `true` for invalid parameters rather than malformed input arrays.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, WindowError::ScalarInput)
    }
}

impl std::error::Error for WindowError {}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::InvalidWindowSize { window_size, len } => write!(
                f,
                "Invalid window_size {window_size}: must satisfy 1 <= window_size <= {len} (sequence length)."
            ),
            WindowError::InvalidOffset { offset, window_size } => write!(
                f,
                "Invalid window offset {offset}: must be < window_size ({window_size})."
            ),
            WindowError::ScalarInput => {
                write!(f, "Rolling windows require an array of rank >= 1; got a scalar.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<WindowError> for PyErr {
    fn from(err: WindowError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
