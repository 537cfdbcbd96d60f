//! Error handling for sign-change root scanning and the KDE slope helper.
//!
//! [`RootError`] groups scan configuration failures (tolerance, interval),
//! KDE input failures (samples, bandwidth), and a catch-all for evaluation
//! errors that arrive as `anyhow::Error` (produced by
//! [`try_scan_roots`](crate::root_finding::try_scan_roots)). [`RootResult<T>`] standardizes the
//! return type across `root_finding`.
//!
//! Errors raised by a caller-supplied function are *not* wrapped here:
//! [`find_roots`](crate::root_finding::find_roots) is generic over the
//! caller's error type and only converts its own validation failures into
//! it.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type RootResult<T> = Result<T, RootError>;

/// Unified error type for root scanning.
#[derive(Debug, Clone, PartialEq)]
pub enum RootError {
    // ---- Scan configuration ----
    /// `tol` must be strictly positive (NaN rejected).
    InvalidTolerance { tol: f64 },

    /// Interval bounds must satisfy `a <= b`.
    InvalidInterval { a: f64, b: f64 },

    /// Interval bounds must be finite.
    NonFiniteBound { a: f64, b: f64 },

    /// Halving `[lo, hi]` no longer shrinks it in `f64`, yet its length is
    /// still above `tol`.
    ToleranceBelowResolution { tol: f64, lo: f64, hi: f64 },

    /// `hi + lo` overflows `f64`, so the midpoint of `[lo, hi]` is not finite.
    MidpointOverflow { lo: f64, hi: f64 },

    // ---- KDE inputs ----
    /// No samples were supplied.
    EmptySamples,

    /// A sample is NaN/±inf.
    NonFiniteSample { index: usize, value: f64 },

    /// Bandwidth must be finite and > 0.
    InvalidBandwidth { bandwidth: f64 },

    // ---- Anyhow catchall ----
    Evaluation(String),
}

impl RootError {
    /// `true` for invalid scan parameters (`tol`, `a`, `b`).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RootError::InvalidTolerance { .. }
                | RootError::InvalidInterval { .. }
                | RootError::NonFiniteBound { .. }
                | RootError::ToleranceBelowResolution { .. }
                | RootError::MidpointOverflow { .. }
                | RootError::InvalidBandwidth { .. }
        )
    }
}

impl From<anyhow::Error> for RootError {
    fn from(err: anyhow::Error) -> Self {
        RootError::Evaluation(err.to_string())
    }
}

impl std::error::Error for RootError {}

impl std::fmt::Display for RootError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Scan configuration ----
            RootError::InvalidTolerance { tol } => {
                write!(f, "Root Error: tolerance must be > 0; got {tol}")
            }
            RootError::InvalidInterval { a, b } => {
                write!(f, "Root Error: interval must satisfy a <= b; got a = {a}, b = {b}")
            }
            RootError::NonFiniteBound { a, b } => {
                write!(f, "Root Error: interval bounds must be finite; got a = {a}, b = {b}")
            }
            RootError::ToleranceBelowResolution { tol, lo, hi } => write!(
                f,
                "Root Error: tolerance {tol} is finer than f64 resolution on [{lo}, {hi}]"
            ),
            RootError::MidpointOverflow { lo, hi } => {
                write!(f, "Root Error: midpoint of [{lo}, {hi}] overflows f64")
            }

            // ---- KDE inputs ----
            RootError::EmptySamples => write!(f, "Root Error: sample set is empty"),
            RootError::NonFiniteSample { index, value } => {
                write!(f, "Root Error: sample at index {index} is non-finite: {value}")
            }
            RootError::InvalidBandwidth { bandwidth } => {
                write!(f, "Root Error: bandwidth must be finite and > 0; got {bandwidth}")
            }

            // ---- Anyhow catchall ----
            RootError::Evaluation(msg) => write!(f, "Root Error: {msg}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<RootError> for PyErr {
    fn from(err: RootError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
