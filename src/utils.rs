//! Shared conversion helpers for the Python bindings.

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Array → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArrayDyn,
};

/// Accept a float64 `numpy.ndarray` of any rank, or anything exposing
/// `to_numpy()`, or a flat sequence of floats.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array_dyn<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArrayDyn<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArrayDyn<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(arr_ro) = obj.extract::<PyReadonlyArrayDyn<f64>>() {
            return Ok(arr_ro);
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a float64 numpy.ndarray or a sequence of float64")
    })?;
    Ok(Array1::from(vec).into_dyn().into_pyarray(py).readonly())
}

/// Convert a non-negative Python integer to `usize`.
#[cfg(feature = "python-bindings")]
pub fn non_negative(name: &str, value: i64) -> PyResult<usize> {
    usize::try_from(value)
        .map_err(|_| PyValueError::new_err(format!("{name} must be >= 0; got {value}")))
}

/// Convert a list of reduction axes, rejecting negative indices.
#[cfg(feature = "python-bindings")]
pub fn extract_axes(axes: &[i64]) -> PyResult<Vec<usize>> {
    axes.iter().map(|&axis| non_negative("axis", axis)).collect()
}
