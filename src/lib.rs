//! rust_gridops — patch extraction, rolling windows and root scanning for
//! gridded arrays, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the array routines to Python via the `_rust_gridops` extension module. When
//! the `python-bindings` feature is enabled, this module defines the
//! Python-facing functions and submodules used by the `rust_gridops` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`patches`, `windows`, `root_finding`,
//!   `footprints`) as the public crate surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_gridops` Python extension.
//! - Create and register Python submodules (`patches`, `windows`,
//!   `root_finding`) under `rust_gridops` so that dot-notation imports work as
//!   expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - Integers arriving from Python are signed; negative sizes, overlaps and
//!   axes are rejected with `ValueError` before reaching the core routines.
//!
//! Conventions
//! -----------
//! - Arrays cross the boundary as float64 `numpy.ndarray`s; outputs are newly
//!   allocated arrays owned by Python.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary. Exceptions raised
//!   by a Python callback passed to `root_finding.find_roots` propagate
//!   unchanged.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_gridops` and re-exports its
//!   submodules.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`.

pub mod footprints;
pub mod patches;
pub mod root_finding;
pub mod utils;
pub mod windows;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyAny, PyFloat, PyTuple},
};

#[cfg(feature = "python-bindings")]
use crate::{
    footprints::FootprintOptions,
    patches::{PatchMode, PatchOptions},
    root_finding::GaussianKdeSlope,
    utils::{extract_axes, extract_f64_array_dyn, non_negative},
};

#[cfg(feature = "python-bindings")]
fn patch_options(patch_size: i64, overlap: i64, mode: &str) -> PyResult<PatchOptions> {
    let mode: PatchMode = mode.parse()?;
    Ok(PatchOptions::from_signed(patch_size, overlap, mode)?)
}

/// Overlapping patches of a `(H, W)` or `(H, W, C)` grid.
///
/// Returns `(R, Col, p, p)` or `(R, Col, p, p, C)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "overlapping_patches",
    text_signature = "(grid, /, patch_size=3, overlap=2, mode='2d')",
    signature = (grid, patch_size = 3, overlap = 2, mode = "2d")
)]
fn py_overlapping_patches<'py>(
    py: Python<'py>, grid: &Bound<'py, PyAny>, patch_size: i64, overlap: i64, mode: &str,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let opts = patch_options(patch_size, overlap, mode)?;
    let arr = extract_f64_array_dyn(py, grid)?;
    let out = patches::overlapping_patches(&arr.as_array(), &opts)?;
    Ok(out.into_pyarray(py))
}

/// Mean over the listed axes of a patched array.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "aggregate_mean", signature = (patched, axes = vec![2, 3]))]
fn py_aggregate_mean<'py>(
    py: Python<'py>, patched: &Bound<'py, PyAny>, axes: Vec<i64>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let axes = extract_axes(&axes)?;
    let arr = extract_f64_array_dyn(py, patched)?;
    let out = patches::aggregate_mean(&arr.as_array(), &axes)?;
    Ok(out.into_pyarray(py))
}

/// Patch and average in one call: `(H, W)` → `(R, Col)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "coarsen", signature = (grid, patch_size = 3, overlap = 2, mode = "2d"))]
fn py_coarsen<'py>(
    py: Python<'py>, grid: &Bound<'py, PyAny>, patch_size: i64, overlap: i64, mode: &str,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let opts = patch_options(patch_size, overlap, mode)?;
    let arr = extract_f64_array_dyn(py, grid)?;
    let out = patches::coarsen(&arr.as_array(), &opts)?;
    Ok(out.into_pyarray(py))
}

/// Row-major footprint list: `(R, Col)` → `(R*Col,)`, `(R, Col, C)` → `(R*Col, C)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "flatten_rays")]
fn py_flatten_rays<'py>(
    py: Python<'py>, aggregated: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let arr = extract_f64_array_dyn(py, aggregated)?;
    let out = patches::flatten_rays(&arr.as_array())?;
    Ok(out.into_pyarray(py))
}

/// Coarsen, flatten and group into rolling windows of `window_size` footprints.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "footprint_groups",
    signature = (grid, patch_size = 3, overlap = 2, mode = "2d", window_size = 3)
)]
fn py_footprint_groups<'py>(
    py: Python<'py>, grid: &Bound<'py, PyAny>, patch_size: i64, overlap: i64, mode: &str,
    window_size: i64,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let patch = patch_options(patch_size, overlap, mode)?;
    let opts = FootprintOptions::new(patch, non_negative("window_size", window_size)?)?;
    let arr = extract_f64_array_dyn(py, grid)?;
    let out = footprints::footprint_groups(&arr.as_array(), &opts)?;
    Ok(out.into_pyarray(py))
}

/// Stride-1 windows along axis 0: `(N, ...)` → `(N - k + 1, k, ...)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "rolling_window")]
fn py_rolling_window<'py>(
    py: Python<'py>, seq: &Bound<'py, PyAny>, window_size: i64,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let window_size = non_negative("window_size", window_size)?;
    let arr = extract_f64_array_dyn(py, seq)?;
    let out = windows::rolling_window(&arr.as_array(), window_size)?;
    Ok(out.into_pyarray(py))
}

/// All sign-change roots of `f(x, *args)` on `[a, b]`, in left-to-right
/// discovery order.
///
/// Exceptions raised by `f` abort the scan and propagate unchanged.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "find_roots",
    text_signature = "(a, b, tol, f, /, args=())",
    signature = (a, b, tol, f, args = None)
)]
fn py_find_roots<'py>(
    py: Python<'py>, a: f64, b: f64, tol: f64, f: &Bound<'py, PyAny>,
    args: Option<&Bound<'py, PyTuple>>,
) -> PyResult<Vec<f64>> {
    if !f.is_callable() {
        return Err(PyTypeError::new_err("f must be callable"));
    }
    let extra: Vec<Bound<'py, PyAny>> = args.map(|t| t.iter().collect()).unwrap_or_default();

    let roots = root_finding::find_roots::<_, PyErr>(a, b, tol, |x| {
        let mut call_args = Vec::with_capacity(extra.len() + 1);
        call_args.push(PyFloat::new(py, x).into_any());
        call_args.extend(extra.iter().cloned());
        f.call1(PyTuple::new(py, call_args)?)?.extract::<f64>()
    })?;
    Ok(roots.into_vec())
}

/// Modes and antimodes of a Gaussian KDE over `samples`.
///
/// `bandwidth=None` uses Scott's rule; the scan tolerance is
/// `bandwidth * tol_fraction`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "kde_extrema", signature = (samples, bandwidth = None, tol_fraction = 0.1))]
fn py_kde_extrema<'py>(
    py: Python<'py>, samples: &Bound<'py, PyAny>, bandwidth: Option<f64>, tol_fraction: f64,
) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array_dyn(py, samples)?;
    let data: Vec<f64> = arr.as_array().iter().copied().collect();
    let kde = match bandwidth {
        Some(bw) => GaussianKdeSlope::new(&data, bw)?,
        None => GaussianKdeSlope::with_scott_bandwidth(&data)?,
    };
    Ok(kde.extrema(tol_fraction)?.into_vec())
}

/// _rust_gridops — PyO3 module initializer for the `rust_gridops` Python
/// package.
///
/// Purpose
/// -------
/// Build the `_rust_gridops` extension module and attach the `patches`,
/// `windows` and `root_finding` submodules.
///
/// Key behaviors
/// -------------
/// - Create each submodule and register its functions.
/// - Register the submodules in `sys.modules` as `rust_gridops.<name>` so
///   they are importable via dot notation.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_gridops<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let patches_mod = PyModule::new(_py, "patches")?;
    let windows_mod = PyModule::new(_py, "windows")?;
    let root_finding_mod = PyModule::new(_py, "root_finding")?;
    patches_module(m, &patches_mod)?;
    windows_module(m, &windows_mod)?;
    root_finding_module(m, &root_finding_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    let modules = _py.import("sys")?.getattr("modules")?;
    modules.set_item("rust_gridops.patches", patches_mod)?;
    modules.set_item("rust_gridops.windows", windows_mod)?;
    modules.set_item("rust_gridops.root_finding", root_finding_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn patches_module<'py>(
    rust_gridops: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_overlapping_patches, m)?)?;
    m.add_function(wrap_pyfunction!(py_aggregate_mean, m)?)?;
    m.add_function(wrap_pyfunction!(py_coarsen, m)?)?;
    m.add_function(wrap_pyfunction!(py_flatten_rays, m)?)?;
    m.add_function(wrap_pyfunction!(py_footprint_groups, m)?)?;
    rust_gridops.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn windows_module<'py>(
    rust_gridops: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_rolling_window, m)?)?;
    rust_gridops.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn root_finding_module<'py>(
    rust_gridops: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_find_roots, m)?)?;
    m.add_function(wrap_pyfunction!(py_kde_extrema, m)?)?;
    rust_gridops.add_submodule(m)?;
    Ok(())
}
