//! root_finding::scan — fixed-granularity sign-change scan.
//!
//! Purpose
//! -------
//! Locate approximate roots of a scalar function on `[a, b]` by halving the
//! interval until every piece has length `<= tol` and reporting the
//! midpoint of each leaf whose endpoint values have strictly opposite
//! signs.
//!
//! Key behaviors
//! -------------
//! - Subdivide while `(hi - lo) > tol`; at a leaf evaluate `f(lo)` and
//!   `f(hi)` and report `(hi + lo) / 2` iff `f(lo) * f(hi) < 0`.
//! - Traverse an explicit LIFO work-list, pushing the right half before the
//!   left so leaves are visited left to right. Results come out in
//!   discovery order and are never sorted or de-duplicated.
//! - Stop at the first error returned by `f` and hand it back unchanged.
//!
//! Invariants & assumptions
//! ------------------------
//! - `tol > 0`, `a <= b`, both bounds finite.
//! - This is a scan, not an adaptive solver: a root is reported only when
//!   the endpoints of its leaf straddle it. A zero landing exactly on a
//!   leaf boundary gives `f * f == 0` on both neighbours and is missed;
//!   a function whose sign flips without crossing zero inside a leaf (a
//!   pole) is reported like a root.
//! - Interior leaf boundaries are evaluated by both adjacent leaves.
//!
//! Performance
//! -----------
//! - Work-list length is bounded by the halving depth
//!   `⌈log2((b - a) / tol)⌉ + 1`; call-stack use is constant.
//! - `f` is called twice per leaf, about `2 · (b - a) / tol` times total.
use crate::root_finding::errors::{RootError, RootResult};

/// Validated scan granularity.
///
/// Invariant: `tol > 0` and not NaN. `tol = +∞` is accepted and yields a
/// single leaf over the whole interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanOptions {
    pub tol: f64,
}

impl ScanOptions {
    /// # Errors
    /// - [`RootError::InvalidTolerance`] if `tol <= 0` or `tol` is NaN.
    pub fn new(tol: f64) -> RootResult<Self> {
        if tol.is_nan() || tol <= 0.0 {
            return Err(RootError::InvalidTolerance { tol });
        }
        Ok(Self { tol })
    }

    /// Scan `[a, b]` with this tolerance; see [`find_roots`].
    pub fn scan<F, E>(&self, a: f64, b: f64, f: F) -> Result<RootSet, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<RootError>,
    {
        find_roots(a, b, self.tol, f)
    }
}

/// Ordered approximate roots in left-to-right discovery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootSet(Vec<f64>);

impl RootSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl IntoIterator for RootSet {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RootSet {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<RootSet> for Vec<f64> {
    fn from(roots: RootSet) -> Self {
        roots.0
    }
}

/// Scan `[a, b]` for sign changes of a fallible function.
///
/// Parameters
/// ----------
/// - `a`, `b`: `f64`
///   Finite interval bounds with `a <= b`. `a == b` is one leaf of length 0
///   and never yields a root.
/// - `tol`: `f64`
///   Leaf length threshold; subdivision continues while `(hi - lo) > tol`.
/// - `f`: `FnMut(f64) -> Result<f64, E>`
///   Function to scan. Captured state plays the role of extra arguments;
///   see [`find_roots_with_args`] for an explicit-argument form.
///
/// Returns
/// -------
/// `Result<RootSet, E>`
///   Leaf midpoints with `f(lo) · f(hi) < 0`, in left-to-right order.
///
/// Errors
/// ------
/// - `RootError::InvalidTolerance`, `RootError::InvalidInterval`,
///   `RootError::NonFiniteBound`, converted into `E`.
/// - `RootError::ToleranceBelowResolution` (as `E`) if halving stalls in
///   `f64` before reaching `tol`.
/// - `RootError::MidpointOverflow` (as `E`) if `hi + lo` overflows `f64`
///   for some interval, e.g. `[1e308, 1.7e308]`.
/// - Any `E` returned by `f`, unchanged; the scan stops at that point.
///
/// Examples
/// --------
/// ```rust
/// # use rust_gridops::root_finding::{RootError, find_roots};
/// let roots = find_roots(-10.0, 10.0037, 0.01, |x| Ok::<_, RootError>((x + 5.0) * (x - 5.0)))?;
/// assert_eq!(roots.len(), 2);
/// assert!((roots.as_slice()[0] + 5.0).abs() < 0.01);
/// assert!((roots.as_slice()[1] - 5.0).abs() < 0.01);
/// # Ok::<(), RootError>(())
/// ```
pub fn find_roots<F, E>(a: f64, b: f64, tol: f64, mut f: F) -> Result<RootSet, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<RootError>,
{
    let opts = ScanOptions::new(tol)?;
    validate_interval(a, b)?;
    log::debug!("find_roots: scanning [{a}, {b}] with tol = {}", opts.tol);

    let mut roots = Vec::new();
    let mut pending = vec![(a, b)];
    while let Some((lo, hi)) = pending.pop() {
        let mid = (hi + lo) / 2.0;
        if !mid.is_finite() {
            return Err(RootError::MidpointOverflow { lo, hi }.into());
        }
        if hi - lo > opts.tol {
            if mid <= lo || mid >= hi {
                return Err(RootError::ToleranceBelowResolution { tol: opts.tol, lo, hi }.into());
            }
            // Right half first so the left half is popped next.
            pending.push((mid, hi));
            pending.push((lo, mid));
        } else {
            let f_lo = f(lo)?;
            let f_hi = f(hi)?;
            if f_lo * f_hi < 0.0 {
                log::trace!("find_roots: sign change on [{lo}, {hi}], reporting {mid}");
                roots.push(mid);
            }
        }
    }

    log::debug!("find_roots: {} root(s) on [{a}, {b}]", roots.len());
    Ok(RootSet(roots))
}

/// [`find_roots`] with an explicit argument bundle passed to every call,
/// `f(x, args)`.
///
/// # Errors
/// As for [`find_roots`].
pub fn find_roots_with_args<T, F, E>(
    a: f64, b: f64, tol: f64, mut f: F, args: &T,
) -> Result<RootSet, E>
where
    T: ?Sized,
    F: FnMut(f64, &T) -> Result<f64, E>,
    E: From<RootError>,
{
    find_roots(a, b, tol, |x| f(x, args))
}

/// [`find_roots`] for infallible functions.
///
/// # Errors
/// Only the validation errors of [`find_roots`].
pub fn scan_roots<F>(a: f64, b: f64, tol: f64, f: F) -> RootResult<RootSet>
where
    F: Fn(f64) -> f64,
{
    find_roots(a, b, tol, |x| Ok::<f64, RootError>(f(x)))
}

/// [`find_roots`] for callbacks returning `anyhow::Result`.
///
/// # Errors
/// - Validation errors of [`find_roots`].
/// - [`RootError::Evaluation`] carrying the message of the first error
///   returned by `f`.
pub fn try_scan_roots<F>(a: f64, b: f64, tol: f64, mut f: F) -> RootResult<RootSet>
where
    F: FnMut(f64) -> anyhow::Result<f64>,
{
    find_roots(a, b, tol, |x| f(x).map_err(RootError::from))
}

fn validate_interval(a: f64, b: f64) -> RootResult<()> {
    if !a.is_finite() || !b.is_finite() {
        return Err(RootError::NonFiniteBound { a, b });
    }
    if a > b {
        return Err(RootError::InvalidInterval { a, b });
    }
    Ok(())
}
