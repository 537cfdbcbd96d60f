//! root_finding::density — slope of a 1-D Gaussian KDE and its extrema.
//!
//! Purpose
//! -------
//! Provide the scalar function the sign-change scan is usually pointed at:
//! the first derivative of a Gaussian kernel density estimate. Its roots
//! are the estimate's modes and antimodes.
//!
//! Key behaviors
//! -------------
//! - [`GaussianKdeSlope::value`] evaluates
//!   `f'(x) = -(1 / (√(2π) · N · s³)) · Σᵢ (x - μᵢ) · exp(-(x - μᵢ)² / (2s²))`.
//! - [`GaussianKdeSlope::extrema`] scans `[min μ, max μ]` with
//!   `tol = s · tol_fraction`.
//! - [`scott_bandwidth`] gives the rule-of-thumb `σ · N^(-1/5)` using the
//!   population standard deviation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Samples are non-empty and finite; bandwidth is finite and `> 0`.
//! - The slope is positive left of a mode and negative right of it, so a
//!   mode is a `+ → -` sign change and an antimode a `- → +` one.
use crate::root_finding::{
    errors::{RootError, RootResult},
    scan::{RootSet, find_roots_with_args},
};
use statrs::statistics::Statistics;
use std::f64::consts::PI;

/// First derivative of a Gaussian KDE over `samples` with bandwidth `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKdeSlope {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKdeSlope {
    /// # Errors
    /// - [`RootError::EmptySamples`] if `samples` is empty.
    /// - [`RootError::NonFiniteSample`] for the first NaN/±inf sample.
    /// - [`RootError::InvalidBandwidth`] if `bandwidth` is not finite and `> 0`.
    pub fn new(samples: &[f64], bandwidth: f64) -> RootResult<Self> {
        validate_samples(samples)?;
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(RootError::InvalidBandwidth { bandwidth });
        }
        Ok(Self { samples: samples.to_vec(), bandwidth })
    }

    /// Build with [`scott_bandwidth`].
    pub fn with_scott_bandwidth(samples: &[f64]) -> RootResult<Self> {
        let bandwidth = scott_bandwidth(samples)?;
        Self::new(samples, bandwidth)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// KDE slope at `x`.
    pub fn value(&self, x: f64) -> f64 {
        let s = self.bandwidth;
        let n = self.samples.len() as f64;
        let fact = -1.0 / ((2.0 * PI).sqrt() * n * s.powi(3));
        let two_s2 = 2.0 * s * s;
        fact * self
            .samples
            .iter()
            .map(|&mu| {
                let d = x - mu;
                (-(d * d) / two_s2).exp() * d
            })
            .sum::<f64>()
    }

    /// KDE height at `x`, for evaluating the estimate at reported extrema.
    pub fn density(&self, x: f64) -> f64 {
        let s = self.bandwidth;
        let n = self.samples.len() as f64;
        let norm = 1.0 / ((2.0 * PI).sqrt() * n * s);
        let two_s2 = 2.0 * s * s;
        norm * self
            .samples
            .iter()
            .map(|&mu| {
                let d = x - mu;
                (-(d * d) / two_s2).exp()
            })
            .sum::<f64>()
    }

    /// Critical points of the KDE on `[min μ, max μ]`, scanned with
    /// `tol = bandwidth · tol_fraction`.
    ///
    /// # Errors
    /// - [`RootError::InvalidTolerance`] if `tol_fraction` is not `> 0`.
    /// - Other scan validation errors of
    ///   [`find_roots`](crate::root_finding::find_roots).
    pub fn extrema(&self, tol_fraction: f64) -> RootResult<RootSet> {
        let lo = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tol = self.bandwidth * tol_fraction;
        log::debug!(
            "GaussianKdeSlope::extrema: n = {}, bandwidth = {}, range [{lo}, {hi}]",
            self.samples.len(),
            self.bandwidth
        );
        find_roots_with_args(lo, hi, tol, |x, kde: &Self| Ok(kde.value(x)), self)
    }
}

/// Scott's rule bandwidth `σ · N^(-1/5)` with population `σ`.
///
/// # Errors
/// - [`RootError::EmptySamples`] / [`RootError::NonFiniteSample`] for bad
///   input.
/// - [`RootError::InvalidBandwidth`] if all samples are equal (`σ = 0`).
pub fn scott_bandwidth(samples: &[f64]) -> RootResult<f64> {
    validate_samples(samples)?;
    let sigma = samples.iter().population_std_dev();
    let bandwidth = sigma * (samples.len() as f64).powf(-0.2);
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Err(RootError::InvalidBandwidth { bandwidth });
    }
    Ok(bandwidth)
}

fn validate_samples(samples: &[f64]) -> RootResult<()> {
    if samples.is_empty() {
        return Err(RootError::EmptySamples);
    }
    for (index, &value) in samples.iter().enumerate() {
        if !value.is_finite() {
            return Err(RootError::NonFiniteSample { index, value });
        }
    }
    Ok(())
}
