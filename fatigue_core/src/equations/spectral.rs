//! # Spectral Moments and Statistics
//!
//! Statistics of a stationary Gaussian stress process derived from its
//! one-sided PSD `G(f)`.
//!
//! ## Notation
//!
//! - `mₙ = ∫ fⁿ·G(f) df` = n-th spectral moment
//! - `σ_rms = √m0` = RMS stress
//! - `ν0` = expected rate of zero up-crossings (Hz)
//! - `E[P]` = expected rate of peaks (Hz)
//! - `γ = ν0 / E[P]` = irregularity factor (1 = narrow band)
//! - `ε = √(1 − γ²)` = spectral width parameter (0 = narrow band)
//!
//! ## References
//!
//! - Bendat, J.S., "Probability Functions for Random Responses", NASA CR-33 (1964)
//! - Rice, S.O., "Mathematical Analysis of Random Noise" (1944)

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::loads::SpectrumSample;

/// Number of moments the damage calculation needs (m0 through m4)
pub const MOMENT_COUNT: usize = 5;

// =============================================================================
// MOMENT INTEGRATION
// =============================================================================

/// Calculate the n-th spectral moment with the composite trapezoidal rule.
///
/// ```text
/// mₙ ≈ Σ ½·(fᵢⁿ·Gᵢ + fᵢ₊₁ⁿ·Gᵢ₊₁)·(fᵢ₊₁ − fᵢ)
/// ```
///
/// The samples are sorted by frequency on a private copy first; the caller's
/// slice is left untouched. Fewer than two samples integrate to 0.
///
/// ```rust
/// use fatigue_core::equations::calculate_moment;
/// use fatigue_core::loads::SpectrumSample;
///
/// let psd = vec![
///     SpectrumSample::new(20.0, 0.0),
///     SpectrumSample::new(0.0, 0.0),
///     SpectrumSample::new(10.0, 100.0),
/// ];
/// assert_eq!(calculate_moment(&psd, 0), 1000.0);
/// ```
pub fn calculate_moment(samples: &[SpectrumSample], n: u32) -> f64 {
    integrate_sorted(&sorted_by_frequency(samples), n)
}

/// Copy of `samples` in ascending frequency order.
fn sorted_by_frequency(samples: &[SpectrumSample]) -> Vec<SpectrumSample> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    sorted
}

/// Trapezoid sum over an already sorted spectrum.
fn integrate_sorted(sorted: &[SpectrumSample], n: u32) -> f64 {
    let weight = |f: f64| match i32::try_from(n) {
        Ok(exponent) => f.powi(exponent),
        Err(_) => f.powf(f64::from(n)),
    };
    sorted
        .windows(2)
        .map(|pair| {
            let (lo, hi) = (&pair[0], &pair[1]);
            let y1 = weight(lo.frequency) * lo.psd;
            let y2 = weight(hi.frequency) * hi.psd;
            0.5 * (y1 + y2) * (hi.frequency - lo.frequency)
        })
        .sum()
}

/// Spectral moments m0 through m4 of a PSD.
///
/// ## JSON Example
///
/// ```json
/// { "m0": 1000.0, "m1": 10000.0, "m2": 100000.0, "m3": 1000000.0, "m4": 10000000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpectralMoments {
    /// Variance of the stress process (stress²)
    pub m0: f64,
    pub m1: f64,
    /// Drives the zero-crossing rate
    pub m2: f64,
    pub m3: f64,
    /// Drives the peak rate
    pub m4: f64,
}

impl SpectralMoments {
    /// Compute m0..m4 from a spectrum, sorting it only once.
    pub fn from_samples(samples: &[SpectrumSample]) -> Self {
        let sorted = sorted_by_frequency(samples);
        SpectralMoments {
            m0: integrate_sorted(&sorted, 0),
            m1: integrate_sorted(&sorted, 1),
            m2: integrate_sorted(&sorted, 2),
            m3: integrate_sorted(&sorted, 3),
            m4: integrate_sorted(&sorted, 4),
        }
    }

    /// Moments as an array indexed by order
    pub fn as_array(&self) -> [f64; MOMENT_COUNT] {
        [self.m0, self.m1, self.m2, self.m3, self.m4]
    }

    /// Moment of order `n`, if it is one of the five tracked here
    pub fn get(&self, n: usize) -> Option<f64> {
        self.as_array().get(n).copied()
    }
}

// =============================================================================
// PROCESS STATISTICS
// =============================================================================

/// RMS stress σ_rms = √m0
#[inline]
pub fn rms_stress(m0: f64) -> f64 {
    m0.sqrt()
}

/// Expected zero up-crossing rate ν0 = (1/2π)·√(m2/m0)
#[inline]
pub fn zero_crossing_rate(m0: f64, m2: f64) -> f64 {
    (m2 / m0).sqrt() / (2.0 * PI)
}

/// Expected peak rate E[P] = (1/2π)·√(m4/m2)
#[inline]
pub fn peak_rate(m2: f64, m4: f64) -> f64 {
    (m4 / m2).sqrt() / (2.0 * PI)
}

/// Irregularity factor γ = ν0 / E[P], equivalently m2 / √(m0·m4)
#[inline]
pub fn irregularity_factor(zero_crossing_rate: f64, peak_rate: f64) -> f64 {
    zero_crossing_rate / peak_rate
}

/// Spectral width ε = √(1 − γ²).
///
/// The trapezoid moments can push γ a hair above 1 for very narrow
/// spectra; the radicand is floored at 0 so ε stays real.
#[inline]
pub fn spectral_width(irregularity_factor: f64) -> f64 {
    (1.0 - irregularity_factor * irregularity_factor).max(0.0).sqrt()
}
