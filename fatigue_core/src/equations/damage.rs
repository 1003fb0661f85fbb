//! # Spectral Damage Formulas
//!
//! Palmgren-Miner damage of a stationary Gaussian stress process against a
//! Basquin S-N curve `N·S^m = K`.
//!
//! ## Notation
//!
//! - `T` = exposure duration (s)
//! - `ν0` = zero up-crossing rate (Hz)
//! - `σ_rms` = RMS stress
//! - `ε` = spectral width parameter
//! - `λ(m, ε)` = Wirsching-Light rainflow correction factor
//!
//! ## References
//!
//! - Wirsching, P.H. & Light, M.C., "Fatigue under Wide Band Random Stresses",
//!   J. Struct. Div. ASCE 106 (1980), pp. 1593-1607
//! - Miles, J.W., "On Structural Fatigue Under Random Loading",
//!   J. Aeronautical Sciences 21 (1954)

use std::f64::consts::SQRT_2;

use super::gamma::gamma;

/// Narrow-band (Rayleigh peak) damage.
///
/// # Formula
/// ```text
/// D_NB = (ν0·T / K) · (√2)^m · Γ(1 + m/2) · σ_rms^m
/// ```
///
/// Every stress cycle is assumed to be a zero-crossing with a Rayleigh
/// distributed amplitude, which is conservative for wide-band processes.
///
/// # Arguments
/// * `zero_crossing_rate` - ν0 in Hz
/// * `duration_s` - exposure T in seconds
/// * `m`, `k` - Basquin slope and constant
/// * `rms_stress` - σ_rms
#[inline]
pub fn narrow_band_damage(zero_crossing_rate: f64, duration_s: f64, m: f64, k: f64, rms_stress: f64) -> f64 {
    let cycles_per_k = zero_crossing_rate * duration_s / k;
    cycles_per_k * SQRT_2.powf(m) * gamma(1.0 + m / 2.0) * rms_stress.powf(m)
}

/// Empirical Wirsching-Light coefficients `(a, b)` for slope `m`.
///
/// ```text
/// a(m) = 0.926 − 0.033·m
/// b(m) = 1.587·m − 2.323
/// ```
#[inline]
pub fn wirsching_coefficients(m: f64) -> (f64, f64) {
    let a = 0.926 - 0.033 * m;
    let b = 1.587 * m - 2.323;
    (a, b)
}

/// Rainflow correction factor `λ = a + (1 − a)·(1 − ε)^b`.
///
/// Bounded between `a` (ε = 1, white-noise-like) and 1 (ε = 0, narrow band).
///
/// ```rust
/// use fatigue_core::equations::{wirsching_coefficients, wirsching_factor};
///
/// assert!((wirsching_factor(3.0, 0.0) - 1.0).abs() < 1e-12);
/// let (a, _) = wirsching_coefficients(3.0);
/// assert!((wirsching_factor(3.0, 1.0) - a).abs() < 1e-12);
/// ```
#[inline]
pub fn wirsching_factor(m: f64, spectral_width: f64) -> f64 {
    let (a, b) = wirsching_coefficients(m);
    a + (1.0 - a) * (1.0 - spectral_width).powf(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-10 * a.abs().max(b.abs())
    }

    #[test]
    fn test_coefficients_for_steel_slope() {
        let (a, b) = wirsching_coefficients(3.0);
        assert!(approx_eq(a, 0.827));
        assert!(approx_eq(b, 2.438));
    }

    #[test]
    fn test_factor_limits() {
        for m in [3.0, 4.0, 6.4, 10.0] {
            let (a, _) = wirsching_coefficients(m);
            // Narrow band: no correction
            assert!(approx_eq(wirsching_factor(m, 0.0), 1.0));
            // Fully wide band: factor collapses to a(m)
            assert!(approx_eq(wirsching_factor(m, 1.0), a), "m = {}", m);
        }
    }

    #[test]
    fn test_factor_is_bounded_and_monotone() {
        let m = 5.0;
        let (a, _) = wirsching_coefficients(m);
        let mut previous = wirsching_factor(m, 0.0);
        for step in 1..=20 {
            let eps = step as f64 / 20.0;
            let lambda = wirsching_factor(m, eps);
            assert!(lambda.is_finite());
            assert!(lambda <= previous + 1e-15, "λ rose at ε = {}", eps);
            assert!(lambda >= a - 1e-15);
            previous = lambda;
        }
    }

    #[test]
    fn test_narrow_band_damage_m3() {
        // ν0 = 10 Hz, T = 100 s, K = 1e12, σ = 10, m = 3
        // D = (1000/1e12)·2√2·Γ(2.5)·1000
        let expected = 1e-9 * 2.0 * SQRT_2 * 1.329_340_388_179_137 * 1000.0;
        let d = narrow_band_damage(10.0, 100.0, 3.0, 1e12, 10.0);
        assert!(approx_eq(d, expected), "D = {} (expected {})", d, expected);
    }

    #[test]
    fn test_narrow_band_damage_linear_in_time() {
        let d1 = narrow_band_damage(12.0, 3600.0, 6.4, 1e20, 25.0);
        let d2 = narrow_band_damage(12.0, 7200.0, 6.4, 1e20, 25.0);
        assert!(approx_eq(d2, 2.0 * d1));
        assert_eq!(narrow_band_damage(12.0, 0.0, 6.4, 1e20, 25.0), 0.0);
    }

    #[test]
    fn test_narrow_band_damage_increases_with_slope() {
        // σ_rms > 1 with K and T fixed
        let mut previous = 0.0;
        for step in 0..30 {
            let m = 2.0 + step as f64 * 0.5;
            let d = narrow_band_damage(8.0, 3600.0, m, 1e15, 4.0);
            assert!(d > previous, "D_NB not increasing at m = {}", m);
            previous = d;
        }
    }
}
