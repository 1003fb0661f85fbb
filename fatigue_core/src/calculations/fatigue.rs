//! # Spectral Fatigue Damage
//!
//! Frequency-domain fatigue of a structure under stationary Gaussian random
//! stress, using the narrow-band (Miles) damage with the Wirsching-Light
//! wide-band correction.
//!
//! ## Assumptions
//!
//! - One-sided stress PSD, stationary and Gaussian
//! - Zero mean stress (no mean-stress correction)
//! - Single-slope Basquin S-N curve `N · S^m = K`, no endurance cut-off
//! - Linear (Palmgren-Miner) damage accumulation over the exposure time
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::calculations::fatigue::{calculate_fatigue, Life};
//! use fatigue_core::loads::SpectrumSample;
//! use fatigue_core::materials::SnCurveParams;
//!
//! let spectrum = vec![
//!     SpectrumSample::new(0.0, 0.0),
//!     SpectrumSample::new(10.0, 100.0),
//!     SpectrumSample::new(20.0, 0.0),
//! ];
//! let sn = SnCurveParams::new(3.0, 1.0e12);
//!
//! let result = calculate_fatigue(&spectrum, &sn, 3600.0).unwrap();
//!
//! assert_eq!(result.moments.m0, 1000.0);
//! assert!(result.wirsching_damage > 0.0);
//! assert!(matches!(result.wirsching_life, Life::Finite(_)));
//! println!("Life: {}", result.wirsching_life);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::equations::{
    irregularity_factor,
    narrow_band_damage,
    peak_rate,
    rms_stress,
    spectral_width,
    wirsching_factor,
    zero_crossing_rate,
    Equation,
    EquationTracker,
    EquationUsage,
    SpectralMoments,
};
use crate::errors::{CalcError, CalcResult};
use crate::loads::SpectrumSample;
use crate::materials::{SnCurveParams, SnCurveSource};
use crate::units::{format_life_seconds, ExposureTime};

// ============================================================================
// Life
// ============================================================================

/// Predicted time to failure.
///
/// `Infinite` stands in for zero damage; a raw `inf` never leaves the
/// calculator.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "Finite", "seconds": 86400.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "seconds")]
pub enum Life {
    Finite(f64),
    Infinite,
}

impl Life {
    /// `T / D`, or `Infinite` when the damage is zero or the quotient overflows.
    pub fn from_damage(duration_s: f64, damage: f64) -> Self {
        if damage <= 0.0 {
            return Life::Infinite;
        }
        let life = duration_s / damage;
        if life.is_finite() {
            Life::Finite(life)
        } else {
            Life::Infinite
        }
    }

    /// Seconds to failure, `None` when infinite
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Life::Finite(s) => Some(*s),
            Life::Infinite => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Life::Infinite)
    }
}

impl fmt::Display for Life {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Life::Finite(s) => write!(f, "{}", format_life_seconds(*s)),
            Life::Infinite => write!(f, "Infinite"),
        }
    }
}

// ============================================================================
// Core Calculation
// ============================================================================

/// Statistics, damage and life of one spectral fatigue evaluation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "moments": { "m0": 1000.0, "m1": 10000.0, "m2": 100000.0, "m3": 1000000.0, "m4": 10000000.0 },
///   "rms_stress": 31.62,
///   "zero_crossing_rate": 1.59,
///   "peak_rate": 1.59,
///   "irregularity_factor": 1.0,
///   "spectral_width": 0.0,
///   "wirsching_factor": 1.0,
///   "duration_s": 3600.0,
///   "narrow_band_damage": 0.000000868,
///   "wirsching_damage": 0.000000868,
///   "narrow_band_life": { "kind": "Finite", "seconds": 4147000000.0 },
///   "wirsching_life": { "kind": "Finite", "seconds": 4147000000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueResult {
    /// Spectral moments m0..m4
    pub moments: SpectralMoments,
    /// σ_rms = √m0
    pub rms_stress: f64,
    /// ν0 (Hz)
    pub zero_crossing_rate: f64,
    /// E[P] (Hz)
    pub peak_rate: f64,
    /// γ = ν0 / E[P]
    pub irregularity_factor: f64,
    /// ε = √(1 − γ²)
    pub spectral_width: f64,
    /// λ, the Wirsching-Light correction applied to the narrow-band damage
    pub wirsching_factor: f64,
    /// Exposure duration T (s)
    pub duration_s: f64,
    pub narrow_band_damage: f64,
    pub wirsching_damage: f64,
    pub narrow_band_life: Life,
    pub wirsching_life: Life,
}

impl FatigueResult {
    /// Damage exceeds 1 within the exposure
    pub fn fails_within_exposure(&self) -> bool {
        self.wirsching_damage >= 1.0
    }
}

/// Run a spectral fatigue evaluation.
///
/// # Errors
///
/// - `InvalidInput` when the S-N parameters or the duration are unusable
/// - `InvalidSpectralData` when `m0`, `m2` or `m4` is not positive and finite
pub fn calculate_fatigue(
    samples: &[SpectrumSample],
    sn: &SnCurveParams,
    duration_s: f64,
) -> CalcResult<FatigueResult> {
    calculate_fatigue_tracked(samples, sn, duration_s, &mut EquationTracker::new())
}

/// [`calculate_fatigue`], recording every equation used.
pub fn calculate_fatigue_tracked(
    samples: &[SpectrumSample],
    sn: &SnCurveParams,
    duration_s: f64,
    tracker: &mut EquationTracker,
) -> CalcResult<FatigueResult> {
    sn.validate()?;
    if !duration_s.is_finite() || duration_s < 0.0 {
        return Err(CalcError::invalid_input(
            "duration_s",
            duration_s.to_string(),
            "Duration must be finite and non-negative",
        ));
    }

    let moments = SpectralMoments::from_samples(samples);
    tracker.record(Equation::SpectralMoment, "m0..m4");

    for (name, value) in [("m0", moments.m0), ("m2", moments.m2), ("m4", moments.m4)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::invalid_spectral_data(format!(
                "{} = {} (empty, all-zero or non-finite spectrum?)",
                name, value
            )));
        }
    }

    let sigma = rms_stress(moments.m0);
    tracker.record(Equation::RmsStress, "σ_rms");

    let nu0 = zero_crossing_rate(moments.m0, moments.m2);
    tracker.record(Equation::ZeroCrossingRate, "ν0");
    let ep = peak_rate(moments.m2, moments.m4);
    tracker.record(Equation::PeakRate, "E[P]");

    let gamma = irregularity_factor(nu0, ep);
    tracker.record(Equation::IrregularityFactor, "γ");
    let eps = spectral_width(gamma);
    tracker.record(Equation::SpectralWidth, "ε");

    let d_nb = narrow_band_damage(nu0, duration_s, sn.m, sn.k, sigma);
    tracker.record(Equation::NarrowBandDamage, "D_NB");
    tracker.record(Equation::LanczosGamma, format!("Γ(1 + {}/2)", sn.m));

    let lambda = wirsching_factor(sn.m, eps);
    let d_w = lambda * d_nb;
    tracker.record(Equation::WirschingCorrection, "λ");

    let narrow_band_life = Life::from_damage(duration_s, d_nb);
    let wirsching_life = Life::from_damage(duration_s, d_w);
    tracker.record(Equation::FatigueLife, "T / D");

    debug!(
        rms_stress = sigma,
        nu0,
        peak_rate = ep,
        gamma,
        epsilon = eps,
        lambda,
        d_nb,
        d_w,
        "spectral fatigue evaluated"
    );

    Ok(FatigueResult {
        moments,
        rms_stress: sigma,
        zero_crossing_rate: nu0,
        peak_rate: ep,
        irregularity_factor: gamma,
        spectral_width: eps,
        wirsching_factor: lambda,
        duration_s,
        narrow_band_damage: d_nb,
        wirsching_damage: d_w,
        narrow_band_life,
        wirsching_life,
    })
}

// ============================================================================
// Input / Result Pair
// ============================================================================

/// A complete, storable fatigue case.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Bracket weld toe",
///   "spectrum": [
///     { "frequency": 5.0, "psd": 0.0 },
///     { "frequency": 50.0, "psd": 12.0 },
///     { "frequency": 500.0, "psd": 0.0 }
///   ],
///   "sn_curve": { "method": "material", "ultimate_strength": 460.0 },
///   "exposure": { "value": 2.0, "unit": "hours" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueInput {
    /// User label (e.g., "Bracket weld toe")
    pub label: String,
    /// One-sided stress PSD
    pub spectrum: Vec<SpectrumSample>,
    pub sn_curve: SnCurveSource,
    #[serde(default)]
    pub exposure: ExposureTime,
}

impl FatigueInput {
    pub fn new(label: impl Into<String>, spectrum: Vec<SpectrumSample>, sn_curve: SnCurveSource) -> Self {
        FatigueInput {
            label: label.into(),
            spectrum,
            sn_curve,
            exposure: ExposureTime::default(),
        }
    }

    pub fn with_exposure(mut self, exposure: ExposureTime) -> Self {
        self.exposure = exposure;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let seconds = self.exposure.seconds();
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(CalcError::invalid_input(
                "exposure",
                self.exposure.to_string(),
                "Exposure must be finite and non-negative",
            ));
        }
        if let Some((i, s)) = self
            .spectrum
            .iter()
            .enumerate()
            .find(|(_, s)| !s.frequency.is_finite() || s.frequency < 0.0)
        {
            return Err(CalcError::invalid_input(
                format!("spectrum[{}].frequency", i),
                s.frequency.to_string(),
                "Frequency must be finite and non-negative",
            ));
        }
        if let Some((i, s)) = self
            .spectrum
            .iter()
            .enumerate()
            .find(|(_, s)| !s.psd.is_finite() || s.psd < 0.0)
        {
            return Err(CalcError::invalid_input(
                format!("spectrum[{}].psd", i),
                s.psd.to_string(),
                "PSD must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Result of [`calculate`] for one stored case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueCaseResult {
    pub label: String,
    /// Resolved Basquin parameters
    pub sn_curve: SnCurveParams,
    /// How the S-N curve was obtained
    pub sn_method: String,
    pub exposure: ExposureTime,
    pub result: FatigueResult,
    /// Equations used, in evaluation order
    pub equations: Vec<EquationUsage>,
}

/// Evaluate a stored fatigue case.
pub fn calculate(input: &FatigueInput) -> CalcResult<FatigueCaseResult> {
    input.validate()?;

    let mut tracker = EquationTracker::new();
    let sn = input.sn_curve.resolve_tracked(&mut tracker)?;
    let result = calculate_fatigue_tracked(&input.spectrum, &sn, input.exposure.seconds(), &mut tracker)?;

    debug!(label = %input.label, life = %result.wirsching_life, "fatigue case evaluated");

    Ok(FatigueCaseResult {
        label: input.label.clone(),
        sn_curve: sn,
        sn_method: input.sn_curve.method_name().to_string(),
        exposure: input.exposure,
        result,
        equations: tracker.into_usages(),
    })
}
