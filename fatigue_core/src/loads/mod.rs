//! Random vibration loading
//!
//! The load on a structure in a spectral fatigue analysis is a one-sided
//! stress PSD, sampled as `(frequency, psd)` pairs.
//!
//! # Overview
//!
//! - [`SpectrumSample`] - One `(frequency, psd)` point
//! - [`parse_psd_text`] - Ingest a delimited text export, clamping negative PSD values
//! - [`PsdImport`] - Parsed samples plus data-quality counters
//!
//! # Example
//!
//! ```
//! use fatigue_core::loads::{SpectrumSample, frequency_range};
//!
//! let spectrum: Vec<SpectrumSample> = vec![(20.0, 0.1).into(), (5.0, 0.4).into()];
//! assert_eq!(frequency_range(&spectrum), Some((5.0, 20.0)));
//! ```

pub mod psd;

pub use psd::{
    frequency_range,
    parse_psd_text,
    peak_sample,
    PsdImport,
    SpectrumSample,
    MIN_SPECTRUM_SAMPLES,
};
