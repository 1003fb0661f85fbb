//! # Spectral Fatigue Equations
//!
//! Fundamental equations used by the fatigue calculations, kept in one place
//! so they can be verified against the literature independently of the
//! calculation pipeline.
//!
//! ## Modules
//!
//! - [`spectral`] - PSD moments and stress-process statistics
//! - [`damage`] - Narrow-band damage and the Wirsching-Light correction
//! - [`gamma`] - Lanczos Gamma function
//! - [`registry`] - Equation metadata and usage tracking for audit output
//!
//! ## Conventions
//!
//! - **PSD**: one-sided, stress²/Hz versus Hz
//! - **Stress**: amplitude, in whatever unit the S-N curve uses (MPa typical)
//! - **Time**: seconds
//!
//! ## References
//!
//! - Wirsching & Light (1980), ASCE J. Struct. Div. 106
//! - Bendat (1964), NASA CR-33
//! - Shigley's Mechanical Engineering Design, 10th Edition

pub mod damage;
pub mod gamma;
pub mod registry;
pub mod spectral;

// Re-export commonly used items
pub use damage::{narrow_band_damage, wirsching_coefficients, wirsching_factor};
pub use gamma::gamma;
pub use spectral::{
    calculate_moment,
    irregularity_factor,
    peak_rate,
    rms_stress,
    spectral_width,
    zero_crossing_rate,
    SpectralMoments,
};

pub use registry::{
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Reference,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
