//! # fatigue_core - Spectral Fatigue Calculation Engine
//!
//! `fatigue_core` estimates the fatigue damage and life of a structure under
//! stationary random vibration, given the one-sided stress PSD from a
//! harmonic/random-vibration solve and a Basquin S-N curve. Damage follows
//! the narrow-band (Miles) formula with the Wirsching-Light wide-band
//! correction. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use fatigue_core::{calculate_fatigue, SnCurveParams, SpectrumSample};
//!
//! let spectrum = vec![
//!     SpectrumSample::new(20.0, 0.0),
//!     SpectrumSample::new(80.0, 4.0),
//!     SpectrumSample::new(200.0, 0.0),
//! ];
//! let sn = SnCurveParams::from_material(460.0, None).unwrap();
//!
//! let result = calculate_fatigue(&spectrum, &sn, 3600.0).unwrap();
//! println!("RMS stress: {:.2} MPa", result.rms_stress);
//! println!("Life: {}", result.wirsching_life);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Fatigue damage and life
//! - [`equations`] - Spectral moments, damage formulas, Gamma, equation registry
//! - [`loads`] - Stress PSD samples and text ingestion
//! - [`materials`] - S-N curves and material presets
//! - [`project`] - Project container, metadata, and settings
//! - [`units`] - Time units and life formatting
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic project saves and input file loading

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_fatigue, FatigueInput, FatigueResult, Life};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, load_psd_file, load_sn_table_file, save_project};
pub use loads::SpectrumSample;
pub use materials::{SnCurveParams, SnCurveSource};
pub use project::{GlobalSettings, Project, ProjectMetadata};
