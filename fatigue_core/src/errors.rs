//! # Error Types
//!
//! Structured error types for fatigue_core. Every failure is local and
//! synchronous: the calculations are deterministic, so none of these are
//! worth retrying with the same input.
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::errors::{CalcError, CalcResult};
//!
//! fn validate_duration(duration_s: f64) -> CalcResult<()> {
//!     if duration_s < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "duration_s",
//!             duration_s.to_string(),
//!             "Exposure duration cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fatigue_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A required spectral moment is zero or negative (empty or degenerate PSD)
    #[error("Invalid spectral data: {reason}")]
    InvalidSpectralData { reason: String },

    /// Two-point S-N input is not a decreasing stress / increasing cycles pair
    #[error("Invalid S-N data: {reason}")]
    InvalidCurveData { reason: String },

    /// Not enough data points to perform the requested operation
    #[error("Insufficient data: {required} points required, {found} supplied")]
    InsufficientData { required: usize, found: usize },

    /// Regression system is singular (all stresses identical in log space)
    #[error("Cannot fit S-N line: {reason}")]
    DegenerateFit { reason: String },

    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidSpectralData error
    pub fn invalid_spectral_data(reason: impl Into<String>) -> Self {
        CalcError::InvalidSpectralData {
            reason: reason.into(),
        }
    }

    /// Create an InvalidCurveData error
    pub fn invalid_curve_data(reason: impl Into<String>) -> Self {
        CalcError::InvalidCurveData {
            reason: reason.into(),
        }
    }

    /// Create an InsufficientData error
    pub fn insufficient_data(required: usize, found: usize) -> Self {
        CalcError::InsufficientData { required, found }
    }

    /// Create a DegenerateFit error
    pub fn degenerate_fit(reason: impl Into<String>) -> Self {
        CalcError::DegenerateFit {
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry).
    ///
    /// Only I/O failures qualify; a calculation with the same input fails the same way.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidSpectralData { .. } => "INVALID_SPECTRAL_DATA",
            CalcError::InvalidCurveData { .. } => "INVALID_CURVE_DATA",
            CalcError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            CalcError::DegenerateFit { .. } => "DEGENERATE_FIT",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_curve_data("Stress at N1 must be higher than stress at N2");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidCurveData"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::insufficient_data(2, 1).error_code(), "INSUFFICIENT_DATA");
        assert_eq!(CalcError::degenerate_fit("vertical").error_code(), "DEGENERATE_FIT");
        assert_eq!(
            CalcError::invalid_spectral_data("m0 = 0").error_code(),
            "INVALID_SPECTRAL_DATA"
        );
    }

    #[test]
    fn test_calculation_errors_not_recoverable() {
        assert!(!CalcError::degenerate_fit("vertical").is_recoverable());
        assert!(!CalcError::invalid_spectral_data("m2 = 0").is_recoverable());
        assert!(CalcError::file_error("read", "a.txt", "denied").is_recoverable());
    }

    #[test]
    fn test_insufficient_data_message() {
        let msg = CalcError::insufficient_data(2, 1).to_string();
        assert_eq!(msg, "Insufficient data: 2 points required, 1 supplied");
    }
}
