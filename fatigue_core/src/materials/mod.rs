//! # Fatigue Materials
//!
//! Material definitions that feed the S-N curve estimator, plus the
//! Basquin curve itself in [`sn_curve`].
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::materials::{FatigueMaterial, lookup_material};
//!
//! let steel = lookup_material("structural-steel").unwrap();
//! let sn = steel.sn_curve().unwrap();
//! assert!(sn.m > 0.0 && sn.k > 0.0);
//!
//! let custom = FatigueMaterial::new("S355", 510.0).with_endurance_limit(240.0);
//! assert_eq!(custom.endurance_limit_mpa(), 240.0);
//! ```

pub mod sn_curve;

pub use sn_curve::{
    parse_sn_table,
    sn_curve_points,
    SnCurveParams,
    SnCurvePoints,
    SnCurveSource,
    SnDataPoint,
    DEFAULT_CURVE_POINTS,
};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CalcResult;

/// Static strength data needed for a material S-N estimate.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Structural Steel", "ultimate_strength_mpa": 460.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueMaterial {
    /// Display name
    pub name: String,
    /// Ultimate tensile strength Rm (MPa)
    pub ultimate_strength_mpa: f64,
    /// Endurance limit Se at 10⁶ cycles (MPa); 0.5·Rm when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endurance_limit_mpa: Option<f64>,
}

impl FatigueMaterial {
    pub fn new(name: impl Into<String>, ultimate_strength_mpa: f64) -> Self {
        FatigueMaterial {
            name: name.into(),
            ultimate_strength_mpa,
            endurance_limit_mpa: None,
        }
    }

    pub fn with_endurance_limit(mut self, se_mpa: f64) -> Self {
        self.endurance_limit_mpa = Some(se_mpa);
        self
    }

    /// Endurance limit actually used by the estimate
    pub fn endurance_limit_mpa(&self) -> f64 {
        self.endurance_limit_mpa
            .filter(|se| *se > 0.0)
            .unwrap_or(sn_curve::DEFAULT_ENDURANCE_RATIO * self.ultimate_strength_mpa)
    }

    /// Basquin parameters from the material estimate
    pub fn sn_curve(&self) -> CalcResult<SnCurveParams> {
        SnCurveParams::from_material(self.ultimate_strength_mpa, self.endurance_limit_mpa)
    }

    /// Curve source for storing in an analysis
    pub fn sn_source(&self) -> SnCurveSource {
        SnCurveSource::Material {
            ultimate_strength: self.ultimate_strength_mpa,
            endurance_limit: self.endurance_limit_mpa,
        }
    }
}

impl fmt::Display for FatigueMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Rm = {} MPa, Se = {} MPa)",
            self.name,
            self.ultimate_strength_mpa,
            self.endurance_limit_mpa()
        )
    }
}

/// Preset keys accepted by [`lookup_material`]
pub const MATERIAL_KEYS: [&str; 1] = ["structural-steel"];

/// Built-in material presets.
///
/// "structural-steel" matches the default Structural Steel of common FE
/// packages (Rm = 460 MPa, no endurance limit given).
pub fn lookup_material(key: &str) -> Option<FatigueMaterial> {
    match key.to_ascii_lowercase().as_str() {
        "structural-steel" | "structural_steel" | "steel" => {
            Some(FatigueMaterial::new("Structural Steel", 460.0))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup() {
        let steel = lookup_material("Structural-Steel").unwrap();
        assert_eq!(steel.ultimate_strength_mpa, 460.0);
        assert_eq!(steel.endurance_limit_mpa(), 230.0);
        assert!(lookup_material("unobtainium").is_none());
        for key in MATERIAL_KEYS {
            assert!(lookup_material(key).is_some());
        }
    }

    #[test]
    fn test_material_curve_matches_source() {
        let mat = FatigueMaterial::new("Test", 500.0).with_endurance_limit(200.0);
        let from_material = mat.sn_curve().unwrap();
        let from_source = mat.sn_source().resolve().unwrap();
        assert_eq!(from_material, from_source);
    }

    #[test]
    fn test_display() {
        let steel = lookup_material("steel").unwrap();
        assert_eq!(steel.to_string(), "Structural Steel (Rm = 460 MPa, Se = 230 MPa)");
    }

    #[test]
    fn test_serialization() {
        let mat = FatigueMaterial::new("Al 6061-T6", 310.0).with_endurance_limit(96.5);
        let json = serde_json::to_string(&mat).unwrap();
        let roundtrip: FatigueMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(mat, roundtrip);

        let bare: FatigueMaterial = serde_json::from_str(r#"{"name": "X", "ultimate_strength_mpa": 400}"#).unwrap();
        assert_eq!(bare.endurance_limit_mpa, None);
    }
}
