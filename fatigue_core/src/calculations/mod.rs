//! # Fatigue Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`fatigue`] - Spectral fatigue damage and life (narrow-band + Wirsching-Light)

pub mod fatigue;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use fatigue::{
    calculate_fatigue,
    calculate_fatigue_tracked,
    FatigueCaseResult,
    FatigueInput,
    FatigueResult,
    Life,
};

/// Enum wrapper for all calculation types stored in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Spectral fatigue case
    Fatigue(FatigueInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Fatigue(f) => &f.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Fatigue(_) => "Fatigue",
        }
    }

    /// Evaluate the wrapped calculation
    pub fn evaluate(&self) -> crate::errors::CalcResult<FatigueCaseResult> {
        match self {
            CalculationItem::Fatigue(f) => fatigue::calculate(f),
        }
    }
}

impl From<FatigueInput> for CalculationItem {
    fn from(input: FatigueInput) -> Self {
        CalculationItem::Fatigue(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::SnCurveParams;

    #[test]
    fn test_item_tagging() {
        let input = FatigueInput::new(
            "Weld",
            vec![(0.0, 0.0).into(), (10.0, 1.0).into(), (20.0, 0.0).into()],
            SnCurveParams::new(3.0, 1.0e12).into(),
        );
        let item = CalculationItem::from(input);
        assert_eq!(item.label(), "Weld");
        assert_eq!(item.calc_type(), "Fatigue");

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.starts_with(r#"{"type":"Fatigue""#));
        let back: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
        assert!(back.evaluate().is_ok());
    }
}
