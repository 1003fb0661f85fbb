//! # Equation Registry
//!
//! Central registry of the equations used in spectral fatigue calculations.
//! Each equation has metadata including its literature reference, formula,
//! and variable definitions so a result can be audited line by line.
//!
//! ## Usage
//!
//! ```rust
//! use fatigue_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::NarrowBandDamage, "Random vibration, 1 h");
//!
//! let meta = Equation::NarrowBandDamage.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Literature References
// ============================================================================

/// Source of an equation. Every formula cites one for auditability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    /// Wirsching & Light, J. Struct. Div. ASCE 106 (1980)
    WirschingLight1980,
    /// Miles, J. Aeronautical Sciences 21 (1954) - Rayleigh damage integral
    Miles1954,
    /// Rice (1944) / Bendat (1964) - level-crossing and peak statistics
    RiceBendat,
    /// Basquin (1910) power law
    Basquin1910,
    /// Shigley's Mechanical Engineering Design, S-N estimation for steels
    Shigley { edition: u8, section: &'static str },
    /// Lanczos (1964) Gamma approximation
    Lanczos1964,
    /// General numerical methods (no specific reference needed)
    Numerical,
}

impl Reference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            Reference::WirschingLight1980 => {
                "Wirsching & Light, \"Fatigue under Wide Band Random Stresses\", ASCE J. Struct. Div. 106 (1980)".to_string()
            }
            Reference::Miles1954 => {
                "Miles, \"On Structural Fatigue Under Random Loading\", J. Aero. Sci. 21 (1954)".to_string()
            }
            Reference::RiceBendat => "Rice (1944); Bendat, NASA CR-33 (1964)".to_string(),
            Reference::Basquin1910 => "Basquin, \"The Exponential Law of Endurance Tests\" (1910)".to_string(),
            Reference::Shigley { edition, section } => {
                format!("Shigley's Mechanical Engineering Design, {}ed, Section {}", edition, section)
            }
            Reference::Lanczos1964 => "Lanczos, SIAM J. Numer. Anal. B1 (1964)".to_string(),
            Reference::Numerical => "Numerical methods".to_string(),
        }
    }

    /// Short form for inline citations
    pub fn short_form(&self) -> &'static str {
        match self {
            Reference::WirschingLight1980 => "W&L",
            Reference::Miles1954 => "Miles",
            Reference::RiceBendat => "Rice",
            Reference::Basquin1910 => "Basquin",
            Reference::Shigley { .. } => "Shigley",
            Reference::Lanczos1964 => "Lanczos",
            Reference::Numerical => "Num.",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// PSD integration
    SpectralMoments,
    /// RMS, crossing and peak rates, bandwidth
    ProcessStatistics,
    /// Basquin parameter estimation
    SnCurve,
    /// Damage and life
    Damage,
    /// Supporting special functions
    SpecialFunctions,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SpectralMoments => "Spectral Moments",
            EquationCategory::ProcessStatistics => "Process Statistics",
            EquationCategory::SnCurve => "S-N Curve",
            EquationCategory::Damage => "Damage and Life",
            EquationCategory::SpecialFunctions => "Special Functions",
        }
    }

    /// Sort order for reports (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::SnCurve => 1,
            EquationCategory::SpectralMoments => 2,
            EquationCategory::ProcessStatistics => 3,
            EquationCategory::Damage => 4,
            EquationCategory::SpecialFunctions => 5,
        }
    }

    /// All categories in report order
    pub fn all() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![SpectralMoments, ProcessStatistics, SnCurve, Damage, SpecialFunctions];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a fatigue equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub reference: Reference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the fatigue engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// mₙ = ∫ fⁿ G(f) df (trapezoid)
    SpectralMoment,
    /// σ_rms = √m0
    RmsStress,
    /// ν0 = √(m2/m0) / 2π
    ZeroCrossingRate,
    /// E[P] = √(m4/m2) / 2π
    PeakRate,
    /// γ = ν0 / E[P]
    IrregularityFactor,
    /// ε = √(1 − γ²)
    SpectralWidth,
    /// D_NB = (ν0 T / K)(√2)^m Γ(1 + m/2) σ^m
    NarrowBandDamage,
    /// λ = a + (1 − a)(1 − ε)^b
    WirschingCorrection,
    /// Life = T / D
    FatigueLife,
    /// m = log(N2/N1) / log(S1/S2), K = N1 S1^m
    BasquinTwoPoint,
    /// S1 = 0.9 Rm at 10³, S2 = Se (0.5 Rm) at 10⁶
    ShigleyEstimate,
    /// Least squares on log N = log K − m log S
    BasquinRegression,
    /// Lanczos Γ(z)
    LanczosGamma,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::SpectralMoment => EquationMetadata {
                name: "Spectral Moment",
                description: "n-th frequency-weighted integral of the one-sided stress PSD",
                formula_plain: "m_n = sum 0.5*(f_i^n*G_i + f_(i+1)^n*G_(i+1))*(f_(i+1) - f_i)",
                reference: Reference::Numerical,
                variables: vec![
                    Variable::new("f", "Frequency", "Hz"),
                    Variable::new("G", "Stress PSD", "MPa^2/Hz"),
                    Variable::new("m_n", "n-th spectral moment", "MPa^2 Hz^n"),
                ],
                assumptions: vec!["Linear interpolation between PSD samples", "Samples sorted by frequency"],
                category: EquationCategory::SpectralMoments,
                source_module: "equations/spectral.rs",
                source_function: "calculate_moment",
            },

            Equation::RmsStress => EquationMetadata {
                name: "RMS Stress",
                description: "Standard deviation of a zero-mean stress process",
                formula_plain: "sigma_rms = sqrt(m0)",
                reference: Reference::RiceBendat,
                variables: vec![Variable::new("sigma_rms", "RMS stress", "MPa")],
                assumptions: vec!["Zero-mean stationary process"],
                category: EquationCategory::ProcessStatistics,
                source_module: "equations/spectral.rs",
                source_function: "rms_stress",
            },

            Equation::ZeroCrossingRate => EquationMetadata {
                name: "Zero Up-Crossing Rate",
                description: "Expected number of positive-slope zero crossings per second",
                formula_plain: "nu_0 = (1/(2*pi)) * sqrt(m2/m0)",
                reference: Reference::RiceBendat,
                variables: vec![Variable::new("nu_0", "Zero up-crossing rate", "Hz")],
                assumptions: vec!["Gaussian stationary process"],
                category: EquationCategory::ProcessStatistics,
                source_module: "equations/spectral.rs",
                source_function: "zero_crossing_rate",
            },

            Equation::PeakRate => EquationMetadata {
                name: "Peak Rate",
                description: "Expected number of peaks (local maxima) per second",
                formula_plain: "E[P] = (1/(2*pi)) * sqrt(m4/m2)",
                reference: Reference::RiceBendat,
                variables: vec![Variable::new("E[P]", "Peak rate", "Hz")],
                assumptions: vec!["Gaussian stationary process"],
                category: EquationCategory::ProcessStatistics,
                source_module: "equations/spectral.rs",
                source_function: "peak_rate",
            },

            Equation::IrregularityFactor => EquationMetadata {
                name: "Irregularity Factor",
                description: "Ratio of zero up-crossings to peaks; 1 for a narrow-band process",
                formula_plain: "gamma = nu_0 / E[P]",
                reference: Reference::RiceBendat,
                variables: vec![Variable::new("gamma", "Irregularity factor", "-")],
                assumptions: vec![],
                category: EquationCategory::ProcessStatistics,
                source_module: "equations/spectral.rs",
                source_function: "irregularity_factor",
            },

            Equation::SpectralWidth => EquationMetadata {
                name: "Spectral Width",
                description: "Bandwidth parameter; 0 = narrow band, approaching 1 = wide band",
                formula_plain: "epsilon = sqrt(1 - gamma^2)",
                reference: Reference::WirschingLight1980,
                variables: vec![Variable::new("epsilon", "Spectral width parameter", "-")],
                assumptions: vec!["Radicand floored at 0"],
                category: EquationCategory::ProcessStatistics,
                source_module: "equations/spectral.rs",
                source_function: "spectral_width",
            },

            Equation::NarrowBandDamage => EquationMetadata {
                name: "Narrow-Band Damage",
                description: "Miner damage assuming Rayleigh distributed cycle amplitudes at the zero-crossing rate",
                formula_plain: "D_NB = (nu_0*T/K) * sqrt(2)^m * Gamma(1 + m/2) * sigma_rms^m",
                reference: Reference::Miles1954,
                variables: vec![
                    Variable::new("T", "Exposure duration", "s"),
                    Variable::new("m", "Basquin slope", "-"),
                    Variable::new("K", "Basquin constant", "MPa^m"),
                    Variable::new("D_NB", "Narrow-band damage", "-"),
                ],
                assumptions: vec![
                    "Linear (Palmgren-Miner) damage accumulation",
                    "No endurance limit, single-slope S-N curve",
                    "No mean-stress correction",
                ],
                category: EquationCategory::Damage,
                source_module: "equations/damage.rs",
                source_function: "narrow_band_damage",
            },

            Equation::WirschingCorrection => EquationMetadata {
                name: "Wirsching-Light Correction",
                description: "Empirical rainflow correction of the narrow-band damage for wide-band processes",
                formula_plain: "lambda = a + (1-a)*(1-epsilon)^b, a = 0.926 - 0.033m, b = 1.587m - 2.323",
                reference: Reference::WirschingLight1980,
                variables: vec![
                    Variable::new("lambda", "Correction factor", "-"),
                    Variable::new("D_W", "Corrected damage = lambda * D_NB", "-"),
                ],
                assumptions: vec!["Calibrated for 3 <= m <= 6 by simulation"],
                category: EquationCategory::Damage,
                source_module: "equations/damage.rs",
                source_function: "wirsching_factor",
            },

            Equation::FatigueLife => EquationMetadata {
                name: "Fatigue Life",
                description: "Time to reach unit damage at a constant damage rate",
                formula_plain: "Life = T / D",
                reference: Reference::Numerical,
                variables: vec![Variable::new("Life", "Time to failure", "s")],
                assumptions: vec!["Zero damage reported as infinite life"],
                category: EquationCategory::Damage,
                source_module: "calculations/fatigue.rs",
                source_function: "Life::from_damage",
            },

            Equation::BasquinTwoPoint => EquationMetadata {
                name: "Basquin Two-Point Solve",
                description: "Closed-form Basquin parameters through two S-N points",
                formula_plain: "m = log10(N2/N1) / log10(S1/S2), K = N1 * S1^m",
                reference: Reference::Basquin1910,
                variables: vec![
                    Variable::new("N1, N2", "Cycles to failure", "cycles"),
                    Variable::new("S1, S2", "Stress amplitudes", "MPa"),
                ],
                assumptions: vec!["S1 > S2 and N2 > N1"],
                category: EquationCategory::SnCurve,
                source_module: "materials/sn_curve.rs",
                source_function: "SnCurveParams::from_points",
            },

            Equation::ShigleyEstimate => EquationMetadata {
                name: "Material S-N Estimate",
                description: "High-cycle S-N line from ultimate strength and endurance limit",
                formula_plain: "(N=1e3, S=0.9*Rm), (N=1e6, S=Se), Se = 0.5*Rm if unknown",
                reference: Reference::Shigley { edition: 10, section: "6-7" },
                variables: vec![
                    Variable::new("Rm", "Ultimate tensile strength", "MPa"),
                    Variable::new("Se", "Endurance limit", "MPa"),
                ],
                assumptions: vec!["Steels with Rm below about 1400 MPa"],
                category: EquationCategory::SnCurve,
                source_module: "materials/sn_curve.rs",
                source_function: "SnCurveParams::from_material",
            },

            Equation::BasquinRegression => EquationMetadata {
                name: "Basquin Regression",
                description: "Ordinary least squares fit of log N against log S",
                formula_plain: "B = (n*Sxy - Sx*Sy)/(n*Sxx - Sx^2), C = (Sy - B*Sx)/n, m = -B, K = 10^C",
                reference: Reference::Basquin1910,
                variables: vec![
                    Variable::new("X", "log10(S)", "-"),
                    Variable::new("Y", "log10(N)", "-"),
                ],
                assumptions: vec!["Cycles treated as the dependent variable"],
                category: EquationCategory::SnCurve,
                source_module: "materials/sn_curve.rs",
                source_function: "SnCurveParams::from_regression",
            },

            Equation::LanczosGamma => EquationMetadata {
                name: "Gamma Function",
                description: "Lanczos approximation with reflection for z < 0.5",
                formula_plain: "Gamma(z) = sqrt(2*pi) * t^(z-0.5) * e^(-t) * A_g(z), t = z + g - 0.5, g = 7",
                reference: Reference::Lanczos1964,
                variables: vec![Variable::new("z", "Argument (1 + m/2)", "-")],
                assumptions: vec![],
                category: EquationCategory::SpecialFunctions,
                source_module: "equations/gamma.rs",
                source_function: "gamma",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::SpectralMoment,
    Equation::RmsStress,
    Equation::ZeroCrossingRate,
    Equation::PeakRate,
    Equation::IrregularityFactor,
    Equation::SpectralWidth,
    Equation::NarrowBandDamage,
    Equation::WirschingCorrection,
    Equation::FatigueLife,
    Equation::BasquinTwoPoint,
    Equation::ShigleyEstimate,
    Equation::BasquinRegression,
    Equation::LanczosGamma,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where/why it was used (e.g., "m2")
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    pub fn into_usages(self) -> Vec<EquationUsage> {
        self.usages
    }

    /// Unique equations in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category, in report order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate a markdown reference of every equation in the registry.
///
/// ```rust
/// use fatigue_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Wirsching-Light Correction"));
/// assert!(markdown.contains("## S-N Curve"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);
    output.push_str("# FatigueLife Equations Reference\n\n");
    output.push_str("Formulas used by the spectral fatigue engine, grouped by category.\n\n");

    for category in EquationCategory::all() {
        let equations = Equation::in_category(category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();
            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            for assumption in &meta.assumptions {
                output.push_str(&format!("- {}\n", assumption));
            }
            if !meta.assumptions.is_empty() {
                output.push('\n');
            }

            output.push_str(&format!(
                "*Reference:* {}  \n*Source:* `{}` :: `{}`\n\n",
                meta.reference.citation(),
                meta.source_module,
                meta.source_function
            ));
        }
    }

    output
}
