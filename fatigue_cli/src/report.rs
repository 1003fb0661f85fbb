//! Plain-text reports for terminal output.

use std::fmt::Write;

use fatigue_core::calculations::{FatigueCaseResult, FatigueResult};
use fatigue_core::loads::{frequency_range, PsdImport};
use fatigue_core::materials::{SnCurveParams, SnDataPoint};
use fatigue_core::units::ExposureTime;

const RULE: &str = "═══════════════════════════════════════";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "{}", RULE);
}

/// Summary of the PSD that went into an analysis.
pub fn spectrum_summary(source: &str, import: &PsdImport) -> String {
    let mut out = String::new();
    let _ = write!(out, "  PSD:       {} ({} samples", source, import.samples.len());
    if let Some((lo, hi)) = frequency_range(&import.samples) {
        let _ = write!(out, ", {} - {} Hz", lo, hi);
    }
    let _ = writeln!(out, ")");
    if import.clamped_negative > 0 {
        let _ = writeln!(
            out,
            "  Warning:   {} negative PSD values clamped to 0 (unstable simulation?)",
            import.clamped_negative
        );
    }
    out
}

/// S-N line shared by every report
pub fn sn_summary(method: &str, sn: &SnCurveParams) -> String {
    format!("  S-N curve: {} (m = {:.4}, K = {:.4e})\n", method, sn.m, sn.k)
}

/// Statistics, damage and life sections.
pub fn fatigue_report(exposure: &ExposureTime, result: &FatigueResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Exposure:  {} ({} s)", exposure, result.duration_s);
    let _ = writeln!(out);

    let _ = writeln!(out, "Spectral moments:");
    for (n, value) in result.moments.as_array().iter().enumerate() {
        let _ = writeln!(out, "  m{} = {:.6e}", n, value);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Process statistics:");
    let _ = writeln!(out, "  σ_rms = {:.4}", result.rms_stress);
    let _ = writeln!(out, "  ν0    = {:.4} Hz", result.zero_crossing_rate);
    let _ = writeln!(out, "  E[P]  = {:.4} Hz", result.peak_rate);
    let _ = writeln!(out, "  γ     = {:.4}", result.irregularity_factor);
    let _ = writeln!(out, "  ε     = {:.4}", result.spectral_width);
    let _ = writeln!(out);

    let _ = writeln!(out, "Damage:");
    let _ = writeln!(
        out,
        "  Narrow-band:      D = {:.4e}   Life = {}",
        result.narrow_band_damage, result.narrow_band_life
    );
    let _ = writeln!(
        out,
        "  Wirsching-Light:  D = {:.4e}   Life = {}   (λ = {:.4})",
        result.wirsching_damage, result.wirsching_life, result.wirsching_factor
    );
    if result.fails_within_exposure() {
        let _ = writeln!(out, "  ✗ Damage reaches 1 within the exposure");
    }
    out
}

/// Full `analyze` report.
pub fn analyze_report(
    source: &str,
    import: &PsdImport,
    method: &str,
    sn: &SnCurveParams,
    exposure: &ExposureTime,
    result: &FatigueResult,
) -> String {
    let mut out = String::new();
    heading(&mut out, "SPECTRAL FATIGUE RESULTS");
    out.push('\n');
    out.push_str(&spectrum_summary(source, import));
    out.push_str(&sn_summary(method, sn));
    out.push_str(&fatigue_report(exposure, result));
    out
}

/// One stored project case.
pub fn case_report(case: &FatigueCaseResult) -> String {
    let mut out = String::new();
    heading(&mut out, &case.label);
    out.push_str(&sn_summary(&case.sn_method, &case.sn_curve));
    out.push_str(&fatigue_report(&case.exposure, &case.result));
    out
}

/// Two-column S-N table.
pub fn curve_table(points: impl Iterator<Item = SnDataPoint>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:>14}  {:>14}", "Cycles", "Stress");
    for p in points {
        let _ = writeln!(out, "  {:>14.4e}  {:>14.4}", p.cycles, p.stress);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatigue_core::calculations::calculate_fatigue;
    use fatigue_core::loads::parse_psd_text;
    use fatigue_core::units::TimeUnit;

    #[test]
    fn test_analyze_report_sections() {
        let import = parse_psd_text("0\t0\n10\t100\n20\t-1\n").unwrap();
        let sn = SnCurveParams::new(3.0, 1.0e12);
        let exposure = ExposureTime::new(1.0, TimeUnit::Hours);
        let result = calculate_fatigue(&import.samples, &sn, exposure.seconds()).unwrap();

        let text = analyze_report("psd.txt", &import, "Direct", &sn, &exposure, &result);
        assert!(text.contains("SPECTRAL FATIGUE RESULTS"));
        assert!(text.contains("psd.txt (3 samples, 0 - 20 Hz)"));
        assert!(text.contains("1 negative PSD values clamped"));
        assert!(text.contains("m0 = 1.000000e3"));
        assert!(text.contains("Wirsching-Light"));
    }

    #[test]
    fn test_curve_table_rows() {
        let sn = SnCurveParams::new(3.0, 1.0e12);
        let table = curve_table(sn.curve_points(3));
        assert_eq!(table.lines().count(), 4);
    }
}
