//! Stress PSD samples and delimited-text ingestion
//!
//! FE packages export a response PSD as two columns, frequency and stress
//! PSD, with a free-form header. [`parse_psd_text`] accepts the common
//! variants:
//!
//! - tab, semicolon or whitespace separated columns
//! - decimal commas (`12,5` is read as `12.5`)
//! - header lines starting with a letter (but not `e`/`E`, which may be the
//!   start of a number in scientific notation)
//!
//! Negative PSD values, which show up when a harmonic/random solve is
//! numerically unstable, are clamped to zero here and counted, so the
//! moment engine only ever sees non-negative data.
//!
//! # Example
//!
//! ```
//! use fatigue_core::loads::parse_psd_text;
//!
//! let text = "Frequency [Hz]\tStress PSD [MPa^2/Hz]\n10\t0,5\n20\t1.5\n40\t-0.01\n";
//! let import = parse_psd_text(text).unwrap();
//!
//! assert_eq!(import.samples.len(), 3);
//! assert_eq!(import.samples[0].psd, 0.5);
//! assert_eq!(import.clamped_negative, 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};

/// Minimum number of samples for a usable spectrum
pub const MIN_SPECTRUM_SAMPLES: usize = 2;

/// One point of a one-sided stress PSD.
///
/// ## JSON Example
///
/// ```json
/// { "frequency": 120.0, "psd": 3.4 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSample {
    /// Frequency in Hz
    pub frequency: f64,
    /// Stress PSD in stress²/Hz
    pub psd: f64,
}

impl SpectrumSample {
    pub fn new(frequency: f64, psd: f64) -> Self {
        SpectrumSample { frequency, psd }
    }
}

impl From<(f64, f64)> for SpectrumSample {
    fn from((frequency, psd): (f64, f64)) -> Self {
        SpectrumSample { frequency, psd }
    }
}

/// Outcome of parsing a PSD text export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsdImport {
    /// Parsed samples in file order (not sorted)
    pub samples: Vec<SpectrumSample>,
    /// Number of negative PSD values that were replaced by 0
    pub clamped_negative: usize,
    /// Number of non-blank lines skipped (headers, unparsable rows)
    pub skipped_lines: usize,
}

impl PsdImport {
    /// True when the source data needed clamping
    pub fn has_warnings(&self) -> bool {
        self.clamped_negative > 0
    }
}

/// Parse a two-column PSD export.
///
/// Returns `CalcError::InsufficientData` when fewer than two valid rows are
/// found.
pub fn parse_psd_text(text: &str) -> CalcResult<PsdImport> {
    let mut samples = Vec::new();
    let mut clamped_negative = 0;
    let mut skipped_lines = 0;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if is_header_line(line) {
            skipped_lines += 1;
            continue;
        }

        match parse_pair(line) {
            Some((frequency, psd)) => {
                let psd = if psd < 0.0 {
                    clamped_negative += 1;
                    0.0
                } else {
                    psd
                };
                samples.push(SpectrumSample::new(frequency, psd));
            }
            None => skipped_lines += 1,
        }
    }

    if samples.len() < MIN_SPECTRUM_SAMPLES {
        return Err(CalcError::insufficient_data(MIN_SPECTRUM_SAMPLES, samples.len()));
    }

    if clamped_negative > 0 {
        warn!(
            clamped_negative,
            "negative PSD values clamped to 0; this usually indicates an unstable simulation"
        );
    }
    debug!(samples = samples.len(), skipped_lines, "parsed PSD text");

    Ok(PsdImport {
        samples,
        clamped_negative,
        skipped_lines,
    })
}

/// A line starting with a letter is a header, unless it could be an exponent.
fn is_header_line(line: &str) -> bool {
    line.chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
        .unwrap_or(false)
}

/// Split a data row into fields: tabs/semicolons first, whitespace as fallback.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    let fields: Vec<&str> = line
        .split(['\t', ';'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if fields.len() >= 2 {
        fields
    } else {
        line.split_whitespace().collect()
    }
}

/// Parse a number that may use a decimal comma.
pub(crate) fn parse_number(field: &str) -> Option<f64> {
    field.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_pair(line: &str) -> Option<(f64, f64)> {
    let fields = split_fields(line);
    if fields.len() < 2 {
        return None;
    }
    Some((parse_number(fields[0])?, parse_number(fields[1])?))
}

/// Frequency span `(min, max)` of a spectrum, in any input order.
pub fn frequency_range(samples: &[SpectrumSample]) -> Option<(f64, f64)> {
    samples.iter().fold(None, |range, s| match range {
        None => Some((s.frequency, s.frequency)),
        Some((lo, hi)) => Some((lo.min(s.frequency), hi.max(s.frequency))),
    })
}

/// Sample with the highest PSD value.
pub fn peak_sample(samples: &[SpectrumSample]) -> Option<SpectrumSample> {
    samples
        .iter()
        .copied()
        .max_by(|a, b| a.psd.total_cmp(&b.psd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_separated_with_header() {
        let text = "Frequency\tPSD\n5\t0.1\n10\t0.4\n15\t0.2\n";
        let import = parse_psd_text(text).unwrap();
        assert_eq!(import.samples.len(), 3);
        assert_eq!(import.samples[1], SpectrumSample::new(10.0, 0.4));
        assert_eq!(import.skipped_lines, 1);
        assert!(!import.has_warnings());
    }

    #[test]
    fn test_semicolon_and_decimal_comma() {
        let text = "Freq;Stress\n1,5;2,25\n3,0;4,5\n";
        let import = parse_psd_text(text).unwrap();
        assert_eq!(import.samples[0], SpectrumSample::new(1.5, 2.25));
        assert_eq!(import.samples[1], SpectrumSample::new(3.0, 4.5));
    }

    #[test]
    fn test_whitespace_fallback_and_scientific() {
        let text = "  10   1.0e-3\n20 2E-3\n\n30    5e-4  \n";
        let import = parse_psd_text(text).unwrap();
        assert_eq!(import.samples.len(), 3);
        assert_eq!(import.samples[1].psd, 2e-3);
        assert_eq!(import.skipped_lines, 0);
    }

    #[test]
    fn test_negative_psd_clamped() {
        let text = "10\t1.0\n20\t-0.5\n30\t-1e-9\n40\t2.0\n";
        let import = parse_psd_text(text).unwrap();
        assert_eq!(import.clamped_negative, 2);
        assert_eq!(import.samples[1].psd, 0.0);
        assert_eq!(import.samples[2].psd, 0.0);
        assert!(import.has_warnings());
    }

    #[test]
    fn test_unparsable_rows_skipped() {
        let text = "10\t1.0\n20\tn/a\n-- end --\n30\t2.0\n";
        let import = parse_psd_text(text).unwrap();
        assert_eq!(import.samples.len(), 2);
        assert_eq!(import.skipped_lines, 2);
    }

    #[test]
    fn test_insufficient_rows() {
        let err = parse_psd_text("Frequency\tPSD\n10\t1.0\n").unwrap_err();
        assert_eq!(err, CalcError::insufficient_data(2, 1));
        assert!(parse_psd_text("").is_err());
    }

    #[test]
    fn test_range_and_peak() {
        let samples = vec![
            SpectrumSample::new(40.0, 0.2),
            SpectrumSample::new(10.0, 0.9),
            SpectrumSample::new(25.0, 0.5),
        ];
        assert_eq!(frequency_range(&samples), Some((10.0, 40.0)));
        assert_eq!(peak_sample(&samples).map(|s| s.frequency), Some(10.0));
        assert_eq!(frequency_range(&[]), None);
    }

    #[test]
    fn test_sample_from_tuple() {
        let sample: SpectrumSample = (12.0, 0.3).into();
        assert_eq!(sample, SpectrumSample::new(12.0, 0.3));
    }
}
