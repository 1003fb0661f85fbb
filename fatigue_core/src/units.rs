//! # Unit Types
//!
//! Type-safe wrappers for the time units used by the exposure and life
//! values. Stress is unit-agnostic (MPa in practice): S-N parameters and
//! the PSD only have to agree with each other.
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::units::{ExposureTime, Hours, Seconds, TimeUnit};
//!
//! let one_hour: Seconds = Hours(1.0).into();
//! assert_eq!(one_hour.0, 3600.0);
//!
//! let exposure = ExposureTime::new(30.0, TimeUnit::Minutes);
//! assert_eq!(exposure.seconds(), 1800.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Time Units
// ============================================================================

/// Duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

/// Duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

/// Duration in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

impl From<Minutes> for Seconds {
    fn from(min: Minutes) -> Self {
        Seconds(min.0 * 60.0)
    }
}

impl From<Seconds> for Minutes {
    fn from(s: Seconds) -> Self {
        Minutes(s.0 / 60.0)
    }
}

impl From<Hours> for Seconds {
    fn from(h: Hours) -> Self {
        Seconds(h.0 * 3600.0)
    }
}

impl From<Seconds> for Hours {
    fn from(s: Seconds) -> Self {
        Hours(s.0 / 3600.0)
    }
}

// ============================================================================
// Exposure Time
// ============================================================================

/// Unit an exposure duration is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    #[default]
    Hours,
}

impl TimeUnit {
    /// Seconds per one of this unit
    pub fn seconds_per_unit(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
        }
    }

    /// Short display suffix
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
        }
    }
}

/// How long the structure is exposed to the vibration load.
///
/// ## JSON Example
///
/// ```json
/// { "value": 1.0, "unit": "hours" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureTime {
    pub value: f64,
    #[serde(default)]
    pub unit: TimeUnit,
}

impl ExposureTime {
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        ExposureTime { value, unit }
    }

    /// Effective duration in seconds
    pub fn seconds(&self) -> f64 {
        self.value * self.unit.seconds_per_unit()
    }
}

impl Default for ExposureTime {
    fn default() -> Self {
        ExposureTime::new(1.0, TimeUnit::Hours)
    }
}

impl fmt::Display for ExposureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.suffix())
    }
}

// ============================================================================
// Life Formatting
// ============================================================================

/// Lives beyond this are reported as "> 1000 Years" (1000 · 365.25 days).
pub const LIFE_DISPLAY_CAP_S: f64 = 3.154e10;

/// Format a finite life in seconds for human display.
///
/// Short lives get seconds / minutes / hours-and-minutes; anything from
/// three days up is shown in hours with a thousands separator.
///
/// ```rust
/// use fatigue_core::units::format_life_seconds;
///
/// assert_eq!(format_life_seconds(42.0), "42.0 sec");
/// assert_eq!(format_life_seconds(125.0), "2m 5s");
/// assert_eq!(format_life_seconds(7_200.0), "2h 0m");
/// assert_eq!(format_life_seconds(3_600_000.0), "1,000 Hours");
/// ```
pub fn format_life_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds > LIFE_DISPLAY_CAP_S {
        return "> 1000 Years".to_string();
    }
    if seconds < 60.0 {
        return format!("{:.1} sec", seconds);
    }
    if seconds < 3600.0 {
        let mins = (seconds / 60.0).floor();
        let secs = (seconds % 60.0).floor();
        return format!("{}m {}s", mins, secs);
    }
    if seconds < 86_400.0 * 3.0 {
        let hours = (seconds / 3600.0).floor();
        let mins = ((seconds % 3600.0) / 60.0).floor();
        return format!("{}h {}m", hours, mins);
    }

    let hours: Hours = Seconds(seconds).into();
    format!("{} Hours", group_thousands(hours.0))
}

/// Round to one decimal (dropping a trailing ".0") and insert `,` separators.
fn group_thousands(value: f64) -> String {
    let tenths = (value * 10.0).round() as u64;
    let whole = tenths / 10;
    let frac = tenths % 10;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac > 0 {
        format!("{}.{}", grouped, frac)
    } else {
        grouped
    }
}
