//! # Project Data Structures
//!
//! The `Project` struct is the root container for stored fatigue cases.
//! Projects serialize to `.flp` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (default exposure, curve sampling)
//! └── items: HashMap<Uuid, CalculationItem> (all fatigue cases)
//! ```
//!
//! Each item is evaluated on its own; damage is never summed across items.
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::project::Project;
//! use fatigue_core::materials::SnCurveParams;
//!
//! let mut project = Project::new("Jane Engineer", "26-042", "ACME Corp");
//! let spectrum = vec![(0.0, 0.0).into(), (10.0, 100.0).into(), (20.0, 0.0).into()];
//! project.add_case("Weld toe", spectrum, SnCurveParams::new(3.0, 1.0e12).into());
//!
//! let results = project.evaluate_all();
//! assert!(results[0].1.is_ok());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::calculations::{CalculationItem, FatigueCaseResult, FatigueInput};
use crate::errors::CalcResult;
use crate::loads::SpectrumSample;
use crate::materials::{SnCurveSource, DEFAULT_CURVE_POINTS};
use crate::units::ExposureTime;

/// Current schema version for .flp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings
    #[serde(default)]
    pub settings: GlobalSettings,

    /// All fatigue cases, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fatigue_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "26-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: impl Into<CalculationItem>) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item.into());
        self.touch();
        id
    }

    /// Add a fatigue case using the project's default exposure.
    pub fn add_case(
        &mut self,
        label: impl Into<String>,
        spectrum: Vec<SpectrumSample>,
        sn_curve: SnCurveSource,
    ) -> Uuid {
        let input = FatigueInput::new(label, spectrum, sn_curve).with_exposure(self.settings.default_exposure);
        self.add_item(input)
    }

    /// Remove a calculation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Evaluate every item independently, ordered by label.
    ///
    /// A failing item does not stop the others.
    pub fn evaluate_all(&self) -> Vec<(Uuid, CalcResult<FatigueCaseResult>)> {
        let mut entries: Vec<(&Uuid, &CalculationItem)> = self.items.iter().collect();
        entries.sort_by(|a, b| a.1.label().cmp(b.1.label()).then(a.0.cmp(b.0)));

        entries
            .into_iter()
            .map(|(id, item)| {
                let result = item.evaluate();
                if let Err(e) = &result {
                    warn!(label = item.label(), error = %e, "fatigue case failed");
                }
                (*id, result)
            })
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Exposure given to new cases
    #[serde(default)]
    pub default_exposure: ExposureTime,

    /// Number of points when sampling S-N curves for output
    #[serde(default = "default_curve_points")]
    pub curve_points: usize,
}

fn default_curve_points() -> usize {
    DEFAULT_CURVE_POINTS
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            default_exposure: ExposureTime::default(),
            curve_points: DEFAULT_CURVE_POINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::materials::SnCurveParams;
    use crate::units::TimeUnit;

    fn triangle() -> Vec<SpectrumSample> {
        vec![(0.0, 0.0).into(), (10.0, 100.0).into(), (20.0, 0.0).into()]
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "26-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "26-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.curve_points, 50);
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "26-042", "Test Client");
        project.add_case("Bracket", triangle(), SnCurveParams::new(3.0, 1.0e12).into());
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("\"type\": \"Fatigue\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.items, project.items);
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "engineer": "E",
                "job_id": "J",
                "client": "C",
                "created": "2026-01-05T10:00:00Z",
                "modified": "2026-01-05T10:00:00Z"
            },
            "items": {}
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.settings, GlobalSettings::default());
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Engineer", "26-001", "Client");
        project.settings.default_exposure = ExposureTime::new(30.0, TimeUnit::Minutes);
        let created = project.meta.modified;

        let id = project.add_case("S-1", triangle(), SnCurveParams::new(3.0, 1.0e12).into());
        assert_eq!(project.item_count(), 1);
        assert!(project.meta.modified >= created);

        match project.get_item(&id) {
            Some(CalculationItem::Fatigue(input)) => assert_eq!(input.exposure.seconds(), 1800.0),
            other => panic!("unexpected item: {:?}", other),
        }

        assert!(project.remove_item(&id).is_some());
        assert!(project.remove_item(&id).is_none());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_evaluate_all_is_independent() {
        let mut project = Project::new("Engineer", "26-001", "Client");
        let good = project.add_case("A good", triangle(), SnCurveParams::new(3.0, 1.0e12).into());
        let bad = project.add_case("B empty", Vec::new(), SnCurveParams::new(3.0, 1.0e12).into());

        let results = project.evaluate_all();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, good);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, bad);
        assert!(matches!(results[1].1, Err(CalcError::InvalidSpectralData { .. })));
    }
}
