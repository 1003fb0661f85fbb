//! # File I/O Module
//!
//! Handles project file operations with safety features:
//! - **Atomic saves**: Write to .tmp, verify, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! It also reads the two text inputs of an analysis: a PSD export and an
//! S-N test table.
//!
//! ## File Format
//!
//! Projects are saved as `.flp` files containing pretty-printed JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fatigue_core::file_io::{load_project, load_psd_file, save_project};
//! use fatigue_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "26-001", "Client");
//! save_project(&project, Path::new("bracket.flp")).unwrap();
//!
//! let import = load_psd_file(Path::new("stress_psd.txt")).unwrap();
//! println!("{} samples", import.samples.len());
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::loads::{parse_psd_text, PsdImport};
use crate::materials::{parse_sn_table, SnDataPoint};
use crate::project::{Project, SCHEMA_VERSION};

/// Project file extension
pub const PROJECT_EXTENSION: &str = "flp";

/// Save a project to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (.tmp) and fsync
/// 3. Read the temporary file back and parse it
/// 4. Rename .tmp over the target (atomic on most filesystems)
///
/// # Example
///
/// ```rust,no_run
/// use fatigue_core::file_io::save_project;
/// use fatigue_core::project::Project;
/// use std::path::Path;
///
/// let project = Project::new("Engineer", "26-001", "Client");
/// save_project(&project, Path::new("myproject.flp"))?;
/// # Ok::<(), fatigue_core::errors::CalcError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project)?;

    let tmp_path = path.with_extension(format!("{}.tmp", PROJECT_EXTENSION));

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    if let Err(e) = verify_written(&tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), items = project.item_count(), "project saved");
    Ok(())
}

/// Re-read a freshly written project file and make sure it parses.
fn verify_written(tmp_path: &Path) -> CalcResult<()> {
    let contents = read_text(tmp_path, "verify temp file")?;
    serde_json::from_str::<Project>(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Verification of {} failed: {}", tmp_path.display(), e),
    })?;
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = read_text(path, "read")?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    info!(path = %path.display(), items = project.item_count(), "project loaded");
    Ok(project)
}

/// Read and parse a PSD text export (see [`parse_psd_text`]).
pub fn load_psd_file(path: &Path) -> CalcResult<PsdImport> {
    let contents = read_text(path, "read PSD")?;
    let import = parse_psd_text(&contents)?;
    debug!(path = %path.display(), samples = import.samples.len(), "PSD file loaded");
    Ok(import)
}

/// Read an S-N test table (see [`parse_sn_table`]).
///
/// An empty result is not an error here; the regression reports it.
pub fn load_sn_table_file(path: &Path) -> CalcResult<Vec<SnDataPoint>> {
    let contents = read_text(path, "read S-N table")?;
    let points = parse_sn_table(&contents);
    debug!(path = %path.display(), points = points.len(), "S-N table loaded");
    Ok(points)
}

fn read_text(path: &Path, operation: &str) -> CalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .map(|p| p.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| mismatch())?;
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor is a breaking change
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
