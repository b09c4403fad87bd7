//! # Roster Manifest
//!
//! TOML manifest describing programs, stages, and recorded learner progress.
//! The manifest is the file-facing shape; [`Manifest::into_roster`] converts
//! it into the engine's in-memory catalog, surfacing referential problems as
//! errors instead of silently dropping records.
//!
//! ## Format
//!
//! ```toml
//! [[programs]]
//! id = 1
//! name = "Rust Foundations"
//! delayed_stage_unlock = true
//!
//! [[stages]]
//! id = 10
//! program = 1
//! position = 1
//! name = "Ownership"
//! unlock_delay_days = 5
//!
//! [[progress]]
//! learner = 100
//! stage = 10
//! effective_start = "2025-01-10"
//! ```
//!
//! Dates are quoted ISO-8601 strings, matching the engine's day-granularity
//! `NaiveDate` representation.

use chrono::NaiveDate;
use gradus_core::{
    DelayDays, GradusError, LearnerId, Program, ProgramId, Roster, Stage, StageId,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum manifest file size (10 MiB).
///
/// A roster manifest is configuration, not data; anything larger is almost
/// certainly the wrong file.
const MAX_MANIFEST_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), GradusError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| GradusError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(GradusError::ManifestError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate a manifest path.
///
/// Canonicalizes the path to resolve symlinks and "..", ensures it exists,
/// and ensures it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, GradusError> {
    let canonical = path.canonicalize().map_err(|e| {
        GradusError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(GradusError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// MANIFEST SHAPE
// =============================================================================

/// Program entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramEntry {
    /// Program identifier.
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// Per-program unlock policy toggle.
    pub delayed_stage_unlock: bool,
}

/// Stage entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct StageEntry {
    /// Stage identifier.
    pub id: u64,
    /// Owning program identifier.
    pub program: u64,
    /// Ordering position among sibling stages.
    pub position: u32,
    /// Human-readable name.
    pub name: String,
    /// Unlock delay in whole days.
    #[serde(default)]
    pub unlock_delay_days: u32,
}

/// Recorded learner progress entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressEntry {
    /// Learner identifier.
    pub learner: u64,
    /// Stage the learner became eligible for.
    pub stage: u64,
    /// The date the learner's delay is measured from.
    pub effective_start: NaiveDate,
}

/// The full roster manifest.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Manifest {
    /// All programs.
    #[serde(default)]
    pub programs: Vec<ProgramEntry>,
    /// All stages.
    #[serde(default)]
    pub stages: Vec<StageEntry>,
    /// All recorded learner starts.
    #[serde(default)]
    pub progress: Vec<ProgressEntry>,
}

impl Manifest {
    /// Parse a manifest from TOML text.
    pub fn parse(text: &str) -> Result<Self, GradusError> {
        toml::from_str(text).map_err(|e| GradusError::ManifestError(e.to_string()))
    }

    /// Load and parse a manifest file.
    pub fn from_path(path: &Path) -> Result<Self, GradusError> {
        let canonical = validate_file_path(path)?;
        validate_file_size(&canonical, MAX_MANIFEST_FILE_SIZE)?;

        let text = std::fs::read_to_string(&canonical)
            .map_err(|e| GradusError::IoError(format!("Cannot read manifest: {}", e)))?;
        Self::parse(&text)
    }

    /// Convert the manifest into an engine roster.
    ///
    /// Insertion order follows the manifest sections: programs first, then
    /// stages, then progress, so referential errors name the entry at fault.
    pub fn into_roster(self) -> Result<Roster, GradusError> {
        let mut roster = Roster::new();

        for p in self.programs {
            roster.add_program(Program::new(
                ProgramId(p.id),
                p.name,
                p.delayed_stage_unlock,
            ));
        }

        for s in self.stages {
            roster.add_stage(Stage::new(
                StageId(s.id),
                ProgramId(s.program),
                s.position,
                s.name,
                DelayDays::new(s.unlock_delay_days),
            ))?;
        }

        for entry in self.progress {
            roster.record_start(
                LearnerId(entry.learner),
                StageId(entry.stage),
                entry.effective_start,
            )?;
        }

        Ok(roster)
    }
}

/// Load a roster directly from a manifest file.
pub fn load_roster(path: &Path) -> Result<Roster, GradusError> {
    Manifest::from_path(path)?.into_roster()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[programs]]
        id = 1
        name = "Rust Foundations"
        delayed_stage_unlock = true

        [[stages]]
        id = 10
        program = 1
        position = 1
        name = "Ownership"
        unlock_delay_days = 5

        [[stages]]
        id = 11
        program = 1
        position = 2
        name = "Borrowing"

        [[progress]]
        learner = 100
        stage = 10
        effective_start = "2025-01-10"
    "#;

    #[test]
    fn parse_sample_manifest() {
        let manifest = Manifest::parse(SAMPLE).expect("parse");
        assert_eq!(manifest.programs.len(), 1);
        assert_eq!(manifest.stages.len(), 2);
        assert_eq!(manifest.progress.len(), 1);
        // Omitted delay defaults to zero
        assert_eq!(manifest.stages[1].unlock_delay_days, 0);
    }

    #[test]
    fn into_roster_wires_everything_up() {
        let roster = Manifest::parse(SAMPLE)
            .expect("parse")
            .into_roster()
            .expect("roster");
        assert_eq!(roster.program_count(), 1);
        assert_eq!(roster.stage_count(), 2);
        assert_eq!(roster.progress_count(), 1);
    }

    #[test]
    fn stage_with_unknown_program_is_rejected() {
        let text = r#"
            [[stages]]
            id = 10
            program = 99
            position = 1
            name = "Orphan"
        "#;
        let result = Manifest::parse(text).expect("parse").into_roster();
        assert_eq!(result, Err(GradusError::ProgramNotFound(ProgramId(99))));
    }

    #[test]
    fn progress_with_unknown_stage_is_rejected() {
        let text = r#"
            [[progress]]
            learner = 100
            stage = 10
            effective_start = "2025-01-10"
        "#;
        let result = Manifest::parse(text).expect("parse").into_roster();
        assert_eq!(result, Err(GradusError::StageNotFound(StageId(10))));
    }

    #[test]
    fn malformed_toml_is_a_manifest_error() {
        let result = Manifest::parse("[[programs]\nid = 1");
        assert!(matches!(result, Err(GradusError::ManifestError(_))));
    }

    #[test]
    fn empty_manifest_is_valid() {
        let roster = Manifest::parse("").expect("parse").into_roster().expect("roster");
        assert_eq!(roster.program_count(), 0);
    }
}
