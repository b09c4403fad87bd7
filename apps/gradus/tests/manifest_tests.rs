//! # Manifest Integration Tests
//!
//! Load roster manifests from real files on disk and drive the engine from
//! them, the same path the CLI takes.

use chrono::NaiveDate;
use gradus::manifest::{self, Manifest};
use gradus_core::{GradusError, LearnerId, StageId, UnlockEngine};
use std::io::Write;

const SAMPLE: &str = r#"
[[programs]]
id = 1
name = "Rust Foundations"
delayed_stage_unlock = true

[[programs]]
id = 2
name = "Open Workshop"
delayed_stage_unlock = false

[[stages]]
id = 10
program = 1
position = 1
name = "Ownership"
unlock_delay_days = 5

[[stages]]
id = 20
program = 2
position = 1
name = "Welcome"
unlock_delay_days = 30

[[progress]]
learner = 100
stage = 10
effective_start = "2025-01-10"
"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn write_manifest(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("roster.toml");
    let mut file = std::fs::File::create(&path).expect("create manifest");
    file.write_all(text.as_bytes()).expect("write manifest");
    path
}

#[test]
fn load_roster_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_manifest(&dir, SAMPLE);

    let roster = manifest::load_roster(&path).expect("load");
    assert_eq!(roster.program_count(), 2);
    assert_eq!(roster.stage_count(), 2);
    assert_eq!(roster.progress_count(), 1);
}

#[test]
fn loaded_roster_drives_decisions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_manifest(&dir, SAMPLE);

    let roster = manifest::load_roster(&path).expect("load");
    let engine = UnlockEngine::new(&roster, &roster);

    // Delayed program: locked mid-delay, open on the boundary.
    assert_eq!(
        engine.is_unlocked(LearnerId(100), StageId(10), date(2025, 1, 12)),
        Ok(false)
    );
    assert_eq!(
        engine.is_unlocked(LearnerId(100), StageId(10), date(2025, 1, 15)),
        Ok(true)
    );

    // Immediate program: the configured 30-day delay is inert, and no
    // progress record is needed.
    assert_eq!(
        engine.is_unlocked(LearnerId(100), StageId(20), date(2025, 1, 1)),
        Ok(true)
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("does-not-exist.toml");

    let result = manifest::load_roster(&path);
    assert!(matches!(result, Err(GradusError::IoError(_))));
}

#[test]
fn directory_path_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");

    let result = manifest::load_roster(dir.path());
    assert!(matches!(result, Err(GradusError::IoError(_))));
}

#[test]
fn parse_and_convert_are_separable() {
    let manifest = Manifest::parse(SAMPLE).expect("parse");
    assert_eq!(manifest.programs.len(), 2);

    let roster = manifest.into_roster().expect("roster");
    assert_eq!(
        roster.stage(StageId(10)).expect("stage").name,
        "Ownership"
    );
}
