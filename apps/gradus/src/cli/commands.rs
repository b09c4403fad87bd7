//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! All commands load the roster manifest fresh, assemble engine inputs, and
//! evaluate. The evaluation date is resolved exactly once per invocation,
//! here at the boundary; nothing below this layer reads a clock.

use crate::manifest;
use chrono::{Local, NaiveDate};
use gradus_core::{GradusError, LearnerId, ProgramId, Roster, StageId, UnlockEngine};
use std::path::Path;

// =============================================================================
// INPUT RESOLUTION
// =============================================================================

/// Resolve the evaluation date: an explicit `--today` wins, otherwise the
/// local wall-clock date.
fn resolve_today(today: Option<&str>) -> Result<NaiveDate, GradusError> {
    match today {
        Some(text) => text
            .parse::<NaiveDate>()
            .map_err(|e| GradusError::InvalidDate(format!("'{}': {}", text, e))),
        None => Ok(Local::now().date_naive()),
    }
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show roster summary.
pub fn cmd_status(manifest_path: &Path, json_mode: bool) -> Result<(), GradusError> {
    let roster = manifest::load_roster(manifest_path)?;

    if json_mode {
        let output = serde_json::json!({
            "manifest": manifest_path.to_string_lossy(),
            "program_count": roster.program_count(),
            "stage_count": roster.stage_count(),
            "progress_count": roster.progress_count(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Gradus Roster Status");
    println!("====================");
    println!("Manifest: {:?}", manifest_path);
    println!();
    println!("Programs:         {}", roster.program_count());
    println!("Stages:           {}", roster.stage_count());
    println!("Progress records: {}", roster.progress_count());
    println!();
    for program in roster.programs() {
        let policy = if program.delayed_stage_unlock {
            "delayed unlock"
        } else {
            "immediate unlock"
        };
        println!("  [{}] {} ({})", program.id.0, program.name, policy);
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Decide whether one stage is unlocked for one learner.
pub fn cmd_check(
    manifest_path: &Path,
    json_mode: bool,
    stage: u64,
    learner: u64,
    today: Option<&str>,
) -> Result<(), GradusError> {
    let roster = manifest::load_roster(manifest_path)?;
    let today = resolve_today(today)?;

    let engine = UnlockEngine::new(&roster, &roster);
    let access = engine.stage_access(LearnerId(learner), StageId(stage), today)?;
    let stage_record = roster.stage(StageId(stage))?;

    tracing::debug!(
        stage = stage,
        learner = learner,
        %today,
        unlocked = access.unlocked,
        "unlock decision evaluated"
    );

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&access).unwrap_or_default()
        );
        return Ok(());
    }

    let verdict = if access.unlocked { "UNLOCKED" } else { "LOCKED" };
    println!(
        "Stage '{}' is {} for learner {} on {}",
        stage_record.name, verdict, learner, today
    );
    println!("  Policy:          {}", access.policy);
    if let Some(start) = access.effective_start {
        println!("  Effective start: {}", start);
    }
    if let Some(opens) = access.unlock_date {
        println!("  Unlocks on:      {}", opens);
    }

    Ok(())
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

/// Show access to every stage of a program for one learner.
///
/// Stages with no recorded start date under a delayed policy are reported as
/// "no start recorded" rather than failing the whole report; the learner
/// simply has not reached them yet.
pub fn cmd_report(
    manifest_path: &Path,
    json_mode: bool,
    program: u64,
    learner: u64,
    today: Option<&str>,
) -> Result<(), GradusError> {
    let roster = manifest::load_roster(manifest_path)?;
    let today = resolve_today(today)?;
    let engine = UnlockEngine::new(&roster, &roster);

    let program_record = roster.program(ProgramId(program))?;
    let stages = roster.stages_in_program(ProgramId(program))?;

    let mut rows = Vec::new();
    for stage in &stages {
        let access = match engine.stage_access(LearnerId(learner), stage.id, today) {
            Ok(access) => Some(access),
            Err(GradusError::MissingStartDate { .. }) => None,
            Err(e) => return Err(e),
        };
        rows.push((stage, access));
    }

    if json_mode {
        let output: Vec<serde_json::Value> = rows
            .iter()
            .map(|(stage, access)| match access {
                Some(access) => serde_json::json!({
                    "stage": stage.id.0,
                    "name": stage.name,
                    "position": stage.position,
                    "access": access,
                }),
                None => serde_json::json!({
                    "stage": stage.id.0,
                    "name": stage.name,
                    "position": stage.position,
                    "access": serde_json::Value::Null,
                }),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "Report: '{}', learner {}, evaluated on {}",
        program_record.name, learner, today
    );
    println!();
    for (stage, access) in &rows {
        match access {
            Some(access) if access.unlocked => {
                println!("  {:>3}. {:<30} unlocked", stage.position, stage.name);
            }
            Some(access) => match access.unlock_date {
                Some(opens) => println!(
                    "  {:>3}. {:<30} locked (opens {})",
                    stage.position, stage.name, opens
                ),
                None => println!("  {:>3}. {:<30} locked", stage.position, stage.name),
            },
            None => println!(
                "  {:>3}. {:<30} no start recorded",
                stage.position, stage.name
            ),
        }
    }

    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Parse and validate the roster manifest.
pub fn cmd_validate(manifest_path: &Path, json_mode: bool) -> Result<(), GradusError> {
    let roster: Roster = manifest::load_roster(manifest_path)?;

    if json_mode {
        let output = serde_json::json!({
            "manifest": manifest_path.to_string_lossy(),
            "valid": true,
            "program_count": roster.program_count(),
            "stage_count": roster.stage_count(),
            "progress_count": roster.progress_count(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "Manifest {:?} is valid: {} program(s), {} stage(s), {} progress record(s)",
        manifest_path,
        roster.program_count(),
        roster.stage_count(),
        roster.progress_count()
    );

    Ok(())
}
