//! # Roster Module
//!
//! In-memory Program/Stage catalog plus per-learner progress records. The
//! reference implementation of the collaborator interfaces, used by the CLI
//! and by tests.
//!
//! Uses `BTreeMap` throughout for deterministic iteration order.
//!
//! The roster is the only stateful piece of the crate, and its state is the
//! stored facts the decision is computed from — never the decision itself.
//! There is no "unlocked" field anywhere in here.

use crate::policy::UnlockPolicy;
use crate::readers::{PolicyReader, ProgressReader};
use crate::types::{GradusError, LearnerId, Program, ProgramId, Stage, StageId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

// =============================================================================
// ROSTER
// =============================================================================

/// In-memory catalog of programs, stages, and learner progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Programs by id.
    programs: BTreeMap<ProgramId, Program>,
    /// Stages by id.
    stages: BTreeMap<StageId, Stage>,
    /// Effective start dates, keyed per (learner, stage) pair.
    /// Per-pair keys keep learners fully independent of one another.
    starts: BTreeMap<(LearnerId, StageId), NaiveDate>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // CATALOG MUTATION (administrator-side, outside any decision)
    // =========================================================================

    /// Add a program to the catalog.
    ///
    /// Re-adding an existing id replaces the configuration.
    pub fn add_program(&mut self, program: Program) {
        self.programs.insert(program.id, program);
    }

    /// Add a stage to the catalog.
    ///
    /// The owning program must already exist, and no sibling stage may claim
    /// the same position.
    pub fn add_stage(&mut self, stage: Stage) -> Result<(), GradusError> {
        if !self.programs.contains_key(&stage.program) {
            return Err(GradusError::ProgramNotFound(stage.program));
        }
        let collision = self
            .stages
            .values()
            .any(|s| s.program == stage.program && s.position == stage.position && s.id != stage.id);
        if collision {
            return Err(GradusError::DuplicateStagePosition {
                program: stage.program,
                position: stage.position,
            });
        }
        self.stages.insert(stage.id, stage);
        Ok(())
    }

    /// Record a learner's effective start date for a stage.
    ///
    /// First write wins: the date is set once, when the learner becomes
    /// eligible, and a later re-recording cannot move an already-running
    /// clock. The decision path never calls this.
    pub fn record_start(
        &mut self,
        learner: LearnerId,
        stage: StageId,
        date: NaiveDate,
    ) -> Result<(), GradusError> {
        if !self.stages.contains_key(&stage) {
            return Err(GradusError::StageNotFound(stage));
        }
        self.starts.entry((learner, stage)).or_insert(date);
        Ok(())
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Get a program by id.
    pub fn program(&self, id: ProgramId) -> Result<&Program, GradusError> {
        self.programs
            .get(&id)
            .ok_or(GradusError::ProgramNotFound(id))
    }

    /// Get a stage by id.
    pub fn stage(&self, id: StageId) -> Result<&Stage, GradusError> {
        self.stages.get(&id).ok_or(GradusError::StageNotFound(id))
    }

    /// Get a program's stages, sorted by position.
    pub fn stages_in_program(&self, program: ProgramId) -> Result<Vec<&Stage>, GradusError> {
        // Existence check first, so an empty program is distinguishable
        // from an unknown one.
        self.program(program)?;
        let mut stages: Vec<&Stage> = self
            .stages
            .values()
            .filter(|s| s.program == program)
            .collect();
        stages.sort_by_key(|s| s.position);
        Ok(stages)
    }

    /// Number of programs in the catalog.
    #[must_use]
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Number of stages in the catalog.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of recorded (learner, stage) start dates.
    #[must_use]
    pub fn progress_count(&self) -> usize {
        self.starts.len()
    }

    /// Iterate over all programs, in id order.
    pub fn programs(&self) -> impl Iterator<Item = &Program> {
        self.programs.values()
    }
}

// =============================================================================
// COLLABORATOR IMPLEMENTATIONS
// =============================================================================

impl PolicyReader for Roster {
    fn unlock_policy(&self, stage: StageId) -> Result<UnlockPolicy, GradusError> {
        let stage = self.stage(stage)?;
        let program = self.program(stage.program)?;
        Ok(UnlockPolicy::resolve(
            program.delayed_stage_unlock,
            stage.unlock_delay_days,
        ))
    }
}

impl ProgressReader for Roster {
    fn effective_start(
        &self,
        learner: LearnerId,
        stage: StageId,
    ) -> Result<Option<NaiveDate>, GradusError> {
        // Unknown stage is a lookup error; a known stage with no record for
        // this learner is a legitimate None.
        self.stage(stage)?;
        Ok(self.starts.get(&(learner, stage)).copied())
    }
}

// =============================================================================
// TESTS
// =============================================================================
