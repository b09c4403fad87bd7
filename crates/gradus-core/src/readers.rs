//! # Collaborator Interfaces
//!
//! The two read-only boundaries the engine depends on: Stage configuration
//! and learner progress. Both are traits so that the surrounding platform's
//! stores (database-backed, remote, in-memory) can plug in without the engine
//! knowing their shape.
//!
//! # Consistency Precondition
//!
//! Implementations must answer each call from a consistent snapshot of their
//! store: two reads serving one decision must not observe a half-applied
//! configuration edit. The engine documents this precondition but cannot
//! enforce it.

use crate::policy::UnlockPolicy;
use crate::types::{GradusError, LearnerId, StageId};
use chrono::NaiveDate;

/// Program/Stage configuration reader.
///
/// Resolves the unlock policy in effect for a Stage, combining the owning
/// Program's toggle with the Stage's configured delay.
pub trait PolicyReader {
    /// Resolve the unlock policy for a Stage.
    ///
    /// Returns `GradusError::StageNotFound` (or `ProgramNotFound`) when the
    /// catalog has no such record.
    fn unlock_policy(&self, stage: StageId) -> Result<UnlockPolicy, GradusError>;
}

/// Learner progress reader — the Stage Clock.
///
/// Answers the per-(Learner, Stage) effective start date: the date from
/// which that learner's delay is measured. How the date was derived
/// (prior-stage completion, enrollment) is the platform's business; the
/// engine treats it as an opaque stored fact.
pub trait ProgressReader {
    /// Get the effective start date for a learner in a stage.
    ///
    /// `Ok(None)` means no progress record exists yet. Whether that is an
    /// error depends on the policy in effect, so the distinction is left to
    /// the decision layer.
    fn effective_start(
        &self,
        learner: LearnerId,
        stage: StageId,
    ) -> Result<Option<NaiveDate>, GradusError>;
}
