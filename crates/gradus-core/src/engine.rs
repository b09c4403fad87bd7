//! # Unlock Engine
//!
//! Input assembly around the pure decision function: given the two
//! collaborator readers, fetch the policy and the learner's effective start
//! date, then decide.
//!
//! The engine borrows its readers and holds no state of its own. Every query
//! recomputes the decision from stored facts; nothing is cached between
//! calls, so a decision can never go stale and two learners can never couple
//! through it.

use crate::decision;
use crate::policy::UnlockPolicy;
use crate::readers::{PolicyReader, ProgressReader};
use crate::types::{GradusError, LearnerId, StageId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// STAGE ACCESS (derived report row)
// =============================================================================

/// The full picture of one learner's access to one Stage on one date.
///
/// Derived data for display and diagnostics. Recomputed on every query and
/// never persisted — the `unlocked` field here is an output, not a stored
/// fact to be trusted later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAccess {
    /// The stage evaluated.
    pub stage: StageId,
    /// The learner evaluated.
    pub learner: LearnerId,
    /// The policy in effect for the stage.
    pub policy: UnlockPolicy,
    /// The learner's effective start date, if recorded.
    pub effective_start: Option<NaiveDate>,
    /// The date the stage opens for this learner. `None` under an immediate
    /// policy, where no waiting period exists.
    pub unlock_date: Option<NaiveDate>,
    /// Whether the stage is unlocked as of `evaluated_on`.
    pub unlocked: bool,
    /// The "today" the decision was evaluated against.
    pub evaluated_on: NaiveDate,
}

// =============================================================================
// UNLOCK ENGINE
// =============================================================================

/// The Stage Unlock Engine: collaborator reads plus the pure decision.
#[derive(Debug)]
pub struct UnlockEngine<'a, C, P> {
    config: &'a C,
    progress: &'a P,
}

impl<'a, C, P> UnlockEngine<'a, C, P>
where
    C: PolicyReader,
    P: ProgressReader,
{
    /// Create an engine over a configuration reader and a progress reader.
    ///
    /// Both readers may be the same object (the in-memory [`Roster`] plays
    /// both roles).
    ///
    /// [`Roster`]: crate::roster::Roster
    #[must_use]
    pub fn new(config: &'a C, progress: &'a P) -> Self {
        Self { config, progress }
    }

    /// Decide whether a stage is unlocked for a learner on a given date.
    ///
    /// `today` is injected by the caller, never read from a clock here, so
    /// the same query against the same stored facts always answers the same.
    pub fn is_unlocked(
        &self,
        learner: LearnerId,
        stage: StageId,
        today: NaiveDate,
    ) -> Result<bool, GradusError> {
        let policy = self.config.unlock_policy(stage)?;
        let start = self.progress.effective_start(learner, stage)?;

        match decision::evaluate(policy, start, today) {
            // The bare decision has no learner context; attach it here so the
            // caller sees which record was absent.
            Err(GradusError::StartDateRequired) => {
                Err(GradusError::MissingStartDate { learner, stage })
            }
            other => other,
        }
    }

    /// Evaluate a stage fully, returning the derived [`StageAccess`] row.
    pub fn stage_access(
        &self,
        learner: LearnerId,
        stage: StageId,
        today: NaiveDate,
    ) -> Result<StageAccess, GradusError> {
        let policy = self.config.unlock_policy(stage)?;
        let effective_start = self.progress.effective_start(learner, stage)?;

        let unlock_date = match (policy.delay_days(), effective_start) {
            (Some(delay), Some(start)) => Some(decision::unlock_date(start, delay)?),
            _ => None,
        };

        let unlocked = match decision::evaluate(policy, effective_start, today) {
            Err(GradusError::StartDateRequired) => {
                return Err(GradusError::MissingStartDate { learner, stage });
            }
            other => other?,
        };

        Ok(StageAccess {
            stage,
            learner,
            policy,
            effective_start,
            unlock_date,
            unlocked,
            evaluated_on: today,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
