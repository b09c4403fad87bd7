//! # Core Type Definitions
//!
//! This module contains all core types for the Gradus stage unlock engine:
//! - Entity identifiers (`ProgramId`, `StageId`, `LearnerId`)
//! - Configuration values (`DelayDays`)
//! - Catalog entities (`Program`, `Stage`)
//! - Error types (`GradusError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Carry no hidden clock or mutable global state
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Operate at whole-day granularity (naive calendar dates only)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ENTITY IDENTIFIERS
// =============================================================================

/// Unique identifier for a Program.
/// A Program is an ordered sequence of Stages with a shared unlock policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub u64);

/// Unique identifier for a Stage within a Program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StageId(pub u64);

/// Stable identifier for a Learner.
/// Learner identity is opaque to the engine; only progress dates matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LearnerId(pub u64);

// =============================================================================
// DELAY DAYS
// =============================================================================

/// Configured unlock delay for a Stage, in whole calendar days.
///
/// Non-negative by construction: an unsigned count cannot encode the
/// invalid-configuration case the caller contract rules out.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct DelayDays(pub u32);

impl DelayDays {
    /// Zero delay: the Stage opens on its effective start date.
    pub const ZERO: Self = Self(0);

    /// Create a new delay from a day count.
    #[must_use]
    pub const fn new(days: u32) -> Self {
        Self(days)
    }

    /// Get the raw day count.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check whether this delay is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for DelayDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} day(s)", self.0)
    }
}

// =============================================================================
// PROGRAM
// =============================================================================

/// A Program: the policy-owning container for an ordered set of Stages.
///
/// Immutable for the duration of any decision query. Editing happens in the
/// surrounding platform, never through the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// The program identifier.
    pub id: ProgramId,
    /// Human-readable program name.
    pub name: String,
    /// Policy toggle: when false, every Stage in the program is accessible
    /// as soon as it is reachable in sequence.
    pub delayed_stage_unlock: bool,
}

impl Program {
    /// Create a new program.
    #[must_use]
    pub fn new(id: ProgramId, name: impl Into<String>, delayed_stage_unlock: bool) -> Self {
        Self {
            id,
            name: name.into(),
            delayed_stage_unlock,
        }
    }
}

// =============================================================================
// STAGE
// =============================================================================

/// A Stage: one step in a Program's ordered sequence.
///
/// Units (lesson content) belong to the content-delivery layer and are not
/// modeled here; the engine only needs the gating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// The stage identifier.
    pub id: StageId,
    /// The program this stage belongs to.
    pub program: ProgramId,
    /// Ordering position among sibling stages (1-based by convention).
    pub position: u32,
    /// Human-readable stage name.
    pub name: String,
    /// Unlock delay, measured from the learner's effective start date.
    /// Meaningful only when the owning program's policy is enabled.
    pub unlock_delay_days: DelayDays,
}

impl Stage {
    /// Create a new stage.
    #[must_use]
    pub fn new(
        id: StageId,
        program: ProgramId,
        position: u32,
        name: impl Into<String>,
        unlock_delay_days: DelayDays,
    ) -> Self {
        Self {
            id,
            program,
            position,
            name: name.into(),
            unlock_delay_days,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Gradus engine.
///
/// - No silent failures: a missing precondition is surfaced, never defaulted
///   to "locked" or "unlocked"
/// - Use `Result<T, GradusError>` for fallible operations
/// - The engine never panics; all errors are recoverable by the caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradusError {
    /// Delayed unlock is enabled but no effective start date was supplied.
    /// Raised by the bare decision function, which has no learner context.
    #[error("delayed unlock requires an effective start date")]
    StartDateRequired,

    /// No effective start date is recorded for this learner and stage.
    /// The engine-level form of `StartDateRequired`, with the record named.
    #[error("no effective start date recorded for learner {learner:?} in stage {stage:?}")]
    MissingStartDate {
        /// The learner whose progress record was absent.
        learner: LearnerId,
        /// The stage being evaluated.
        stage: StageId,
    },

    /// Adding the delay to the start date left the supported calendar range.
    #[error("unlock date out of calendar range: {start} + {delay_days}")]
    UnlockDateOverflow {
        /// The effective start date.
        start: NaiveDate,
        /// The configured delay.
        delay_days: DelayDays,
    },

    /// The requested program is not in the catalog.
    #[error("program not found: {0:?}")]
    ProgramNotFound(ProgramId),

    /// The requested stage is not in the catalog.
    #[error("stage not found: {0:?}")]
    StageNotFound(StageId),

    /// Two stages in the same program claim the same position.
    #[error("duplicate stage position {position} in program {program:?}")]
    DuplicateStagePosition {
        /// The program containing the collision.
        program: ProgramId,
        /// The contested position.
        position: u32,
    },

    /// A date string could not be parsed as a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The roster manifest is malformed or internally inconsistent.
    #[error("manifest error: {0}")]
    ManifestError(String),

    /// An I/O error occurred while reading caller-supplied files.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
