//! # gradus-core
//!
//! The deterministic Stage Unlock Engine for Gradus - THE LOGIC.
//!
//! Gradus organizes learning content into Programs, composed of ordered
//! Stages, composed of ordered Units. This crate decides, for a given learner
//! and a given Stage, whether that Stage is currently accessible.
//!
//! ## Design
//!
//! The unlock decision is a pure, deterministic function of stored facts:
//! a per-Program policy toggle, a per-Stage delay, the learner's per-Stage
//! effective start date, and an explicitly injected "today". It is never
//! persisted as a trusted flag and never derived from a hidden clock, so it
//! cannot go stale, and decisions for different learners are fully
//! independent.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Has NO async, NO network dependencies, NO I/O (pure Rust)
//! - Reads configuration and progress through collaborator traits only
//! - Never mutates learner records; effective start dates are written by the
//!   surrounding platform and only read here
//! - Never caches a decision; unlock state is recomputed on every query

// =============================================================================
// MODULES
// =============================================================================

pub mod decision;
pub mod engine;
pub mod policy;
pub mod readers;
pub mod roster;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{DelayDays, GradusError, LearnerId, Program, ProgramId, Stage, StageId};

// =============================================================================
// RE-EXPORTS: Unlock Engine
// =============================================================================

pub use decision::{evaluate, is_stage_unlocked, unlock_date};
pub use engine::{StageAccess, UnlockEngine};
pub use policy::UnlockPolicy;
pub use readers::{PolicyReader, ProgressReader};
pub use roster::Roster;
