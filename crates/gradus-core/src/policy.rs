//! # Unlock Policy
//!
//! The Unlock Policy Resolver: collapses a Program's configuration flag and a
//! Stage's configured delay into a single resolved policy value.
//!
//! Resolution happens once per decision, from a consistent snapshot of the
//! Program/Stage configuration. The resolved value is what flows into the
//! decision function; the raw flag never travels further.

use crate::types::DelayDays;
use serde::{Deserialize, Serialize};

// =============================================================================
// UNLOCK POLICY
// =============================================================================

/// Resolved unlock policy for one Stage, for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockPolicy {
    /// Delayed unlocking is disabled for the owning Program.
    /// The Stage is accessible as soon as it is reachable in sequence.
    Immediate,
    /// Delayed unlocking is enabled: the Stage opens `delay_days` after the
    /// learner's effective start date (inclusive of the unlock date itself).
    Delayed {
        /// The Stage's configured delay.
        delay_days: DelayDays,
    },
}

impl UnlockPolicy {
    /// Resolve a policy from a Program's toggle and a Stage's delay.
    ///
    /// When the toggle is off the Stage's delay is configuration noise and is
    /// deliberately discarded here, so it cannot influence the decision.
    #[must_use]
    pub const fn resolve(delayed_unlock_enabled: bool, delay_days: DelayDays) -> Self {
        if delayed_unlock_enabled {
            Self::Delayed { delay_days }
        } else {
            Self::Immediate
        }
    }

    /// Check whether delayed unlocking is in effect.
    #[must_use]
    pub const fn is_delayed(&self) -> bool {
        matches!(self, Self::Delayed { .. })
    }

    /// Get the configured delay, if delayed unlocking is in effect.
    #[must_use]
    pub const fn delay_days(&self) -> Option<DelayDays> {
        match self {
            Self::Immediate => None,
            Self::Delayed { delay_days } => Some(*delay_days),
        }
    }
}

impl std::fmt::Display for UnlockPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Delayed { delay_days } => write!(f, "delayed by {}", delay_days),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_toggle_resolves_to_immediate() {
        let policy = UnlockPolicy::resolve(false, DelayDays::new(14));
        assert_eq!(policy, UnlockPolicy::Immediate);
        assert!(!policy.is_delayed());
        assert_eq!(policy.delay_days(), None);
    }

    #[test]
    fn enabled_toggle_carries_the_delay() {
        let policy = UnlockPolicy::resolve(true, DelayDays::new(14));
        assert!(policy.is_delayed());
        assert_eq!(policy.delay_days(), Some(DelayDays::new(14)));
    }

    #[test]
    fn zero_delay_is_still_delayed_policy() {
        let policy = UnlockPolicy::resolve(true, DelayDays::ZERO);
        assert!(policy.is_delayed());
        assert_eq!(policy.delay_days(), Some(DelayDays::ZERO));
    }

    #[test]
    fn policy_display() {
        assert_eq!(format!("{}", UnlockPolicy::Immediate), "immediate");
        assert_eq!(
            format!(
                "{}",
                UnlockPolicy::Delayed {
                    delay_days: DelayDays::new(3)
                }
            ),
            "delayed by 3 day(s)"
        );
    }
}
