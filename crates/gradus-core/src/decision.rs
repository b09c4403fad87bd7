//! # Unlock Decision Function
//!
//! The pure predicate at the heart of the engine.
//!
//! The decision is a deterministic function of four facts: the resolved
//! policy, the learner's effective start date, the configured delay, and an
//! explicitly injected "today". It performs no I/O, reads no clock, and holds
//! no state, so it is safe to call concurrently and repeatedly for any number
//! of learners.
//!
//! ## Contract
//!
//! - Policy disabled: always unlocked. Sequence reachability is the caller's
//!   concern, not this function's.
//! - Policy enabled: `unlock_date = effective_start + delay_days`, and the
//!   Stage is unlocked iff `today >= unlock_date`. The boundary is inclusive:
//!   the Stage opens **on** the unlock date.
//! - Policy enabled with no effective start date: a caller contract
//!   violation, surfaced as [`GradusError::StartDateRequired`] rather than
//!   defaulted to either answer.

use crate::policy::UnlockPolicy;
use crate::types::{DelayDays, GradusError};
use chrono::{Days, NaiveDate};

// =============================================================================
// UNLOCK DATE
// =============================================================================

/// Compute the calendar date on which a Stage opens.
///
/// Calendar-day arithmetic on naive dates: no timezone, no time-of-day.
/// Fails only if the result would leave chrono's supported date range.
pub fn unlock_date(start: NaiveDate, delay_days: DelayDays) -> Result<NaiveDate, GradusError> {
    start
        .checked_add_days(Days::new(u64::from(delay_days.value())))
        .ok_or(GradusError::UnlockDateOverflow { start, delay_days })
}

// =============================================================================
// DECISION
// =============================================================================

/// Decide whether a Stage is unlocked under a resolved policy.
///
/// `effective_start` is required whenever the policy is delayed; it may be
/// `None` only under [`UnlockPolicy::Immediate`], where it is unused.
pub fn evaluate(
    policy: UnlockPolicy,
    effective_start: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<bool, GradusError> {
    match policy {
        UnlockPolicy::Immediate => Ok(true),
        UnlockPolicy::Delayed { delay_days } => {
            let start = effective_start.ok_or(GradusError::StartDateRequired)?;
            Ok(today >= unlock_date(start, delay_days)?)
        }
    }
}

/// Decide whether a Stage is unlocked from raw configuration values.
///
/// Convenience form of [`evaluate`] taking the Program toggle and Stage delay
/// directly, matching the boundary contract as callers see it.
pub fn is_stage_unlocked(
    delayed_unlock_enabled: bool,
    effective_start: Option<NaiveDate>,
    delay_days: DelayDays,
    today: NaiveDate,
) -> Result<bool, GradusError> {
    evaluate(
        UnlockPolicy::resolve(delayed_unlock_enabled, delay_days),
        effective_start,
        today,
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn disabled_policy_is_always_unlocked() {
        let result = is_stage_unlocked(
            false,
            Some(date(2025, 1, 10)),
            DelayDays::new(5),
            date(2025, 1, 12),
        );
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn disabled_policy_needs_no_start_date() {
        let result = is_stage_unlocked(false, None, DelayDays::new(5), date(2025, 1, 12));
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn locked_before_unlock_date() {
        let result = is_stage_unlocked(
            true,
            Some(date(2025, 1, 10)),
            DelayDays::new(5),
            date(2025, 1, 12),
        );
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn unlocked_on_unlock_date() {
        let result = is_stage_unlocked(
            true,
            Some(date(2025, 1, 10)),
            DelayDays::new(5),
            date(2025, 1, 15),
        );
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn locked_one_day_before_unlock_date() {
        let result = is_stage_unlocked(
            true,
            Some(date(2025, 1, 10)),
            DelayDays::new(5),
            date(2025, 1, 14),
        );
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn zero_delay_unlocks_on_start_date() {
        let result = is_stage_unlocked(
            true,
            Some(date(2025, 1, 10)),
            DelayDays::ZERO,
            date(2025, 1, 10),
        );
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn missing_start_date_is_an_error_not_a_default() {
        let result = is_stage_unlocked(true, None, DelayDays::new(5), date(2025, 1, 15));
        assert_eq!(result, Err(GradusError::StartDateRequired));
    }

    #[test]
    fn unlock_date_adds_calendar_days() {
        assert_eq!(
            unlock_date(date(2025, 1, 10), DelayDays::new(5)),
            Ok(date(2025, 1, 15))
        );
        // Month boundary
        assert_eq!(
            unlock_date(date(2025, 1, 30), DelayDays::new(5)),
            Ok(date(2025, 2, 4))
        );
        // Leap day
        assert_eq!(
            unlock_date(date(2024, 2, 28), DelayDays::new(1)),
            Ok(date(2024, 2, 29))
        );
    }

    #[test]
    fn unlock_date_overflow_is_reported() {
        let start = NaiveDate::MAX;
        let result = unlock_date(start, DelayDays::new(1));
        assert_eq!(
            result,
            Err(GradusError::UnlockDateOverflow {
                start,
                delay_days: DelayDays::new(1),
            })
        );
    }

    #[test]
    fn decision_is_referentially_transparent() {
        let args = (
            true,
            Some(date(2025, 3, 1)),
            DelayDays::new(7),
            date(2025, 3, 5),
        );
        let first = is_stage_unlocked(args.0, args.1, args.2, args.3);
        let second = is_stage_unlocked(args.0, args.1, args.2, args.3);
        assert_eq!(first, second);
    }
}
