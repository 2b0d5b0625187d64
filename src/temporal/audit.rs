//! Weekly and monthly audit checkpoint tracking.
//!
//! The tracker is pure: due-ness is a function of `(state, now)` and
//! completion produces an updated state. Persisting the state is the
//! caller's job.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Day-of-month gate for the monthly checkpoint: it only comes due during
/// the first week of a month.
pub const MONTHLY_FIRST_WEEK_DAYS: u32 = 7;

/// Minimum whole days between weekly checkpoint completions.
pub const WEEKLY_INTERVAL_DAYS: i64 = 7;

/// Last-completed timestamps for the two periodic checkpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_weekly: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_monthly: Option<DateTime<FixedOffset>>,
}

/// Whole days since the last weekly completion, in `now`'s timezone.
/// `None` when the weekly checkpoint has never been recorded.
pub fn days_since_weekly(state: &AuditState, now: DateTime<Tz>) -> Option<i64> {
    let last = local_date(state.last_weekly?, now);
    Some(now.date_naive().signed_duration_since(last).num_days())
}

/// The weekly checkpoint is due when never recorded or when at least
/// seven whole days have passed (boundary inclusive).
pub fn is_weekly_due(state: &AuditState, now: DateTime<Tz>) -> bool {
    match days_since_weekly(state, now) {
        None => true,
        Some(days) => days >= WEEKLY_INTERVAL_DAYS,
    }
}

/// The monthly checkpoint is due only during the first week of a month,
/// and only if the last completion happened in a different calendar
/// month. Identity of month, not elapsed days: a completion on the last
/// day of January is due again on February 1st, while one on February 2nd
/// waits for March.
pub fn is_monthly_due(state: &AuditState, now: DateTime<Tz>) -> bool {
    let today = now.date_naive();
    if today.day() > MONTHLY_FIRST_WEEK_DAYS {
        return false;
    }
    match state.last_monthly {
        None => true,
        Some(last) => {
            let last = local_date(last, now);
            (last.year(), last.month()) != (today.year(), today.month())
        }
    }
}

/// Record a weekly completion at `now`.
pub fn record_weekly(state: &AuditState, now: DateTime<Tz>) -> AuditState {
    AuditState {
        last_weekly: Some(now.fixed_offset()),
        ..state.clone()
    }
}

/// Record a monthly completion at `now`.
pub fn record_monthly(state: &AuditState, now: DateTime<Tz>) -> AuditState {
    AuditState {
        last_monthly: Some(now.fixed_offset()),
        ..state.clone()
    }
}

fn local_date(stamp: DateTime<FixedOffset>, now: DateTime<Tz>) -> NaiveDate {
    stamp.with_timezone(&now.timezone()).date_naive()
}
