//! Next-due-date computation for recurring tasks.
//!
//! Combines a task's stored due date, its frequency field, and an optional
//! pattern embedded in its display name. No I/O happens here; the caller
//! persists the returned date and decides the task's new status.

use chrono::{Datelike, Duration, NaiveDate};

use crate::temporal::error::TemporalError;
use crate::temporal::recurrence::{RecurrencePattern, extract_embedded_pattern};
use crate::temporal::weekday::next_nth_weekday_after;

/// Compute the next due date for a task.
///
/// Precedence:
/// 1. A canonical frequency token other than `monthly` advances by its
///    fixed rule (daily +1d, weekly +7d, biweekly +14d, quarterly +3
///    months, yearly +1 year, with day-of-month clamping).
/// 2. `monthly` first tries an ordinal+weekday pattern embedded in the
///    display name; if found, the next such occurrence after the current
///    due date wins. Otherwise +1 calendar month.
/// 3. An ordinal phrase directly in the frequency field is recognized
///    but cannot drive advancement on its own and fails with
///    [`TemporalError::UnknownFrequency`]; text matching no grammar at
///    all fails with [`TemporalError::UnknownRecurrencePattern`].
pub fn next_due_date(
    current_due: NaiveDate,
    frequency_field: &str,
    display_name: &str,
) -> Result<NaiveDate, TemporalError> {
    match RecurrencePattern::parse(frequency_field) {
        RecurrencePattern::Daily => Ok(current_due + Duration::days(1)),
        RecurrencePattern::Weekly => Ok(current_due + Duration::days(7)),
        RecurrencePattern::BiWeekly => Ok(current_due + Duration::days(14)),
        RecurrencePattern::Quarterly => Ok(shift_months(current_due, 3)),
        RecurrencePattern::Yearly => Ok(shift_years(current_due, 1)),
        RecurrencePattern::Monthly => match extract_embedded_pattern(display_name) {
            RecurrencePattern::NthWeekday { n, weekday } => {
                next_nth_weekday_after(current_due, n, weekday)
            }
            _ => Ok(shift_months(current_due, 1)),
        },
        RecurrencePattern::NthWeekday { .. } => Err(TemporalError::UnknownFrequency(
            frequency_field.trim().to_string(),
        )),
        RecurrencePattern::Unknown => Err(TemporalError::UnknownRecurrencePattern(
            frequency_field.trim().to_string(),
        )),
    }
}

/// Add calendar months, clamping the day to the last valid day of the
/// target month (Jan 31 + 1 month = Feb 28/29, never Mar 3).
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;

    while month < 1 {
        month += 12;
        year -= 1;
    }
    while month > 12 {
        month -= 12;
        year += 1;
    }

    let month = month as u32;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Add calendar years with the same day-clamping rule (Feb 29 + 1 year =
/// Feb 28).
pub fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_rules_advance_by_fixed_amounts() {
        let due = date(2026, 1, 10);
        assert_eq!(next_due_date(due, "daily", "x").unwrap(), date(2026, 1, 11));
        assert_eq!(next_due_date(due, "weekly", "x").unwrap(), date(2026, 1, 17));
        assert_eq!(
            next_due_date(due, "biweekly", "x").unwrap(),
            date(2026, 1, 24)
        );
        assert_eq!(
            next_due_date(due, "quarterly", "x").unwrap(),
            date(2026, 4, 10)
        );
        assert_eq!(next_due_date(due, "yearly", "x").unwrap(), date(2027, 1, 10));
    }

    #[test]
    fn monthly_clamps_to_last_day_of_short_month() {
        assert_eq!(
            next_due_date(date(2026, 1, 31), "monthly", "Pay rent").unwrap(),
            date(2026, 2, 28)
        );
        // Leap year keeps the 29th
        assert_eq!(
            next_due_date(date(2028, 1, 31), "monthly", "Pay rent").unwrap(),
            date(2028, 2, 29)
        );
    }

    #[test]
    fn monthly_prefers_embedded_nth_weekday_pattern() {
        let next = next_due_date(
            date(2026, 1, 10),
            "monthly",
            "Budget review (second saturday)",
        )
        .unwrap();
        assert_eq!(next, date(2026, 2, 14));
    }

    #[test]
    fn monthly_without_embedded_pattern_advances_one_month() {
        assert_eq!(
            next_due_date(date(2026, 1, 15), "Monthly", "Pay rent").unwrap(),
            date(2026, 2, 15)
        );
    }

    #[test]
    fn quarterly_clamps_across_short_months() {
        // Nov 30 + 3 months = Feb 28 (2026 is not a leap year)
        assert_eq!(
            next_due_date(date(2025, 11, 30), "quarterly", "x").unwrap(),
            date(2026, 2, 28)
        );
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(
            next_due_date(date(2028, 2, 29), "yearly", "x").unwrap(),
            date(2029, 2, 28)
        );
    }

    #[test]
    fn unmatched_frequency_is_an_unknown_pattern() {
        let err = next_due_date(date(2026, 1, 10), "", "x").unwrap_err();
        assert_eq!(err, TemporalError::UnknownRecurrencePattern(String::new()));

        let err = next_due_date(date(2026, 1, 10), "fortnightly", "x").unwrap_err();
        assert_eq!(
            err,
            TemporalError::UnknownRecurrencePattern("fortnightly".to_string())
        );
    }

    #[test]
    fn ordinal_phrase_as_frequency_is_an_unknown_frequency() {
        // Recognized grammar, but only valid embedded in a name under
        // `monthly`, never as the frequency itself.
        let err = next_due_date(date(2026, 1, 10), "second saturday", "x").unwrap_err();
        assert_eq!(
            err,
            TemporalError::UnknownFrequency("second saturday".to_string())
        );
    }

    #[test]
    fn embedded_pattern_is_ignored_for_non_monthly_frequencies() {
        // The name-embedded pattern only applies under `monthly`.
        assert_eq!(
            next_due_date(date(2026, 1, 10), "weekly", "Review (second saturday)").unwrap(),
            date(2026, 1, 17)
        );
    }

    #[test]
    fn shift_months_handles_year_boundaries() {
        assert_eq!(shift_months(date(2026, 11, 15), 3), date(2027, 2, 15));
        assert_eq!(shift_months(date(2026, 1, 15), -2), date(2025, 11, 15));
    }
}
