//! Nth-weekday-of-month resolution.
//!
//! `nth_weekday_of_month` answers "does this date exist" and fails with
//! [`TemporalError::NoSuchOccurrence`] rather than wrapping into an
//! adjacent month. Callers that want rollover use
//! [`next_nth_weekday_after`], which searches forward month by month.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::temporal::error::TemporalError;

/// Upper bound on the forward month search in [`next_nth_weekday_after`].
///
/// For n <= 4 the first month always has an occurrence; only n = 5 can
/// miss, and never for 12 consecutive months, so the cap is a terminator
/// rather than a bound that is expected to be reached.
const MONTH_SEARCH_CAP: u32 = 12;

/// Return the date of the `n`-th occurrence (1-indexed) of `weekday`
/// within `(year, month)`.
///
/// Locates the first occurrence of `weekday` on or after the 1st of the
/// month, then advances `n - 1` whole weeks. If the resulting date falls
/// outside the requested month the occurrence does not exist and
/// `NoSuchOccurrence` is returned; the result is never clamped.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    n: u8,
    weekday: Weekday,
) -> Result<NaiveDate, TemporalError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TemporalError::InvalidDate(format!("{year:04}-{month:02}-01")))?;

    if !(1..=5).contains(&n) {
        return Err(TemporalError::NoSuchOccurrence {
            year,
            month,
            n,
            weekday,
        });
    }

    let offset = (weekday.num_days_from_monday() as i64
        - first.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    let date = first + Duration::days(offset + 7 * (i64::from(n) - 1));

    if date.month() == month {
        Ok(date)
    } else {
        Err(TemporalError::NoSuchOccurrence {
            year,
            month,
            n,
            weekday,
        })
    }
}

/// Return the nearest date strictly after `after` on which the `n`-th
/// `weekday` of some month occurs.
///
/// Searches month by month starting from the month following `after`'s
/// month, up to [`MONTH_SEARCH_CAP`] months ahead. The final
/// `NoSuchOccurrence` is propagated if the whole window is exhausted.
pub fn next_nth_weekday_after(
    after: NaiveDate,
    n: u8,
    weekday: Weekday,
) -> Result<NaiveDate, TemporalError> {
    let mut year = after.year();
    let mut month = after.month();
    let mut last_miss = TemporalError::NoSuchOccurrence {
        year,
        month,
        n,
        weekday,
    };

    for _ in 0..MONTH_SEARCH_CAP {
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }

        match nth_weekday_of_month(year, month, n, weekday) {
            Ok(date) => return Ok(date),
            Err(err @ TemporalError::NoSuchOccurrence { .. }) => last_miss = err,
            Err(err) => return Err(err),
        }
    }

    Err(last_miss)
}
