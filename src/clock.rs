//! Process-wide notion of "now" in a single configured timezone.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// Fallback when neither `--timezone` nor `PWKM_TIMEZONE` is set.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// A clock fixed to one IANA timezone, sampled once.
///
/// Every date comparison in an invocation happens against the same
/// sampled instant, so a slow invocation cannot observe "today" changing
/// partway through.
#[derive(Debug, Clone)]
pub struct LocalClock {
    now: DateTime<Tz>,
}

impl LocalClock {
    /// Resolve an IANA timezone name and sample the current instant.
    pub fn new(tz_name: &str) -> Result<Self> {
        let tz: Tz = tz_name
            .trim()
            .parse()
            .map_err(|_| anyhow!("invalid timezone id '{}'", tz_name.trim()))?;
        Ok(Self {
            now: Utc::now().with_timezone(&tz),
        })
    }

    /// A clock pinned to an explicit instant, for tests and replays.
    pub fn fixed(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Tz> {
        self.now
    }

    pub fn timezone(&self) -> Tz {
        self.now.timezone()
    }

    /// Today's calendar date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Today's date shifted by `days` (may be negative).
    pub fn add_days(&self, days: i64) -> NaiveDate {
        self.today() + Duration::days(days)
    }

    /// The next occurrence of `target` strictly within the coming seven
    /// days: a target equal to today's weekday resolves to next week.
    pub fn next_weekday(&self, target: Weekday) -> NaiveDate {
        let today = self.today();
        let ahead = (target.num_days_from_monday() as i64
            - today.weekday().num_days_from_monday() as i64)
            .rem_euclid(7);
        let ahead = if ahead == 0 { 7 } else { ahead };
        today + Duration::days(ahead)
    }
}

/// `YYYY-MM-DD (Weekday)`, the toolkit's standard date echo.
pub fn format_date_with_weekday(date: NaiveDate) -> String {
    format!("{} ({})", date.format("%Y-%m-%d"), date.format("%A"))
}

/// `h:mm am/pm` without a leading zero, for report headers.
pub fn format_clock_time(now: DateTime<Tz>) -> String {
    now.format("%I:%M %p")
        .to_string()
        .trim_start_matches('0')
        .to_lowercase()
}
