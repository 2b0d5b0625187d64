//! Event time classification.
//!
//! Places a single calendar event relative to a reference "now" into one
//! of four states, with a short human-readable elapsed/remaining detail.
//! The state is computed fresh on every call; nothing is stored.

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Minutes before start within which an upcoming event counts as
/// imminent. The boundary is inclusive on the imminent side.
pub const IMMINENT_WINDOW_MINUTES: i64 = 30;

/// A calendar event's time window.
///
/// For `Timed` events `start <= end` is assumed; the classifier does not
/// validate it and its output is undefined when violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalendarEvent {
    AllDay {
        date: NaiveDate,
    },
    Timed {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
}

/// Where an event stands relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Completed,
    InProgress,
    UpcomingImminent,
    UpcomingLater,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub status: EventStatus,
    pub detail: String,
}

impl Classification {
    fn new(status: EventStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

/// Classify an event against `now`.
///
/// All-day events compare calendar dates only, in `now`'s timezone.
/// Timed events compare instants; elapsed and remaining intervals are
/// floored to whole minutes.
pub fn classify(event: &CalendarEvent, now: DateTime<Tz>) -> Classification {
    match event {
        CalendarEvent::AllDay { date } => {
            let today = now.date_naive();
            if *date < today {
                Classification::new(EventStatus::Completed, "")
            } else if *date == today {
                Classification::new(EventStatus::InProgress, "all day")
            } else {
                let days = date.signed_duration_since(today).num_days();
                Classification::new(EventStatus::UpcomingLater, format!("in {days}d"))
            }
        }
        CalendarEvent::Timed { start, end } => {
            let now_ts = now.timestamp();
            if now_ts >= end.timestamp() {
                Classification::new(EventStatus::Completed, "")
            } else if now_ts >= start.timestamp() {
                let elapsed = (now_ts - start.timestamp()) / 60;
                Classification::new(
                    EventStatus::InProgress,
                    format!("started {elapsed} min ago"),
                )
            } else {
                classify_upcoming((start.timestamp() - now_ts) / 60)
            }
        }
    }
}

fn classify_upcoming(minutes_until_start: i64) -> Classification {
    let m = minutes_until_start;
    if m <= IMMINENT_WINDOW_MINUTES {
        Classification::new(EventStatus::UpcomingImminent, format!("in {m} min"))
    } else if m < 60 {
        Classification::new(EventStatus::UpcomingLater, format!("in {m} min"))
    } else {
        let hours = m / 60;
        let rem = m % 60;
        let detail = if rem == 0 {
            format!("in {hours}h")
        } else {
            format!("in {hours}h {rem}m")
        };
        Classification::new(EventStatus::UpcomingLater, detail)
    }
}

/// Calendar date on which an event begins, for day-grouped listings.
pub fn event_date(event: &CalendarEvent, tz: Tz) -> NaiveDate {
    match event {
        CalendarEvent::AllDay { date } => *date,
        CalendarEvent::Timed { start, .. } => start.with_timezone(&tz).date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        New_York.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn timed(start: DateTime<Tz>, end: DateTime<Tz>) -> CalendarEvent {
        CalendarEvent::Timed {
            start: start.fixed_offset(),
            end: end.fixed_offset(),
        }
    }

    #[test]
    fn timed_event_in_progress_reports_elapsed_minutes() {
        let event = timed(local(2026, 2, 10, 14, 0), local(2026, 2, 10, 15, 0));
        let result = classify(&event, local(2026, 2, 10, 14, 13));
        assert_eq!(result.status, EventStatus::InProgress);
        assert_eq!(result.detail, "started 13 min ago");
    }

    #[test]
    fn timed_event_past_end_is_completed() {
        let event = timed(local(2026, 2, 10, 14, 0), local(2026, 2, 10, 15, 0));
        let result = classify(&event, local(2026, 2, 10, 15, 0));
        assert_eq!(result.status, EventStatus::Completed);
        assert_eq!(result.detail, "");
    }

    #[test]
    fn imminent_boundary_is_inclusive_at_thirty_minutes() {
        let event = timed(local(2026, 2, 10, 14, 0), local(2026, 2, 10, 15, 0));

        let at_30 = classify(&event, local(2026, 2, 10, 13, 30));
        assert_eq!(at_30.status, EventStatus::UpcomingImminent);
        assert_eq!(at_30.detail, "in 30 min");

        let at_31 = classify(&event, local(2026, 2, 10, 13, 29));
        assert_eq!(at_31.status, EventStatus::UpcomingLater);
        assert_eq!(at_31.detail, "in 31 min");
    }

    #[test]
    fn sub_hour_and_hour_details() {
        let event = timed(local(2026, 2, 10, 14, 0), local(2026, 2, 10, 15, 0));

        let at_59 = classify(&event, local(2026, 2, 10, 13, 1));
        assert_eq!(at_59.status, EventStatus::UpcomingLater);
        assert_eq!(at_59.detail, "in 59 min");

        let at_60 = classify(&event, local(2026, 2, 10, 13, 0));
        assert_eq!(at_60.detail, "in 1h");

        let at_95 = classify(&event, local(2026, 2, 10, 12, 25));
        assert_eq!(at_95.detail, "in 1h 35m");
    }

    #[test]
    fn elapsed_minutes_are_floored() {
        let event = timed(local(2026, 2, 10, 14, 0), local(2026, 2, 10, 15, 0));
        let now = New_York.with_ymd_and_hms(2026, 2, 10, 14, 4, 59).unwrap();
        assert_eq!(classify(&event, now).detail, "started 4 min ago");
    }

    #[test]
    fn all_day_event_today_is_in_progress() {
        let event = CalendarEvent::AllDay {
            date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        };
        for hour in [0, 12, 23] {
            let result = classify(&event, local(2026, 2, 10, hour, 0));
            assert_eq!(result.status, EventStatus::InProgress);
            assert_eq!(result.detail, "all day");
        }
    }

    #[test]
    fn all_day_event_past_and_future() {
        let event = CalendarEvent::AllDay {
            date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        };

        let past = classify(&event, local(2026, 2, 11, 0, 0));
        assert_eq!(past.status, EventStatus::Completed);
        assert_eq!(past.detail, "");

        let future = classify(&event, local(2026, 2, 7, 22, 0));
        assert_eq!(future.status, EventStatus::UpcomingLater);
        assert_eq!(future.detail, "in 3d");
    }
}
