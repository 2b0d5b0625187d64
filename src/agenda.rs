//! Calendar event roster and the day-by-day agenda built from it.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::{format_clock_time, format_date_with_weekday};
use crate::temporal::{CalendarEvent, EventStatus, classify, event_date};

/// A calendar event with its descriptive fields. The time window is
/// flattened so TOML entries read naturally:
///
/// ```toml
/// [[event]]
/// summary = "Dentist"
/// start = "2026-02-10T14:00:00-05:00"
/// end = "2026-02-10T15:00:00-05:00"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub window: CalendarEvent,
}

/// All known events, in no particular order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRoster {
    #[serde(default, rename = "event")]
    pub events: Vec<Event>,
}

/// One event after classification against the current moment.
#[derive(Debug, Clone, Serialize)]
pub struct AgendaEntry {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<chrono::FixedOffset>>,
}

/// Entries for a single calendar day, in start order.
#[derive(Debug, Clone, Serialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub entries: Vec<AgendaEntry>,
}

/// The full agenda, days in ascending order.
#[derive(Debug, Clone, Serialize)]
pub struct Agenda {
    pub days: Vec<AgendaDay>,
}

impl Agenda {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Classify every event against `now` and group the results by day.
/// Within a day, all-day entries come first, then timed entries by
/// start time.
pub fn build_agenda(roster: &EventRoster, now: DateTime<Tz>) -> Agenda {
    let tz = now.timezone();
    let mut keyed: Vec<(NaiveDate, i64, AgendaEntry)> = roster
        .events
        .iter()
        .map(|event| {
            let classification = classify(&event.window, now);
            let date = event_date(&event.window, tz);
            let (sort_key, start) = match &event.window {
                CalendarEvent::AllDay { .. } => (i64::MIN, None),
                CalendarEvent::Timed { start, .. } => (start.timestamp(), Some(*start)),
            };
            let entry = AgendaEntry {
                summary: event.summary.clone(),
                location: event.location.clone(),
                status: classification.status,
                detail: classification.detail,
                start,
            };
            (date, sort_key, entry)
        })
        .collect();

    keyed.sort_by_key(|(date, sort_key, _)| (*date, *sort_key));

    let mut days: Vec<AgendaDay> = Vec::new();
    for (date, _, entry) in keyed {
        match days.last_mut() {
            Some(day) if day.date == date => day.entries.push(entry),
            _ => days.push(AgendaDay {
                date,
                entries: vec![entry],
            }),
        }
    }
    Agenda { days }
}

/// Compact text rendering, one block per day.
pub fn format_agenda(agenda: &Agenda, tz: Tz) -> String {
    if agenda.is_empty() {
        return "No events on the calendar.".to_string();
    }

    let mut out = String::new();
    for day in &agenda.days {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format_date_with_weekday(day.date));
        out.push('\n');
        for entry in &day.entries {
            let when = match entry.start {
                Some(start) => format_clock_time(start.with_timezone(&tz)),
                None => "all day".to_string(),
            };
            out.push_str(&format!("  {:>8}  {}", when, entry.summary));
            if let Some(location) = &entry.location {
                out.push_str(&format!(" @ {location}"));
            }
            if !entry.detail.is_empty() {
                out.push_str(&format!(" ({})", entry.detail));
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use chrono_tz::America::New_York;

    fn timed(summary: &str, start: &str, end: &str) -> Event {
        Event {
            summary: summary.to_string(),
            location: None,
            window: CalendarEvent::Timed {
                start: DateTime::<FixedOffset>::parse_from_rfc3339(start).unwrap(),
                end: DateTime::<FixedOffset>::parse_from_rfc3339(end).unwrap(),
            },
        }
    }

    fn all_day(summary: &str, date: NaiveDate) -> Event {
        Event {
            summary: summary.to_string(),
            location: None,
            window: CalendarEvent::AllDay { date },
        }
    }

    fn now() -> DateTime<Tz> {
        // 2026-02-10 14:13 Eastern, a Tuesday
        New_York.with_ymd_and_hms(2026, 2, 10, 14, 13, 0).unwrap()
    }

    #[test]
    fn agenda_groups_by_day_and_sorts_within() {
        let roster = EventRoster {
            events: vec![
                timed(
                    "Dentist",
                    "2026-02-11T09:00:00-05:00",
                    "2026-02-11T10:00:00-05:00",
                ),
                timed(
                    "Standup",
                    "2026-02-10T14:00:00-05:00",
                    "2026-02-10T14:30:00-05:00",
                ),
                all_day("Conference", NaiveDate::from_ymd_opt(2026, 2, 11).unwrap()),
            ],
        };

        let agenda = build_agenda(&roster, now());
        assert_eq!(agenda.days.len(), 2);
        assert_eq!(agenda.days[0].entries[0].summary, "Standup");
        // All-day entries sort before timed ones on the same day
        assert_eq!(agenda.days[1].entries[0].summary, "Conference");
        assert_eq!(agenda.days[1].entries[1].summary, "Dentist");
    }

    #[test]
    fn in_progress_event_carries_detail() {
        let roster = EventRoster {
            events: vec![timed(
                "Standup",
                "2026-02-10T14:00:00-05:00",
                "2026-02-10T14:30:00-05:00",
            )],
        };
        let agenda = build_agenda(&roster, now());
        let entry = &agenda.days[0].entries[0];
        assert_eq!(entry.status, EventStatus::InProgress);
        assert_eq!(entry.detail, "started 13 min ago");
    }

    #[test]
    fn format_renders_times_and_locations() {
        let mut event = timed(
            "Standup",
            "2026-02-10T14:00:00-05:00",
            "2026-02-10T14:30:00-05:00",
        );
        event.location = Some("Room 4".to_string());
        let roster = EventRoster {
            events: vec![event],
        };
        let text = format_agenda(&build_agenda(&roster, now()), New_York);
        assert!(text.contains("2026-02-10 (Tuesday)"));
        assert!(text.contains("2:00 pm  Standup @ Room 4 (started 13 min ago)"));
    }

    #[test]
    fn empty_roster_formats_to_placeholder() {
        let agenda = build_agenda(&EventRoster::default(), now());
        assert!(agenda.is_empty());
        assert_eq!(format_agenda(&agenda, New_York), "No events on the calendar.");
    }

    #[test]
    fn event_roster_toml_round_trip() {
        let text = r#"
[[event]]
summary = "Dentist"
start = "2026-02-10T14:00:00-05:00"
end = "2026-02-10T15:00:00-05:00"

[[event]]
summary = "Holiday"
date = "2026-02-16"
"#;
        let roster: EventRoster = toml::from_str(text).unwrap();
        assert_eq!(roster.events.len(), 2);
        assert!(matches!(roster.events[0].window, CalendarEvent::Timed { .. }));
        assert!(matches!(roster.events[1].window, CalendarEvent::AllDay { .. }));
    }
}
