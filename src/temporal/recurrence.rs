//! Recurrence pattern parsing.
//!
//! Two grammars are accepted, both case-insensitive and whitespace-trimmed:
//! the canonical single-word tokens (`daily`, `weekly`, `biweekly`,
//! `monthly`, `quarterly`, `yearly`) and the two-token ordinal phrase
//! `{first..fifth|1st..5th} {full weekday name}` (e.g. "second saturday").
//! Anything else parses to [`RecurrencePattern::Unknown`], which is a
//! valid value rather than an error; callers that require a known pattern
//! check for it explicitly.

use std::fmt;

use chrono::Weekday;

/// How a task's due date advances after completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    Yearly,
    /// The n-th (1..=5) occurrence of a weekday each month.
    NthWeekday { n: u8, weekday: Weekday },
    /// No known token or phrase matched.
    Unknown,
}

impl RecurrencePattern {
    /// Parse a frequency token or ordinal+weekday phrase.
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();
        match normalized.as_str() {
            "daily" => RecurrencePattern::Daily,
            "weekly" => RecurrencePattern::Weekly,
            "biweekly" => RecurrencePattern::BiWeekly,
            "monthly" => RecurrencePattern::Monthly,
            "quarterly" => RecurrencePattern::Quarterly,
            "yearly" => RecurrencePattern::Yearly,
            other => parse_ordinal_phrase(other).unwrap_or(RecurrencePattern::Unknown),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, RecurrencePattern::Unknown)
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrencePattern::Daily => f.write_str("daily"),
            RecurrencePattern::Weekly => f.write_str("weekly"),
            RecurrencePattern::BiWeekly => f.write_str("biweekly"),
            RecurrencePattern::Monthly => f.write_str("monthly"),
            RecurrencePattern::Quarterly => f.write_str("quarterly"),
            RecurrencePattern::Yearly => f.write_str("yearly"),
            RecurrencePattern::NthWeekday { n, weekday } => {
                write!(f, "{} {}", ordinal_name(*n), weekday_name(*weekday))
            }
            RecurrencePattern::Unknown => f.write_str("unknown"),
        }
    }
}

/// Scan a task's display name for a recurrence phrase embedded in its last
/// parenthesized group, e.g. `"Budget review (second saturday)"`.
///
/// Runs the ordinal+weekday grammar against the text between the final
/// matching `(` and `)`. Returns `Unknown` when there is no parenthesized
/// group or its contents match nothing.
pub fn extract_embedded_pattern(display_name: &str) -> RecurrencePattern {
    let Some(close) = display_name.rfind(')') else {
        return RecurrencePattern::Unknown;
    };
    let Some(open) = display_name[..close].rfind('(') else {
        return RecurrencePattern::Unknown;
    };
    let inner = display_name[open + 1..close].trim().to_lowercase();
    parse_ordinal_phrase(&inner).unwrap_or(RecurrencePattern::Unknown)
}

/// Match exactly two whitespace-separated tokens: `{ordinal} {weekday}`.
/// Input must already be lowercased.
fn parse_ordinal_phrase(text: &str) -> Option<RecurrencePattern> {
    let mut words = text.split_whitespace();
    let ordinal = words.next()?;
    let weekday = words.next()?;
    if words.next().is_some() {
        return None;
    }

    let n = parse_ordinal(ordinal)?;
    let weekday = parse_weekday(weekday)?;
    Some(RecurrencePattern::NthWeekday { n, weekday })
}

fn parse_ordinal(word: &str) -> Option<u8> {
    match word {
        "first" | "1st" => Some(1),
        "second" | "2nd" => Some(2),
        "third" | "3rd" => Some(3),
        "fourth" | "4th" => Some(4),
        "fifth" | "5th" => Some(5),
        _ => None,
    }
}

/// Match a full English weekday name (already lowercased). Abbreviations
/// are deliberately not accepted.
pub(crate) fn parse_weekday(word: &str) -> Option<Weekday> {
    match word {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

pub(crate) fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn ordinal_name(n: u8) -> &'static str {
    match n {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        _ => "fifth",
    }
}
