use chrono::Weekday;
use thiserror::Error;

/// Errors produced by the temporal reasoning routines.
///
/// All variants are deterministic functions of their inputs, so callers
/// should never retry them without changing the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    /// The requested nth weekday does not exist in the given month
    /// (e.g. the 5th Sunday of a four-Sunday February).
    #[error("{year}-{month:02} has no occurrence #{n} of {weekday}")]
    NoSuchOccurrence {
        year: i32,
        month: u32,
        n: u8,
        weekday: Weekday,
    },

    /// Free-text matched no known recurrence grammar where a known
    /// pattern was required.
    #[error("unrecognized recurrence pattern '{0}'")]
    UnknownRecurrencePattern(String),

    /// The frequency field holds a recognized pattern that cannot drive
    /// due-date advancement (e.g. an ordinal phrase outside `monthly`).
    #[error("unrecognized frequency '{0}'")]
    UnknownFrequency(String),

    /// A date from an external record could not be interpreted.
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
