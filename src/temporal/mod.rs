//! Temporal reasoning core: date arithmetic, recurrence parsing, due-date
//! scheduling, event classification, and audit checkpoint tracking.
//!
//! Everything here is a pure function of its inputs. "Now" is supplied by
//! the caller (see [`crate::clock::LocalClock`]) and no I/O happens in
//! this module tree.

pub mod audit;
pub mod classify;
pub mod error;
pub mod recurrence;
pub mod schedule;
pub mod weekday;

pub use audit::AuditState;
pub use classify::{CalendarEvent, Classification, EventStatus, classify, event_date};
pub use error::TemporalError;
pub use recurrence::{RecurrencePattern, extract_embedded_pattern};
pub use schedule::next_due_date;
pub use weekday::{next_nth_weekday_after, nth_weekday_of_month};
