//! Personal task and calendar assistant.
//!
//! The core is a temporal reasoning layer (`temporal`) of pure functions:
//! nth-weekday resolution, recurrence pattern parsing, due-date
//! advancement, event time classification, and audit checkpoint
//! tracking. Around it sit the task book, the calendar agenda, session
//! tracking, TOML persistence, and report assembly for the CLI.
//!
//! # Example
//!
//! ```
//! use pwkm::temporal::{RecurrencePattern, next_due_date};
//! use chrono::NaiveDate;
//!
//! let pattern = RecurrencePattern::parse("Second Saturday");
//! assert_eq!(pattern.to_string(), "second saturday");
//!
//! let due = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
//! let next = next_due_date(due, "monthly", "Pay rent").unwrap();
//! assert_eq!(next, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
//! ```

pub mod agenda;
pub mod clock;
pub mod report;
pub mod session;
pub mod storage;
pub mod task;
pub mod temporal;

pub use agenda::{Agenda, Event, EventRoster, build_agenda, format_agenda};
pub use clock::{DEFAULT_TIMEZONE, LocalClock};
pub use report::{AuditCheck, StartupReport, audit_check, startup_report};
pub use session::{SessionCheck, SessionState, TrackerState};
pub use storage::Storage;
pub use task::{CompletionOutcome, StatusReport, Task, TaskBook};
pub use temporal::TemporalError;
