//! Work-session tracking with a periodic summary reminder.

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::temporal::AuditState;

/// Minutes of work after which a summary update is considered stale.
pub const SUMMARY_THRESHOLD_MINUTES: i64 = 30;

/// State of the current (or most recent) work session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_start: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_summary_update: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub update_count: u32,
}

/// Result of asking whether a summary update is overdue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCheck {
    pub active: bool,
    pub minutes_since_update: Option<i64>,
    pub update_due: bool,
}

impl SessionState {
    /// Begin a fresh session at `now`, resetting the update counter.
    pub fn start(now: DateTime<Tz>) -> Self {
        let instant = now.fixed_offset();
        Self {
            session_start: Some(instant),
            last_summary_update: Some(instant),
            update_count: 0,
        }
    }

    /// Record a summary update at `now`.
    pub fn record_update(&self, now: DateTime<Tz>) -> Self {
        Self {
            session_start: self.session_start,
            last_summary_update: Some(now.fixed_offset()),
            update_count: self.update_count + 1,
        }
    }

    /// How the session stands at `now`. A session with no recorded start
    /// is inactive and never due. Minutes are floored; the threshold is
    /// inclusive, so an update is due at exactly thirty minutes.
    pub fn check(&self, now: DateTime<Tz>) -> SessionCheck {
        if self.session_start.is_none() {
            return SessionCheck {
                active: false,
                minutes_since_update: None,
                update_due: false,
            };
        }
        let reference = self.last_summary_update.or(self.session_start);
        let minutes = reference
            .map(|instant| (now.timestamp() - instant.timestamp()) / 60);
        SessionCheck {
            active: true,
            minutes_since_update: minutes,
            update_due: minutes.is_some_and(|m| m >= SUMMARY_THRESHOLD_MINUTES),
        }
    }
}

/// Everything the tracker file persists: audit checkpoints plus session
/// state, so a single load serves both the audit and session commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    #[serde(default)]
    pub audit: AuditState,
    #[serde(default)]
    pub session: SessionState,
}
