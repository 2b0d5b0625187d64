//! Report assembly and text rendering for the CLI surface.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::agenda::{Agenda, EventRoster, build_agenda, format_agenda};
use crate::clock::{format_clock_time, format_date_with_weekday};
use crate::session::SessionCheck;
use crate::task::{StatusReport, TaskDigest};
use crate::temporal::audit::{
    MONTHLY_FIRST_WEEK_DAYS, days_since_weekly, is_monthly_due, is_weekly_due,
};
use crate::temporal::AuditState;

/// Snapshot of both periodic checkpoints against a given moment.
#[derive(Debug, Clone, Serialize)]
pub struct AuditCheck {
    pub today: NaiveDate,
    pub weekday: String,
    pub weekly_audit_needed: bool,
    pub days_since_weekly: Option<i64>,
    pub monthly_review_needed: bool,
    pub is_first_week: bool,
}

pub fn audit_check(state: &AuditState, now: DateTime<Tz>) -> AuditCheck {
    let today = now.date_naive();
    AuditCheck {
        today,
        weekday: today.format("%A").to_string(),
        weekly_audit_needed: is_weekly_due(state, now),
        days_since_weekly: days_since_weekly(state, now),
        monthly_review_needed: is_monthly_due(state, now),
        is_first_week: today.day() <= MONTHLY_FIRST_WEEK_DAYS,
    }
}

/// Everything the startup command shows, also serializable for `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct StartupReport {
    pub date: NaiveDate,
    pub weekday: String,
    pub time: String,
    pub status: StatusReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<Agenda>,
    pub audit: AuditCheck,
    pub session: SessionCheck,
}

pub fn startup_report(
    status: StatusReport,
    roster: Option<&EventRoster>,
    audit_state: &AuditState,
    session: SessionCheck,
    now: DateTime<Tz>,
) -> StartupReport {
    StartupReport {
        date: now.date_naive(),
        weekday: now.date_naive().format("%A").to_string(),
        time: format_clock_time(now),
        status,
        agenda: roster.map(|r| build_agenda(r, now)),
        audit: audit_check(audit_state, now),
        session,
    }
}

fn push_bucket(out: &mut String, label: &str, digests: &[TaskDigest]) {
    if digests.is_empty() {
        return;
    }
    out.push_str(label);
    out.push('\n');
    for digest in digests {
        let mut line = format!(
            "  - {} (due: {})",
            digest.name,
            format_date_with_weekday(digest.due_date)
        );
        if let Some(days) = digest.days_overdue {
            line.push_str(&format!(", {days}d overdue"));
        }
        if let Some(frequency) = &digest.frequency {
            line.push_str(&format!(" [{frequency}]"));
        }
        out.push_str(&line);
        out.push('\n');
    }
}

pub fn format_status_report(report: &StatusReport) -> String {
    let mut out = String::new();
    push_bucket(&mut out, "OVERDUE:", &report.overdue);
    push_bucket(&mut out, "Due today:", &report.due_today);
    push_bucket(&mut out, "Due tomorrow:", &report.due_tomorrow);
    push_bucket(&mut out, "Coming up this week:", &report.upcoming);
    if out.is_empty() {
        out.push_str("Nothing due in the next week.\n");
    }
    out
}

pub fn format_audit_check(check: &AuditCheck) -> String {
    let mut out = String::new();
    if check.weekly_audit_needed {
        match check.days_since_weekly {
            Some(days) => out.push_str(&format!(
                "Weekly audit due ({days} days since the last one).\n"
            )),
            None => out.push_str("Weekly audit due (never done).\n"),
        }
    } else if let Some(days) = check.days_since_weekly {
        out.push_str(&format!("Weekly audit done {days} days ago.\n"));
    }
    if check.monthly_review_needed {
        out.push_str("Monthly review due (first week of the month).\n");
    } else if check.is_first_week {
        out.push_str("Monthly review already done this month.\n");
    }
    out
}

fn format_session_check(check: &SessionCheck) -> String {
    if !check.active {
        return "No active session.\n".to_string();
    }
    match (check.update_due, check.minutes_since_update) {
        (true, Some(minutes)) => {
            format!("Session summary overdue ({minutes} min since last update).\n")
        }
        (_, Some(minutes)) => format!("Session active, last update {minutes} min ago.\n"),
        (_, None) => "Session active.\n".to_string(),
    }
}

pub fn format_startup_report(report: &StartupReport, tz: Tz) -> String {
    let mut out = format!(
        "Good day. It is {} {}, {}.\n\n",
        report.weekday,
        report.date.format("%Y-%m-%d"),
        report.time
    );
    out.push_str(&format_status_report(&report.status));
    if let Some(agenda) = &report.agenda {
        out.push('\n');
        out.push_str(&format_agenda(agenda, tz));
    }
    out.push('\n');
    out.push_str(&format_audit_check(&report.audit));
    out.push_str(&format_session_check(&report.session));
    out
}
