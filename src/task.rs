//! Task records and the operations the CLI drives over them.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::temporal::schedule::next_due_date;

/// Window for the "upcoming" bucket in status reports.
const UPCOMING_WINDOW_DAYS: i64 = 7;

/// A single task as stored in the task book.
///
/// `frequency` is kept as the raw text the user entered; it is only
/// interpreted when the task is completed and needs rescheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    /// Closed tasks are excluded from every due/overdue computation.
    pub fn is_closed(&self) -> bool {
        matches!(
            self.status.trim().to_lowercase().as_str(),
            "done" | "complete" | "completed"
        )
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency
            .as_deref()
            .is_some_and(|f| !f.trim().is_empty())
    }
}

/// All tasks, in insertion order (kept stable for TOML diffs).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskBook {
    #[serde(default, rename = "task")]
    pub tasks: Vec<Task>,
}

/// One row of a status report bucket.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDigest {
    pub name: String,
    pub due_date: NaiveDate,
    pub weekday: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
}

/// Open tasks bucketed against a reference date.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub today: NaiveDate,
    pub overdue: Vec<TaskDigest>,
    pub due_today: Vec<TaskDigest>,
    pub due_tomorrow: Vec<TaskDigest>,
    pub upcoming: Vec<TaskDigest>,
}

impl StatusReport {
    pub fn is_all_clear(&self) -> bool {
        self.overdue.is_empty() && self.due_today.is_empty() && self.due_tomorrow.is_empty()
    }
}

/// Outcome of completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Recurring: the due date advanced, the task stays open.
    Rescheduled {
        name: String,
        frequency: String,
        next_due: NaiveDate,
    },
    /// One-shot: the task was marked done.
    Closed { name: String },
}

impl TaskBook {
    /// Bucket open, dated tasks into overdue / today / tomorrow /
    /// upcoming (next 7 days), each bucket sorted by due date.
    pub fn status_report(&self, today: NaiveDate) -> StatusReport {
        let mut report = StatusReport {
            today,
            overdue: Vec::new(),
            due_today: Vec::new(),
            due_tomorrow: Vec::new(),
            upcoming: Vec::new(),
        };

        for task in &self.tasks {
            if task.is_closed() {
                continue;
            }
            let Some(due) = task.due_date else {
                continue;
            };

            let days_out = due.signed_duration_since(today).num_days();
            let digest = TaskDigest {
                name: task.name.clone(),
                due_date: due,
                weekday: due.format("%A").to_string(),
                frequency: task.frequency.clone(),
                days_overdue: (days_out < 0).then_some(-days_out),
            };

            if days_out < 0 {
                report.overdue.push(digest);
            } else if days_out == 0 {
                report.due_today.push(digest);
            } else if days_out == 1 {
                report.due_tomorrow.push(digest);
            } else if days_out <= UPCOMING_WINDOW_DAYS {
                report.upcoming.push(digest);
            }
        }

        report.overdue.sort_by_key(|d| d.due_date);
        report.upcoming.sort_by_key(|d| d.due_date);
        report
    }

    /// Find a single task by case-insensitive substring of its name.
    /// Zero matches and ambiguous matches are both errors; the ambiguity
    /// error lists the candidates so the user can narrow the query.
    pub fn find(&self, query: &str) -> Result<usize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            bail!("empty task query");
        }

        let matches: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => bail!("no task found matching '{}'", query.trim()),
            [index] => Ok(*index),
            many => {
                let listing: Vec<String> = many
                    .iter()
                    .map(|&i| {
                        let t = &self.tasks[i];
                        let due = t
                            .due_date
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "no date".to_string());
                        format!("  - {} (due: {})", t.name, due)
                    })
                    .collect();
                bail!(
                    "multiple tasks match '{}', be more specific:\n{}",
                    query.trim(),
                    listing.join("\n")
                );
            }
        }
    }

    /// Complete the task matching `query`. Recurring tasks advance to
    /// their next due date and stay open; one-shot tasks are marked done.
    pub fn complete(&mut self, query: &str) -> Result<CompletionOutcome> {
        let index = self.find(query)?;
        let task = &mut self.tasks[index];

        match (task.is_recurring(), task.due_date) {
            (true, Some(due)) => {
                let frequency = task.frequency.clone().unwrap_or_default();
                let next = next_due_date(due, &frequency, &task.name)?;
                task.due_date = Some(next);
                Ok(CompletionOutcome::Rescheduled {
                    name: task.name.clone(),
                    frequency,
                    next_due: next,
                })
            }
            _ => {
                task.status = "Done".to_string();
                Ok(CompletionOutcome::Closed {
                    name: task.name.clone(),
                })
            }
        }
    }

    /// Move the task matching `query` to an explicit date. Returns the
    /// task name and its previous due date.
    pub fn reschedule(&mut self, query: &str, new_date: NaiveDate) -> Result<(String, Option<NaiveDate>)> {
        let index = self.find(query)?;
        let task = &mut self.tasks[index];
        let previous = task.due_date.replace(new_date);
        Ok((task.name.clone(), previous))
    }

    /// All tasks sorted by due date (dateless tasks last), for listings.
    pub fn sorted_by_due(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by_key(|t| t.due_date.unwrap_or(NaiveDate::MAX));
        tasks
    }
}
