//! Command-line entry point for the assistant.
//!
//! Every command samples the clock once, loads what it needs from the
//! data directory, and prints either compact text or `--json` output.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Weekday};
use clap::{CommandFactory, Parser, Subcommand};

use pwkm::clock::{LocalClock, format_clock_time, format_date_with_weekday};
use pwkm::report::{audit_check, format_audit_check, format_startup_report, format_status_report, startup_report};
use pwkm::session::SessionState;
use pwkm::storage::Storage;
use pwkm::task::CompletionOutcome;
use pwkm::temporal::audit::{record_monthly, record_weekly};
use pwkm::{DEFAULT_TIMEZONE, build_agenda, format_agenda};

/// Personal task and calendar assistant
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// IANA timezone for all date computations
    #[arg(long, env = "PWKM_TIMEZONE", default_value = DEFAULT_TIMEZONE, global = true)]
    timezone: String,

    /// Directory holding tasks.toml, events.toml and tracker.toml
    #[arg(long, env = "PWKM_DATA_DIR", default_value = ".", global = true)]
    data_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Morning briefing: tasks, agenda, audit and session state
    Startup {
        #[arg(long)]
        json: bool,
        /// Leave calendar events out of the briefing
        #[arg(long)]
        skip_agenda: bool,
    },
    /// Print today's date and the current time
    Today,
    /// Date arithmetic from today
    Date {
        /// Days to add (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        add: Option<i64>,
        /// Next occurrence of a weekday, e.g. "friday"
        #[arg(long)]
        next: Option<String>,
    },
    /// Open tasks bucketed by due date
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Every task, closed ones included, sorted by due date
    List,
    /// Complete a task by name; recurring tasks advance to their next due date
    Complete { name: String },
    /// Move a task to an explicit due date (YYYY-MM-DD)
    Reschedule { name: String, date: NaiveDate },
    /// Calendar events classified against the current time
    Agenda {
        #[arg(long)]
        json: bool,
    },
    /// Weekly and monthly audit checkpoints
    Audit {
        #[command(subcommand)]
        action: AuditAction,
    },
    /// Work-session tracking with a 30-minute summary reminder
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand, Debug)]
enum AuditAction {
    /// Report which checkpoints are due
    Check {
        #[arg(long)]
        json: bool,
    },
    /// Record a completed weekly audit; --monthly also records the monthly review
    Done {
        #[arg(long)]
        monthly: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    Start,
    Update,
    Check {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    let clock = LocalClock::new(&args.timezone)?;
    let storage = Storage::new(&args.data_dir);
    run(args.command, &clock, &storage)
}

fn run(command: Command, clock: &LocalClock, storage: &Storage) -> Result<()> {
    match command {
        Command::Startup { json, skip_agenda } => {
            let book = storage.load_tasks()?;
            let tracker = storage.load_tracker()?;
            let roster = if skip_agenda {
                None
            } else {
                Some(storage.load_events()?)
            };
            let report = startup_report(
                book.status_report(clock.today()),
                roster.as_ref(),
                &tracker.audit,
                tracker.session.check(clock.now()),
                clock.now(),
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_startup_report(&report, clock.timezone()));
            }
        }
        Command::Today => {
            println!(
                "{}, {}",
                format_date_with_weekday(clock.today()),
                format_clock_time(clock.now())
            );
        }
        Command::Date { add, next } => {
            let date = match (add, next) {
                (Some(_), Some(_)) => bail!("--add and --next are mutually exclusive"),
                (Some(days), None) => clock.add_days(days),
                (None, Some(name)) => clock.next_weekday(parse_weekday_arg(&name)?),
                (None, None) => clock.today(),
            };
            println!("{}", format_date_with_weekday(date));
        }
        Command::Status { json } => {
            let report = storage.load_tasks()?.status_report(clock.today());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_status_report(&report));
            }
        }
        Command::List => {
            let book = storage.load_tasks()?;
            if book.tasks.is_empty() {
                println!("No tasks.");
            }
            for task in book.sorted_by_due() {
                let due = task
                    .due_date
                    .map(format_date_with_weekday)
                    .unwrap_or_else(|| "no date".to_string());
                let marker = if task.is_closed() { "x" } else { " " };
                let mut line = format!("[{marker}] {}  (due: {due})", task.name);
                if let Some(frequency) = &task.frequency {
                    line.push_str(&format!(" [{frequency}]"));
                }
                println!("{line}");
            }
        }
        Command::Complete { name } => {
            let mut book = storage.load_tasks()?;
            let outcome = book.complete(&name)?;
            storage.save_tasks(&book, clock.now().fixed_offset())?;
            match outcome {
                CompletionOutcome::Rescheduled {
                    name,
                    frequency,
                    next_due,
                } => println!(
                    "Completed '{name}' [{frequency}]; next due {}",
                    format_date_with_weekday(next_due)
                ),
                CompletionOutcome::Closed { name } => println!("Completed '{name}'."),
            }
        }
        Command::Reschedule { name, date } => {
            let mut book = storage.load_tasks()?;
            let (name, previous) = book.reschedule(&name, date)?;
            storage.save_tasks(&book, clock.now().fixed_offset())?;
            match previous {
                Some(old) => println!(
                    "Moved '{name}' from {old} to {}",
                    format_date_with_weekday(date)
                ),
                None => println!("Scheduled '{name}' for {}", format_date_with_weekday(date)),
            }
        }
        Command::Agenda { json } => {
            let roster = storage.load_events()?;
            let agenda = build_agenda(&roster, clock.now());
            if json {
                println!("{}", serde_json::to_string_pretty(&agenda)?);
            } else {
                print!("{}", format_agenda(&agenda, clock.timezone()));
            }
        }
        Command::Audit { action } => {
            match action {
                AuditAction::Check { json } => {
                    let tracker = storage.load_tracker()?;
                    let check = audit_check(&tracker.audit, clock.now());
                    if json {
                        println!("{}", serde_json::to_string_pretty(&check)?);
                    } else {
                        print!("{}", format_audit_check(&check));
                    }
                }
                AuditAction::Done { monthly } => {
                    let mut tracker = storage.load_tracker()?;
                    // A completion always counts as the weekly audit;
                    // --monthly records the monthly review on top of it.
                    tracker.audit = record_weekly(&tracker.audit, clock.now());
                    if monthly {
                        tracker.audit = record_monthly(&tracker.audit, clock.now());
                    }
                    storage.save_tracker(&tracker)?;
                    if monthly {
                        println!("Weekly audit and monthly review recorded.");
                    } else {
                        println!("Weekly audit recorded.");
                    }
                }
            }
        }
        Command::Session { action } => {
            match action {
                SessionAction::Start => {
                    let mut tracker = storage.load_tracker()?;
                    tracker.session = SessionState::start(clock.now());
                    storage.save_tracker(&tracker)?;
                    println!("Session started at {}.", format_clock_time(clock.now()));
                }
                SessionAction::Update => {
                    let mut tracker = storage.load_tracker()?;
                    if tracker.session.session_start.is_none() {
                        bail!("no active session; run `pwkm session start` first");
                    }
                    tracker.session = tracker.session.record_update(clock.now());
                    storage.save_tracker(&tracker)?;
                    println!(
                        "Summary update #{} recorded.",
                        tracker.session.update_count
                    );
                }
                SessionAction::Check { json } => {
                    let tracker = storage.load_tracker()?;
                    let check = tracker.session.check(clock.now());
                    if json {
                        println!("{}", serde_json::to_string_pretty(&check)?);
                    } else if !check.active {
                        println!("No active session.");
                    } else if check.update_due {
                        println!(
                            "Summary overdue: {} min since last update.",
                            check.minutes_since_update.unwrap_or(0)
                        );
                    } else {
                        println!(
                            "Session active; last update {} min ago.",
                            check.minutes_since_update.unwrap_or(0)
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

fn parse_weekday_arg(name: &str) -> Result<Weekday> {
    name.parse::<Weekday>()
        .ok()
        .with_context(|| format!("unrecognized weekday '{name}'"))
}
