//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use pwkm::clock::LocalClock;
use pwkm::storage::Storage;
use pwkm::task::{Task, TaskBook};
use tempfile::TempDir;

/// A fixed reference moment: Tuesday 2026-02-10, 14:13 Eastern.
pub fn fixed_now() -> DateTime<Tz> {
    New_York.with_ymd_and_hms(2026, 2, 10, 14, 13, 0).unwrap()
}

pub fn fixed_clock() -> LocalClock {
    LocalClock::fixed(fixed_now())
}

/// Storage rooted in a fresh temporary directory.
pub fn temp_storage() -> (Storage, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path());
    (storage, dir)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_task(name: &str, due: Option<NaiveDate>, frequency: Option<&str>) -> Task {
    Task {
        name: name.to_string(),
        due_date: due,
        frequency: frequency.map(str::to_string),
        status: "Pending".to_string(),
        notes: None,
    }
}

/// A small task book spanning every status bucket relative to
/// [`fixed_now`].
pub fn sample_book() -> TaskBook {
    TaskBook {
        tasks: vec![
            make_task("Pay rent", Some(date(2026, 1, 31)), Some("monthly")),
            make_task("Water plants", Some(date(2026, 2, 10)), Some("weekly")),
            make_task("File taxes", Some(date(2026, 2, 11)), None),
            make_task(
                "Budget review (second saturday)",
                Some(date(2026, 2, 14)),
                Some("monthly"),
            ),
        ],
    }
}
