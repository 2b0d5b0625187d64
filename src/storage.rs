use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use std::fs;
use std::path::{Path, PathBuf};

use crate::agenda::EventRoster;
use crate::session::TrackerState;
use crate::task::TaskBook;

const TASKS_FILE: &str = "tasks.toml";
const EVENTS_FILE: &str = "events.toml";
const TRACKER_FILE: &str = "tracker.toml";
const BACKUP_DIR: &str = "backups";

/// TOML persistence under a single data directory. Missing files load
/// as empty defaults so first run needs no setup.
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.dir.join(TASKS_FILE)
    }

    pub fn load_tasks(&self) -> Result<TaskBook> {
        self.load(TASKS_FILE)
    }

    /// Save the task book, first copying the existing file into
    /// `backups/` with a timestamped name. The backup step is skipped
    /// when there is nothing to back up.
    pub fn save_tasks(&self, book: &TaskBook, now: DateTime<FixedOffset>) -> Result<()> {
        let path = self.tasks_path();
        if path.exists() {
            let backup_dir = self.dir.join(BACKUP_DIR);
            fs::create_dir_all(&backup_dir)
                .with_context(|| format!("creating {}", backup_dir.display()))?;
            let backup = backup_dir.join(format!(
                "tasks-{}.toml",
                now.format("%Y%m%d-%H%M%S")
            ));
            fs::copy(&path, &backup)
                .with_context(|| format!("backing up tasks to {}", backup.display()))?;
        }
        self.save(TASKS_FILE, book)
    }

    pub fn load_events(&self) -> Result<EventRoster> {
        self.load(EVENTS_FILE)
    }

    pub fn save_events(&self, roster: &EventRoster) -> Result<()> {
        self.save(EVENTS_FILE, roster)
    }

    pub fn load_tracker(&self) -> Result<TrackerState> {
        self.load(TRACKER_FILE)
    }

    pub fn save_tracker(&self, state: &TrackerState) -> Result<()> {
        self.save(TRACKER_FILE, state)
    }

    fn load<T>(&self, name: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn save<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.dir.join(name);
        let content = toml::to_string_pretty(value)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
