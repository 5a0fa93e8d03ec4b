//! On-disk state under `~/.pawpal`: the household (owner, pets, tasks) and
//! recurring occurrences waiting for their day.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use pawpal_core::{complete_and_advance, Owner, Task};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the state directory: explicit flag, then `PAWPAL_HOME`, then
/// `$HOME/.pawpal`.
pub fn pawpal_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Ok(dir) = std::env::var("PAWPAL_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pawpal"))
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn household_path(home: &Path) -> PathBuf {
    home.join("household.json")
}

/// A recurring task's next occurrence, parked until `due_on`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredTask {
    pub pet: String,
    pub task: Task,
    pub due_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub owner: Owner,
    #[serde(default)]
    pub deferred: Vec<DeferredTask>,
}

impl Household {
    pub fn new(owner: Owner) -> Self {
        Self {
            owner,
            deferred: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("No household at {}. Run: pawpal init", path.display());
        }
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Mark a pet's task complete. For recurring tasks the fresh occurrence is
    /// parked until its next due date, which is returned.
    pub fn complete_task(&mut self, pet: &str, title: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
        let (next, frequency) = {
            let p = self
                .owner
                .pet_mut(pet)
                .with_context(|| format!("no pet named '{pet}'"))?;
            let task = p
                .task_mut(title)
                .with_context(|| format!("{pet} has no task titled '{title}'"))?;
            if task.is_completed {
                bail!("'{title}' for {pet} is already completed");
            }
            (complete_and_advance(task), task.frequency)
        };

        let Some(next) = next else { return Ok(None) };
        let due_on = frequency
            .next_due_date(today)
            .with_context(|| format!("cannot compute next due date after {today}"))?;

        self.deferred.push(DeferredTask {
            pet: pet.to_string(),
            task: next,
            due_on,
        });
        Ok(Some(due_on))
    }

    /// Move every occurrence due on or before `today` into its pet's task
    /// list. Occurrences for pets that no longer exist are dropped.
    pub fn roll_over(&mut self, today: NaiveDate) -> usize {
        let (due, later): (Vec<_>, Vec<_>) = self.deferred.drain(..).partition(|d| d.due_on <= today);
        self.deferred = later;

        let mut moved = 0;
        for d in due {
            match self.owner.pet_mut(&d.pet) {
                Some(p) => {
                    p.add_task(d.task);
                    moved += 1;
                }
                None => {
                    tracing::warn!(pet = %d.pet, title = %d.task.title, "dropping occurrence for removed pet");
                }
            }
        }
        moved
    }
}
