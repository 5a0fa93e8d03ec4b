//! Pure filter/sort/aggregate helpers over task lists.
//!
//! None of these mutate their input. Filters and sorts borrow; aggregation
//! clones so the result can be handed straight to a scheduler.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLabelError;
use crate::pets::Pet;
use crate::task::{Priority, Task, TaskCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most urgent first.
    Priority,
    /// Shortest first.
    Duration,
    /// Alphabetical by category label.
    Category,
}

impl FromStr for SortKey {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Ok(Self::Priority),
            "duration" => Ok(Self::Duration),
            "category" => Ok(Self::Category),
            _ => Err(ParseLabelError::new(
                "sort key",
                s,
                "priority, duration, category",
            )),
        }
    }
}

pub fn by_priority(tasks: &[Task], priority: Priority) -> Vec<&Task> {
    tasks.iter().filter(|t| t.priority == priority).collect()
}

pub fn by_category(tasks: &[Task], category: TaskCategory) -> Vec<&Task> {
    tasks.iter().filter(|t| t.category == category).collect()
}

pub fn by_completion(tasks: &[Task], completed: bool) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_completed == completed).collect()
}

/// Sort by `key`, breaking ties by title.
pub fn sort_by(tasks: &[Task], key: SortKey) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks.iter().collect();
    out.sort_by(|a, b| {
        let primary = match key {
            SortKey::Priority => b.priority.cmp(&a.priority),
            SortKey::Duration => a.duration_minutes.cmp(&b.duration_minutes),
            SortKey::Category => a.category.label().cmp(b.category.label()),
        };
        primary.then_with(|| title_order(a, b))
    });
    out
}

pub fn total_duration<'a, I>(tasks: I) -> i32
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().map(|t| t.duration_minutes).sum()
}

/// Flatten every pet's tasks, pet order first, then task order. Title
/// collisions across pets are kept.
pub fn aggregate_across(pets: &[Pet]) -> Vec<Task> {
    pets.iter().flat_map(|p| p.tasks.iter().cloned()).collect()
}

pub(crate) fn title_order(a: &Task, b: &Task) -> Ordering {
    a.title.cmp(&b.title)
}
