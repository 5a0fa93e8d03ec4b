//! Owner preferences consumed by the scheduler.

use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task, TaskCategory};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerPreferences {
    /// Tasks below this priority never become candidates.
    pub priority_threshold: Priority,

    /// Soft hint: order equal-priority tasks by `preferred_task_order`.
    pub group_similar_tasks: bool,

    pub preferred_task_order: Vec<TaskCategory>,
}

impl Default for OwnerPreferences {
    fn default() -> Self {
        Self {
            priority_threshold: Priority::Low,
            group_similar_tasks: false,
            preferred_task_order: Vec::new(),
        }
    }
}

impl OwnerPreferences {
    /// True when the task clears the priority threshold.
    pub fn admits(&self, task: &Task) -> bool {
        task.priority >= self.priority_threshold
    }

    /// Position of `category` in the preferred order. Unlisted categories
    /// share the rank just past the end of the list.
    pub fn category_rank(&self, category: TaskCategory) -> usize {
        self.preferred_task_order
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.preferred_task_order.len())
    }

    pub fn should_group_tasks(&self, a: &Task, b: &Task) -> bool {
        self.group_similar_tasks && a.category == b.category
    }
}
