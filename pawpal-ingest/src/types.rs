use pawpal_core::{Owner, Pet, Task};
use serde::{Deserialize, Serialize};

/// One parsed CSV row: a task plus the pet it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedTask {
    pub pet: String,
    pub task: Task,
}

/// A row that could not be turned into a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line in the source file.
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub tasks: Vec<ImportedTask>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    /// Attach every imported task to its pet, creating unknown pets with
    /// species "unknown". Returns how many tasks were added.
    pub fn into_owner_pets(self, owner: &mut Owner) -> usize {
        let count = self.tasks.len();
        for ImportedTask { pet, task } in self.tasks {
            match owner.pet_mut(&pet) {
                Some(p) => p.add_task(task),
                None => {
                    let mut p = Pet::new(pet, "unknown");
                    p.add_task(task);
                    owner.add_pet(p);
                }
            }
        }
        count
    }
}
