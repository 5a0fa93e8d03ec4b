//! pawpal-core: task model and scheduling engine for daily pet care planning.
//!
//! Pure and synchronous. A planning run takes tasks, a minute budget, a start
//! time and owner preferences, and returns an immutable `Schedule`.

pub mod collection;
pub mod conflicts;
pub mod error;
pub mod pets;
pub mod preferences;
pub mod recurrence;
pub mod schedule;
pub mod scheduler;
pub mod task;
pub mod time;

pub use collection::{
    aggregate_across, by_category, by_completion, by_priority, sort_by, total_duration, SortKey,
};
pub use conflicts::{detect_conflicts, ConflictReport, ConflictSeverity};
pub use error::{ParseLabelError, ScheduleError};
pub use pets::{Owner, Pet};
pub use preferences::OwnerPreferences;
pub use recurrence::{advance, complete_and_advance};
pub use schedule::{Schedule, ScheduledTask, UnscheduledTask};
pub use scheduler::{compare_candidates, PriorityGreedyScheduler, Scheduler};
pub use task::{Priority, Task, TaskCategory, TaskFrequency};
