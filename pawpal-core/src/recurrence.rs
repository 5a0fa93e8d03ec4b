//! Recurrence advancement: turn a completed recurring task into its next,
//! fresh occurrence.
//!
//! The advancer only answers "is this due again, and in what form". Picking
//! the calendar day is left to whoever re-runs the daily plan
//! (`TaskFrequency::next_due_date` is there for that layer).

use crate::task::Task;

/// Next occurrence of `task`, or `None` for one-off or unfinished tasks.
///
/// The returned task is a new value: same title, duration, priority,
/// category, frequency and description, with `is_completed = false`. The
/// original is left untouched so completion history survives.
pub fn advance(task: &Task) -> Option<Task> {
    if !task.is_completed || !task.frequency.is_recurring() {
        return None;
    }

    let mut next = task.clone();
    next.is_completed = false;
    Some(next)
}

/// Mark `task` complete and return its next occurrence, if any.
pub fn complete_and_advance(task: &mut Task) -> Option<Task> {
    task.mark_complete();
    let next = advance(task);
    tracing::debug!(
        title = %task.title,
        frequency = %task.frequency,
        advanced = next.is_some(),
        "task completed"
    );
    next
}
