//! Error types for the scheduling core.
//!
//! Only caller mistakes are errors here. A task that does not fit the budget
//! is a normal outcome (see `Schedule::unscheduled`), and overlapping slots are
//! reported as data by `conflicts::detect_conflicts`.

/// Invalid input handed to a scheduler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// A task asked for zero or negative minutes.
    #[error("task '{title}' has non-positive duration ({minutes} min)")]
    NonPositiveDuration {
        /// Title of the offending task.
        title: String,
        /// The duration it carried.
        minutes: i32,
    },

    /// A task title was empty or whitespace only.
    #[error("task title must be non-empty")]
    BlankTitle,

    /// The time budget was below zero.
    #[error("available time must be non-negative (got {minutes} min)")]
    NegativeBudget {
        /// The budget that was passed in.
        minutes: i32,
    },
}

/// An enum label that did not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{label}' (expected one of: {expected})")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
    pub expected: &'static str,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, label: &str, expected: &'static str) -> Self {
        Self {
            kind,
            label: label.trim().to_string(),
            expected,
        }
    }
}
