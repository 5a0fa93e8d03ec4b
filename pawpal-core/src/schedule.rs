//! Schedule output types.
//!
//! A `Schedule` is built once per planning run and never edited in place; to
//! replan, run the scheduler again. Serialized with serde for presentation and
//! export (JSON in the CLI).

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::conflicts::{detect_conflicts, ConflictReport};
use crate::task::Task;

pub(crate) const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A task placed on the day's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub task: Task,
    pub scheduled_time: NaiveTime,
    /// 0-based position in the schedule.
    pub order_index: usize,
    pub reasoning: String,
}

impl ScheduledTask {
    pub fn new(task: Task, scheduled_time: NaiveTime, order_index: usize) -> Self {
        Self {
            task,
            scheduled_time,
            order_index,
            reasoning: String::new(),
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Clock time the slot ends. Wraps past midnight.
    pub fn end_time(&self) -> NaiveTime {
        self.scheduled_time
            .overflowing_add_signed(Duration::minutes(self.task.duration_minutes as i64))
            .0
    }

    /// Start as seconds since midnight.
    pub fn start_second(&self) -> i64 {
        self.scheduled_time.num_seconds_from_midnight() as i64
    }

    /// End as seconds since midnight. Not wrapped, so a slot running past
    /// midnight ends after `SECONDS_PER_DAY`.
    pub fn end_second(&self) -> i64 {
        self.start_second() + self.task.duration_minutes as i64 * 60
    }

    /// Half-open `[start, end)` overlap with `other`, in seconds since this
    /// slot's midnight. A slot running past midnight also covers the early
    /// hours of the same timeline, so `other` is tried a day later and a day
    /// earlier too.
    pub fn overlap_with(&self, other: &ScheduledTask) -> Option<(i64, i64)> {
        [0, SECONDS_PER_DAY, -SECONDS_PER_DAY].into_iter().find_map(|shift| {
            let start = self.start_second().max(other.start_second() + shift);
            let end = self.end_second().min(other.end_second() + shift);
            (start < end).then_some((start, end))
        })
    }

    pub fn conflicts_with(&self, other: &ScheduledTask) -> bool {
        self.overlap_with(other).is_some()
    }
}

/// A candidate the scheduler could not fit, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledTask {
    pub task: Task,
    pub reasoning: String,
}

/// One planning run's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub date: NaiveDate,
    /// Scheduling order.
    pub scheduled_tasks: Vec<ScheduledTask>,
    /// Rejected for budget reasons, in the order they were considered.
    pub unscheduled: Vec<UnscheduledTask>,
    pub available_time_minutes: i32,
    pub total_time_minutes: i32,
    pub utilization_percentage: f64,
    pub explanation: String,
}

impl Schedule {
    /// Assemble a schedule and derive its metrics and explanation.
    pub fn new(
        date: NaiveDate,
        available_time_minutes: i32,
        scheduled_tasks: Vec<ScheduledTask>,
        unscheduled: Vec<UnscheduledTask>,
    ) -> Self {
        let mut schedule = Self {
            date,
            scheduled_tasks,
            unscheduled,
            available_time_minutes,
            total_time_minutes: 0,
            utilization_percentage: 0.0,
            explanation: String::new(),
        };
        schedule.total_time_minutes = schedule.calculate_total_time();
        schedule.utilization_percentage = schedule.calculate_utilization(available_time_minutes);
        schedule.explanation = schedule.generate_explanation();
        schedule
    }

    pub fn calculate_total_time(&self) -> i32 {
        self.scheduled_tasks
            .iter()
            .map(|st| st.task.duration_minutes)
            .sum()
    }

    /// Percent of `available_time` used; 0 when nothing was available.
    pub fn calculate_utilization(&self, available_time: i32) -> f64 {
        if available_time <= 0 {
            return 0.0;
        }
        100.0 * self.calculate_total_time() as f64 / available_time as f64
    }

    pub fn unscheduled_tasks(&self) -> impl Iterator<Item = &Task> {
        self.unscheduled.iter().map(|u| &u.task)
    }

    pub fn candidate_count(&self) -> usize {
        self.scheduled_tasks.len() + self.unscheduled.len()
    }

    pub fn remaining_minutes(&self) -> i32 {
        (self.available_time_minutes - self.total_time_minutes).max(0)
    }

    /// When the last slot ends, if anything was scheduled.
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.scheduled_tasks
            .iter()
            .max_by_key(|st| st.end_second())
            .map(ScheduledTask::end_time)
    }

    pub fn conflicts(&self) -> Vec<ConflictReport> {
        detect_conflicts(&self.scheduled_tasks)
    }

    /// True when no two slots overlap.
    pub fn validate(&self) -> bool {
        self.conflicts().is_empty()
    }

    pub fn generate_explanation(&self) -> String {
        let total = self.candidate_count();
        if total == 0 {
            return format!("No tasks to schedule for {}.", self.date);
        }

        if self.available_time_minutes <= 0 {
            return format!(
                "No time available on {}: all {} task(s) left unscheduled because the budget is 0 minutes.",
                self.date, total
            );
        }

        let mut out = format!(
            "Scheduled {} of {} task(s) on {}, using {} of {} minutes ({:.1}% utilization).",
            self.scheduled_tasks.len(),
            total,
            self.date,
            self.total_time_minutes,
            self.available_time_minutes,
            self.utilization_percentage
        );

        if let (Some(first), Some(end)) = (self.scheduled_tasks.first(), self.end_time()) {
            out.push_str(&format!(
                " Care runs {}-{}.",
                first.scheduled_time.format("%H:%M"),
                end.format("%H:%M")
            ));
        }

        if self.unscheduled.is_empty() {
            out.push_str(" Everything fit.");
        } else {
            let skipped: Vec<&str> = self.unscheduled_tasks().map(|t| t.title.as_str()).collect();
            out.push_str(&format!(
                " {} task(s) did not fit after higher-priority work: {}.",
                skipped.len(),
                skipped.join(", ")
            ));
        }

        out
    }
}
