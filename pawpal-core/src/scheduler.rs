//! Scheduling engine.
//!
//! `Scheduler` is the capability callers depend on; `PriorityGreedyScheduler`
//! is the shipped strategy. Any closure with the same shape also implements
//! the trait, so an alternative algorithm can be dropped in without touching
//! callers.
//!
//! Greedy algorithm (deterministic, single pass, no backtracking):
//! 1) validate every task and the budget, failing fast on bad input
//! 2) drop tasks below the owner's priority threshold
//! 3) sort: priority DESC, then preferred category rank (when grouping),
//!    then duration ASC, then title ASC
//! 4) walk the sorted list once; accept a task when it fits the remaining
//!    budget (inclusive) and ends by midnight, otherwise leave it unscheduled
//!
//! Not optimal: a large early task is never
//! swapped out for several smaller later ones.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::collection::title_order;
use crate::error::ScheduleError;
use crate::preferences::OwnerPreferences;
use crate::schedule::{Schedule, ScheduledTask, UnscheduledTask, SECONDS_PER_DAY};
use crate::task::{Priority, Task, TaskCategory};

pub trait Scheduler {
    fn generate_schedule(
        &self,
        tasks: &[Task],
        available_time_minutes: i32,
        start_time: NaiveTime,
        preferences: &OwnerPreferences,
    ) -> Result<Schedule, ScheduleError>;
}

impl<F> Scheduler for F
where
    F: Fn(&[Task], i32, NaiveTime, &OwnerPreferences) -> Result<Schedule, ScheduleError>,
{
    fn generate_schedule(
        &self,
        tasks: &[Task],
        available_time_minutes: i32,
        start_time: NaiveTime,
        preferences: &OwnerPreferences,
    ) -> Result<Schedule, ScheduleError> {
        self(tasks, available_time_minutes, start_time, preferences)
    }
}

/// Priority-first greedy scheduler for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityGreedyScheduler {
    date: NaiveDate,
}

impl PriorityGreedyScheduler {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Scheduler for PriorityGreedyScheduler {
    fn generate_schedule(
        &self,
        tasks: &[Task],
        available_time_minutes: i32,
        start_time: NaiveTime,
        preferences: &OwnerPreferences,
    ) -> Result<Schedule, ScheduleError> {
        validate_request(tasks, available_time_minutes)?;

        let mut candidates: Vec<&Task> = tasks.iter().filter(|t| preferences.admits(t)).collect();
        candidates.sort_by(|a, b| compare_candidates(a, b, preferences));

        tracing::debug!(
            date = %self.date,
            candidates = candidates.len(),
            below_threshold = tasks.len() - candidates.len(),
            budget = available_time_minutes,
            "generating schedule"
        );

        let mut remaining = available_time_minutes;
        // seconds from `start_time`; slots never run past midnight
        let mut elapsed: i64 = 0;
        let day_start = start_time.num_seconds_from_midnight() as i64;
        let mut scheduled: Vec<ScheduledTask> = Vec::new();
        let mut unscheduled: Vec<UnscheduledTask> = Vec::new();

        for (i, task) in candidates.iter().enumerate() {
            let before_midnight = (SECONDS_PER_DAY - day_start - elapsed) / 60;
            let fits_budget = task.duration_minutes <= remaining;

            if fits_budget && i64::from(task.duration_minutes) <= before_midnight {
                let next_in_line = candidates.get(i + 1).copied();
                let reasoning = accept_reasoning(task, remaining, next_in_line, preferences);
                let cursor = start_time.overflowing_add_signed(Duration::seconds(elapsed)).0;

                scheduled.push(
                    ScheduledTask::new((*task).clone(), cursor, scheduled.len()).with_reasoning(reasoning),
                );

                elapsed += i64::from(task.duration_minutes) * 60;
                remaining -= task.duration_minutes;
                tracing::debug!(title = %task.title, remaining, "accepted");
            } else {
                let reasoning = if fits_budget {
                    format!(
                        "Needs {} min but only {} min remain before midnight.",
                        task.duration_minutes, before_midnight
                    )
                } else {
                    reject_reasoning(task, remaining, available_time_minutes)
                };
                unscheduled.push(UnscheduledTask {
                    task: (*task).clone(),
                    reasoning,
                });
                tracing::debug!(title = %task.title, remaining, before_midnight, "rejected: does not fit");
            }
        }

        Ok(Schedule::new(self.date, available_time_minutes, scheduled, unscheduled))
    }
}

fn validate_request(tasks: &[Task], available_time_minutes: i32) -> Result<(), ScheduleError> {
    if available_time_minutes < 0 {
        return Err(ScheduleError::NegativeBudget {
            minutes: available_time_minutes,
        });
    }
    tasks.iter().try_for_each(Task::validate)
}

/// Candidate order. Total up to identical titles; the stable sort keeps input
/// order for those.
pub fn compare_candidates(a: &Task, b: &Task, preferences: &OwnerPreferences) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| {
            if preferences.group_similar_tasks {
                preferences
                    .category_rank(a.category)
                    .cmp(&preferences.category_rank(b.category))
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| a.duration_minutes.cmp(&b.duration_minutes))
        .then_with(|| title_order(a, b))
}

fn priority_rationale(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "Critical priority: must happen today.",
        Priority::High => "High priority: important for the pet's wellbeing.",
        Priority::Medium => "Medium priority: worth doing when time allows.",
        Priority::Low => "Low priority: nice to have.",
    }
}

fn category_rationale(category: TaskCategory) -> &'static str {
    match category {
        TaskCategory::Medication => "Medication is essential to the pet's health and is time-sensitive.",
        TaskCategory::Feeding => "Feeding is an essential daily need.",
        TaskCategory::Walk => "Walks provide needed exercise and bathroom breaks.",
        TaskCategory::Grooming => "Grooming keeps the pet clean and comfortable.",
        TaskCategory::Enrichment => "Enrichment keeps the pet mentally stimulated.",
    }
}

/// Only the immediately following candidate is named as the alternative.
fn accept_reasoning(
    task: &Task,
    remaining_before: i32,
    next_in_line: Option<&Task>,
    preferences: &OwnerPreferences,
) -> String {
    let mut out = format!(
        "{} {} Fits in the {} min remaining.",
        priority_rationale(task.priority),
        category_rationale(task.category),
        remaining_before
    );

    if let Some(alt) = next_in_line {
        out.push(' ');
        out.push_str(&comparison(task, alt, preferences));
    }
    out
}

fn comparison(task: &Task, alt: &Task, preferences: &OwnerPreferences) -> String {
    if alt.priority < task.priority {
        return format!(
            "Chosen over lower-priority '{}' ({}).",
            alt.title, alt.priority
        );
    }

    let rank = preferences.category_rank(task.category);
    let alt_rank = preferences.category_rank(alt.category);
    if preferences.group_similar_tasks && rank < alt_rank {
        return format!(
            "Ahead of equally urgent '{}' because {} comes earlier in the preferred task order.",
            alt.title, task.category
        );
    }

    if task.duration_minutes < alt.duration_minutes {
        return format!(
            "Ahead of equally urgent '{}' because it is shorter ({} vs {} min).",
            alt.title, task.duration_minutes, alt.duration_minutes
        );
    }

    if task.title != alt.title {
        format!(
            "Ahead of equally urgent '{}' by alphabetical order.",
            alt.title
        )
    } else {
        format!(
            "Ahead of another '{}' task of the same rank because it was listed first.",
            alt.title
        )
    }
}

fn reject_reasoning(task: &Task, remaining: i32, available: i32) -> String {
    if available == 0 {
        return "No time available today: the budget is 0 minutes.".to_string();
    }

    let committed = available - remaining;
    if committed == 0 {
        return format!(
            "Needs {} min but the whole budget is only {} min.",
            task.duration_minutes, available
        );
    }

    format!(
        "Needs {} min but only {} min remained after {} min committed to higher-ranked tasks.",
        task.duration_minutes, remaining, committed
    )
}
