//! Post-hoc overlap detection for scheduled slots.
//!
//! The greedy scheduler lays tasks out back-to-back, so its own output never
//! conflicts. This exists for schedules that were edited by hand or assembled
//! elsewhere. Detection only reports; it never moves a slot.
//!
//! Pairwise O(n^2); task lists are tens to low hundreds long.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::schedule::{ScheduledTask, SECONDS_PER_DAY};
use crate::task::Priority;

/// Overlaps of at least this many minutes are `Major`.
pub const MAJOR_OVERLAP_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Minor,
    Major,
    /// A critical-priority task is involved.
    Critical,
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Critical => "critical",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub first_title: String,
    pub first_index: usize,
    pub second_title: String,
    pub second_index: usize,
    pub overlap_start: NaiveTime,
    pub overlap_end: NaiveTime,
    pub overlap_minutes: i64,
    pub severity: ConflictSeverity,
    pub message: String,
}

/// Report every unordered pair of slots whose `[start, end)` intervals overlap.
///
/// Pairs come out in input order: (0,1), (0,2), ..., (1,2), ...
pub fn detect_conflicts(scheduled: &[ScheduledTask]) -> Vec<ConflictReport> {
    let mut out = Vec::new();

    for (i, a) in scheduled.iter().enumerate() {
        for b in &scheduled[i + 1..] {
            let Some((start, end)) = a.overlap_with(b) else { continue };
            out.push(report(a, b, start, end));
        }
    }

    if !out.is_empty() {
        tracing::debug!(slots = scheduled.len(), conflicts = out.len(), "schedule has overlapping slots");
    }
    out
}

/// `start` and `end` are seconds; a partial minute of overlap counts as one.
fn report(a: &ScheduledTask, b: &ScheduledTask, start: i64, end: i64) -> ConflictReport {
    let overlap_minutes = (end - start + 59) / 60;

    let severity = if a.task.priority == Priority::Critical || b.task.priority == Priority::Critical {
        ConflictSeverity::Critical
    } else if overlap_minutes >= MAJOR_OVERLAP_MINUTES {
        ConflictSeverity::Major
    } else {
        ConflictSeverity::Minor
    };

    let overlap_start = second_to_time(start);
    let overlap_end = second_to_time(end);

    let message = format!(
        "{severity} conflict: '{}' ({}-{}) overlaps '{}' ({}-{}) for {} min from {} to {}",
        a.task.title,
        a.scheduled_time.format("%H:%M"),
        a.end_time().format("%H:%M"),
        b.task.title,
        b.scheduled_time.format("%H:%M"),
        b.end_time().format("%H:%M"),
        overlap_minutes,
        overlap_start.format("%H:%M"),
        overlap_end.format("%H:%M"),
    );

    ConflictReport {
        first_title: a.task.title.clone(),
        first_index: a.order_index,
        second_title: b.task.title.clone(),
        second_index: b.order_index,
        overlap_start,
        overlap_end,
        overlap_minutes,
        severity,
        message,
    }
}

fn second_to_time(second: i64) -> NaiveTime {
    let s = second.rem_euclid(SECONDS_PER_DAY) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(s, 0).unwrap_or(NaiveTime::MIN)
}
