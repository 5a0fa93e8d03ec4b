//! Task model for the pet-care scheduling engine.
//!
//! A task is identified by its title plus the pet that owns it; there is no
//! surrogate key. Scheduling never mutates a task, it wraps it.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ParseLabelError, ScheduleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Nice to have.
    Low = 1,
    /// Should be done when time allows.
    Medium = 2,
    /// Important for the pet's wellbeing.
    High = 3,
    /// Must happen today.
    Critical = 4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Numeric tier, higher is more urgent.
    pub fn score(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseLabelError::new(
                "priority",
                s,
                "low, medium, high, critical",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Walk,
    Feeding,
    Medication,
    Grooming,
    Enrichment,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 5] = [
        Self::Walk,
        Self::Feeding,
        Self::Medication,
        Self::Grooming,
        Self::Enrichment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Feeding => "feeding",
            Self::Medication => "medication",
            Self::Grooming => "grooming",
            Self::Enrichment => "enrichment",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskCategory {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" => Ok(Self::Walk),
            "feeding" => Ok(Self::Feeding),
            "medication" => Ok(Self::Medication),
            "grooming" => Ok(Self::Grooming),
            "enrichment" => Ok(Self::Enrichment),
            _ => Err(ParseLabelError::new(
                "category",
                s,
                "walk, feeding, medication, grooming, enrichment",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFrequency {
    #[default]
    Once,
    Daily,
    Weekly,
    Monthly,
}

impl TaskFrequency {
    pub fn label(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn is_recurring(self) -> bool {
        self != Self::Once
    }

    /// Calendar day the next occurrence falls due, counted from `from`.
    ///
    /// Monthly recurrence clamps to the last day of a shorter month
    /// (Jan 31 -> Feb 28/29).
    pub fn next_due_date(self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Once => None,
            Self::Daily => from.checked_add_days(Days::new(1)),
            Self::Weekly => from.checked_add_days(Days::new(7)),
            Self::Monthly => from.checked_add_months(Months::new(1)),
        }
    }
}

impl fmt::Display for TaskFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskFrequency {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "once" => Ok(Self::Once),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ParseLabelError::new(
                "frequency",
                s,
                "once, daily, weekly, monthly",
            )),
        }
    }
}

/// A single pet care activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,

    /// Minutes. Must be positive before the task reaches a scheduler.
    pub duration_minutes: i32,

    pub priority: Priority,
    pub category: TaskCategory,

    #[serde(default)]
    pub frequency: TaskFrequency,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_completed: bool,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        duration_minutes: i32,
        priority: Priority,
        category: TaskCategory,
    ) -> Self {
        Self {
            title: title.into(),
            duration_minutes,
            priority,
            category,
            frequency: TaskFrequency::Once,
            description: None,
            is_completed: false,
        }
    }

    pub fn with_frequency(mut self, frequency: TaskFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority_score(&self) -> i32 {
        self.priority.score()
    }

    pub fn mark_complete(&mut self) {
        self.is_completed = true;
    }

    /// Reject tasks no scheduler can place.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.title.trim().is_empty() {
            return Err(ScheduleError::BlankTitle);
        }
        if self.duration_minutes <= 0 {
            return Err(ScheduleError::NonPositiveDuration {
                title: self.title.clone(),
                minutes: self.duration_minutes,
            });
        }
        Ok(())
    }
}
