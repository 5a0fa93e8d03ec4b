//! Pet and owner aggregates.
//!
//! These own task lists and the per-owner budget/preferences. Storage is a
//! later layer (the CLI keeps a JSON file); nothing here does I/O.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::collection::{aggregate_across, by_category, by_completion, by_priority, total_duration};
use crate::error::ScheduleError;
use crate::preferences::OwnerPreferences;
use crate::schedule::Schedule;
use crate::scheduler::Scheduler;
use crate::task::{Priority, Task, TaskCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub age_years: f64,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Pet {
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            age_years: 0.0,
            tasks: Vec::new(),
        }
    }

    pub fn with_age(mut self, age_years: f64) -> Self {
        self.age_years = age_years;
        self
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove the first task titled `title`.
    pub fn remove_task(&mut self, title: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.title == title)?;
        Some(self.tasks.remove(idx))
    }

    /// First pending task titled `title`, falling back to any match.
    pub fn task_mut(&mut self, title: &str) -> Option<&mut Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.title == title && !t.is_completed)
            .or_else(|| self.tasks.iter().position(|t| t.title == title))?;
        self.tasks.get_mut(idx)
    }

    pub fn tasks_by_priority(&self, priority: Priority) -> Vec<&Task> {
        by_priority(&self.tasks, priority)
    }

    pub fn tasks_by_category(&self, category: TaskCategory) -> Vec<&Task> {
        by_category(&self.tasks, category)
    }

    pub fn total_task_time(&self) -> i32 {
        total_duration(&self.tasks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub available_time_minutes: i32,
    #[serde(default)]
    pub pets: Vec<Pet>,
    #[serde(default)]
    pub preferences: OwnerPreferences,
}

impl Owner {
    pub fn new(name: impl Into<String>, available_time_minutes: i32) -> Self {
        Self {
            name: name.into(),
            available_time_minutes,
            pets: Vec::new(),
            preferences: OwnerPreferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: OwnerPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn add_pet(&mut self, pet: Pet) {
        self.pets.push(pet);
    }

    pub fn remove_pet(&mut self, name: &str) -> Option<Pet> {
        let idx = self.pets.iter().position(|p| p.name == name)?;
        Some(self.pets.remove(idx))
    }

    pub fn pet(&self, name: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.name == name)
    }

    pub fn pet_mut(&mut self, name: &str) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|p| p.name == name)
    }

    pub fn all_tasks(&self) -> Vec<Task> {
        aggregate_across(&self.pets)
    }

    /// Tasks still waiting to be done, in pet then task order.
    pub fn pending_tasks(&self) -> Vec<Task> {
        let all = self.all_tasks();
        by_completion(&all, false).into_iter().cloned().collect()
    }

    pub fn calculate_total_task_time(&self) -> i32 {
        total_duration(&self.all_tasks())
    }

    /// Plan today's pending tasks with this owner's budget and preferences.
    pub fn plan<S: Scheduler + ?Sized>(
        &self,
        scheduler: &S,
        start_time: NaiveTime,
    ) -> Result<Schedule, ScheduleError> {
        scheduler.generate_schedule(
            &self.pending_tasks(),
            self.available_time_minutes,
            start_time,
            &self.preferences,
        )
    }
}
