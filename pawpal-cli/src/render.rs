//! Plain-text rendering for the terminal.

use pawpal_core::{ConflictReport, Owner, Schedule, Task};
use std::fmt::Write;

pub fn render_schedule(schedule: &Schedule) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Schedule for {}\n", schedule.date);
    let _ = writeln!(
        out,
        "Scheduled: {} | Unscheduled: {} | Time: {}/{} min | Utilization: {:.1}%",
        schedule.scheduled_tasks.len(),
        schedule.unscheduled.len(),
        schedule.total_time_minutes,
        schedule.available_time_minutes,
        schedule.utilization_percentage
    );

    if !schedule.scheduled_tasks.is_empty() {
        let _ = writeln!(out, "\n## Scheduled\n");
        for st in &schedule.scheduled_tasks {
            let _ = writeln!(
                out,
                "[{} - {}] {} ({} min, {}, {})",
                st.scheduled_time.format("%H:%M"),
                st.end_time().format("%H:%M"),
                st.task.title,
                st.task.duration_minutes,
                st.task.priority,
                st.task.category
            );
            let _ = writeln!(out, "    {}", st.reasoning);
        }
    }

    if !schedule.unscheduled.is_empty() {
        let _ = writeln!(out, "\n## Unscheduled\n");
        for u in &schedule.unscheduled {
            let _ = writeln!(
                out,
                "- {} ({} min, {}): {}",
                u.task.title, u.task.duration_minutes, u.task.priority, u.reasoning
            );
        }
    }

    let _ = writeln!(out, "\n{}", schedule.explanation);
    out
}

pub fn render_conflicts(conflicts: &[ConflictReport]) -> String {
    if conflicts.is_empty() {
        return "No conflicts detected.\n".to_string();
    }
    let mut out = format!("{} conflict(s):\n", conflicts.len());
    for c in conflicts {
        let _ = writeln!(out, "- {}", c.message);
    }
    out
}

pub fn render_task_line(pet: &str, task: &Task) -> String {
    let done = if task.is_completed { "x" } else { " " };
    format!(
        "[{done}] {pet}: {} ({} min, {}, {}, {})",
        task.title, task.duration_minutes, task.priority, task.category, task.frequency
    )
}

pub fn render_owner_summary(owner: &Owner, available_minutes: i32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Owner: {} | Available: {} min", owner.name, available_minutes);
    for pet in &owner.pets {
        let _ = writeln!(
            out,
            "- {} ({}, {} yrs): {} task(s), {} min",
            pet.name,
            pet.species,
            pet.age_years,
            pet.tasks.len(),
            pet.total_task_time()
        );
    }

    let needed: i32 = owner.pending_tasks().iter().map(|t| t.duration_minutes).sum();
    if needed > available_minutes {
        let _ = writeln!(out, "Pending work needs {needed} min: {} min over budget.", needed - available_minutes);
    } else {
        let _ = writeln!(out, "Pending work needs {needed} min: {} min to spare.", available_minutes - needed);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use pawpal_core::{OwnerPreferences, Pet, Priority, PriorityGreedyScheduler, Scheduler, TaskCategory};

    #[test]
    fn test_schedule_text_lists_slots_and_leftovers() {
        let tasks = vec![
            Task::new("Feed", 10, Priority::Critical, TaskCategory::Feeding),
            Task::new("Hike", 90, Priority::Low, TaskCategory::Walk),
        ];
        let schedule = PriorityGreedyScheduler::new(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
            .generate_schedule(
                &tasks,
                30,
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                &OwnerPreferences::default(),
            )
            .unwrap();

        let text = render_schedule(&schedule);
        assert!(text.contains("# Schedule for 2026-03-14"));
        assert!(text.contains("[08:00 - 08:10] Feed (10 min, critical, feeding)"));
        assert!(text.contains("- Hike (90 min, low)"));
        assert!(text.contains("33.3%"));
    }

    #[test]
    fn test_empty_conflicts_render_as_ok() {
        assert_eq!(render_conflicts(&[]), "No conflicts detected.\n");
    }

    #[test]
    fn test_summary_reports_budget_gap() {
        let mut owner = Owner::new("Jordan", 30);
        let mut dog = Pet::new("Mochi", "dog");
        dog.add_task(Task::new("Walk", 45, Priority::High, TaskCategory::Walk));
        owner.add_pet(dog);

        let text = render_owner_summary(&owner, 30);
        assert!(text.contains("15 min over budget"));
        assert!(render_task_line("Mochi", &owner.pets[0].tasks[0]).starts_with("[ ] Mochi: Walk"));
    }
}
