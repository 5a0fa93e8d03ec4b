use chrono::{NaiveDate, NaiveTime};
use pawpal_core::{
    advance, compare_candidates, detect_conflicts, Owner, OwnerPreferences, Pet, Priority,
    PriorityGreedyScheduler, Schedule, ScheduledTask, Scheduler, Task, TaskCategory, TaskFrequency,
};
use std::cmp::Ordering;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn plan(tasks: &[Task], budget: i32, prefs: &OwnerPreferences) -> Schedule {
    PriorityGreedyScheduler::new(day())
        .generate_schedule(tasks, budget, at(8, 0), prefs)
        .unwrap()
}

/// Deterministic spread of tasks across every priority, category and a range
/// of durations, with some repeated titles.
fn task_pool() -> Vec<Task> {
    let mut out = Vec::new();
    for i in 0..40 {
        let priority = Priority::ALL[(i * 7) % 4];
        let category = TaskCategory::ALL[(i * 3) % 5];
        let minutes = 5 + ((i * 13) % 50) as i32;
        let title = format!("task-{:02}", i % 33);
        out.push(Task::new(title, minutes, priority, category));
    }
    out
}

fn preference_variants() -> Vec<OwnerPreferences> {
    vec![
        OwnerPreferences::default(),
        OwnerPreferences {
            priority_threshold: Priority::Medium,
            ..Default::default()
        },
        OwnerPreferences {
            group_similar_tasks: true,
            preferred_task_order: vec![TaskCategory::Medication, TaskCategory::Feeding],
            ..Default::default()
        },
        OwnerPreferences {
            priority_threshold: Priority::High,
            group_similar_tasks: true,
            preferred_task_order: vec![TaskCategory::Walk],
        },
    ]
}

#[test]
fn test_determinism() {
    let tasks = task_pool();
    for prefs in preference_variants() {
        for budget in [0, 30, 120, 500] {
            let a = plan(&tasks, budget, &prefs);
            let b = plan(&tasks, budget, &prefs);
            assert_eq!(a, b);
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }
    }
}

#[test]
fn test_partition_and_budget_invariants() {
    let tasks = task_pool();
    for prefs in preference_variants() {
        let admitted: Vec<&Task> = tasks.iter().filter(|t| prefs.admits(t)).collect();

        for budget in [0, 1, 45, 200, 10_000] {
            let s = plan(&tasks, budget, &prefs);

            // union is exactly the admitted set (as a multiset), no overlap
            let mut seen: Vec<&Task> = s
                .scheduled_tasks
                .iter()
                .map(|st| &st.task)
                .chain(s.unscheduled_tasks())
                .collect();
            assert_eq!(seen.len(), admitted.len());
            let mut expected = admitted.clone();
            let key = |t: &&Task| (t.title.clone(), t.duration_minutes, t.priority.score(), t.category.label());
            seen.sort_by_key(key);
            expected.sort_by_key(key);
            assert_eq!(seen, expected);

            assert!(s.total_time_minutes <= budget);
            assert!(s.validate(), "greedy output must never overlap");
        }
    }
}

#[test]
fn test_priority_ordering_follows_tiebreak_chain() {
    let tasks = task_pool();
    for prefs in preference_variants() {
        let s = plan(&tasks, 400, &prefs);
        for pair in s.scheduled_tasks.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.order_index < b.order_index);
            assert!(a.task.priority >= b.task.priority);
            assert_ne!(compare_candidates(&a.task, &b.task, &prefs), Ordering::Greater);
        }
    }
}

#[test]
fn test_zero_budget_scenario() {
    let tasks = task_pool();
    let s = plan(&tasks, 0, &OwnerPreferences::default());
    assert!(s.scheduled_tasks.is_empty());
    assert_eq!(s.unscheduled.len(), tasks.len());
    assert_eq!(s.utilization_percentage, 0.0);
    assert!(s.unscheduled.iter().all(|u| u.reasoning.contains("0 minutes")));
}

#[test]
fn test_insufficient_time_scenario() {
    let tasks = vec![
        Task::new("Feed", 30, Priority::Critical, TaskCategory::Feeding),
        Task::new("Walk", 60, Priority::High, TaskCategory::Walk),
        Task::new("Brush", 90, Priority::Low, TaskCategory::Grooming),
    ];
    let s = plan(&tasks, 40, &OwnerPreferences::default());

    let scheduled: Vec<&str> = s.scheduled_tasks.iter().map(|st| st.task.title.as_str()).collect();
    let unscheduled: Vec<&str> = s.unscheduled_tasks().map(|t| t.title.as_str()).collect();
    assert_eq!(scheduled, vec!["Feed"]);
    assert_eq!(unscheduled, vec!["Walk", "Brush"]);
    assert_eq!(s.total_time_minutes, 30);
    assert_eq!(s.utilization_percentage, 75.0);
}

#[test]
fn test_tie_break_scenario() {
    let tasks = vec![
        Task::new("Zeta", 20, Priority::Medium, TaskCategory::Enrichment),
        Task::new("Beta", 10, Priority::Medium, TaskCategory::Enrichment),
        Task::new("Alpha", 20, Priority::Medium, TaskCategory::Enrichment),
    ];
    let s = plan(&tasks, 600, &OwnerPreferences::default());
    let order: Vec<&str> = s.scheduled_tasks.iter().map(|st| st.task.title.as_str()).collect();
    assert_eq!(order, vec!["Beta", "Alpha", "Zeta"]);
    assert_eq!(s.scheduled_tasks[1].scheduled_time, at(8, 10));
    assert_eq!(s.scheduled_tasks[2].scheduled_time, at(8, 30));
}

#[test]
fn test_back_to_back_non_conflict() {
    let a = ScheduledTask::new(
        Task::new("Walk", 30, Priority::High, TaskCategory::Walk),
        at(9, 0),
        0,
    );
    let b = ScheduledTask::new(
        Task::new("Feed", 15, Priority::Critical, TaskCategory::Feeding),
        at(9, 30),
        1,
    );
    assert!(detect_conflicts(&[a, b]).is_empty());
}

#[test]
fn test_hand_edited_schedule_reports_conflict() {
    let tasks = vec![
        Task::new("Feed", 10, Priority::Critical, TaskCategory::Feeding),
        Task::new("Walk", 30, Priority::High, TaskCategory::Walk),
    ];
    let mut s = plan(&tasks, 60, &OwnerPreferences::default());
    assert!(s.validate());

    // move Walk back onto Feed's slot
    s.scheduled_tasks[1].scheduled_time = at(8, 5);
    let conflicts = s.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 5);
    assert!(!s.validate());
}

#[test]
fn test_recurrence_scenario() {
    let mut daily = Task::new("Feed", 10, Priority::Critical, TaskCategory::Feeding)
        .with_frequency(TaskFrequency::Daily);
    daily.mark_complete();
    let next = advance(&daily).unwrap();
    assert!(!next.is_completed);
    assert_eq!(next.duration_minutes, daily.duration_minutes);
    assert_eq!(next.priority, daily.priority);
    assert_eq!(next.category, daily.category);
    assert_eq!(next.frequency, daily.frequency);

    let mut once = Task::new("Vet", 60, Priority::High, TaskCategory::Medication);
    once.mark_complete();
    assert!(advance(&once).is_none());
}

#[test]
fn test_empty_input() {
    let s = plan(&[], 120, &OwnerPreferences::default());
    assert!(s.scheduled_tasks.is_empty());
    assert!(s.unscheduled.is_empty());
    assert_eq!(s.total_time_minutes, 0);
    assert_eq!(s.utilization_percentage, 0.0);
    assert!(s.explanation.contains("No tasks to schedule"));
}

#[test]
fn test_end_to_end_owner_plan() {
    let mut owner = Owner::new("Jordan", 90);

    let mut dog = Pet::new("Mochi", "dog").with_age(3.5);
    dog.add_task(Task::new("Feed", 10, Priority::Critical, TaskCategory::Feeding));
    dog.add_task(Task::new("Walk", 30, Priority::High, TaskCategory::Walk));
    dog.add_task(Task::new("Play", 20, Priority::Medium, TaskCategory::Enrichment));
    dog.add_task(Task::new("Groom", 45, Priority::Low, TaskCategory::Grooming));
    owner.add_pet(dog);

    let s = owner
        .plan(&PriorityGreedyScheduler::new(day()), at(7, 30))
        .unwrap();

    let order: Vec<&str> = s.scheduled_tasks.iter().map(|st| st.task.title.as_str()).collect();
    assert_eq!(order, vec!["Feed", "Walk", "Play"]);
    assert_eq!(s.unscheduled[0].task.title, "Groom");
    assert!(s.total_time_minutes <= owner.available_time_minutes);
    assert!(s.validate());
    assert_eq!(s.end_time(), Some(at(8, 30)));
}

#[test]
fn test_multi_day_budget_never_overlaps() {
    let mut tasks = task_pool();
    for i in 0..6 {
        tasks.push(Task::new(format!("long-{i}"), 300 + i * 37, Priority::ALL[i as usize % 4], TaskCategory::Walk));
    }
    let pool_minutes: i32 = tasks.iter().map(|t| t.duration_minutes).sum();
    assert!(pool_minutes > 24 * 60);

    for start in [at(0, 0), at(8, 0), at(22, 30)] {
        for budget in [1441, 2000, 100_000] {
            let s = PriorityGreedyScheduler::new(day())
                .generate_schedule(&tasks, budget, start, &OwnerPreferences::default())
                .unwrap();
            assert!(s.validate(), "back-to-back slots overlapped from {start} with budget {budget}");
            assert_eq!(s.candidate_count(), tasks.len());
            assert!(s.scheduled_tasks.iter().all(|st| st.scheduled_time >= start));
            assert!(s.scheduled_tasks.iter().all(|st| st.end_second() <= 24 * 60 * 60));
        }
    }
}
