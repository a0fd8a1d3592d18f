//! End-to-end tests across the engines, through the public API only.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use liminal_core::capacity;
use liminal_core::capture::{self, CaptureOutcome};
use liminal_core::defaults::calculate_defaults;
use liminal_core::stats::{compute_stats, compute_stats_with_key, EodSummary};
use liminal_core::storage::PERSONAL_BEST_KEY;
use liminal_core::urgency::{self, UrgencyLevel, COLOR_NONE, COLOR_OVERDUE};
use liminal_core::{
    Config, FileBestStore, MemoryBestStore, PersonalBestStore, PriorityLabel, ReminderRegistry,
    Task, TaskDraft, TaskStatus,
};
use tempfile::TempDir;

fn tz() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn local(day: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
    tz().with_ymd_and_hms(2026, 5, day, h, m, 0).unwrap()
}

fn utc(day: u32, h: u32, m: u32) -> DateTime<Utc> {
    local(day, h, m).with_timezone(&Utc)
}

fn task_from_capture(id: &str, line: &str, created_at: DateTime<Utc>) -> Task {
    let payload = capture::parse(line);
    let mut task = Task::new(id, payload.title, created_at);
    task.priority = payload.priority.unwrap_or_default();
    task.priority_score = payload.priority_score;
    task.value_score = payload.value_score;
    task.estimated_duration = payload.estimated_duration;
    task.effort_score = payload.effort_score;
    task.status = payload.status.unwrap_or_default();
    task
}

fn done_at(mut task: Task, when: DateTime<Utc>) -> Task {
    task.status = TaskStatus::Done;
    task.updated_at = Some(when);
    task
}

#[test]
fn captured_tasks_flow_into_capacity() {
    let now = local(12, 15, 0);
    let created = utc(12, 8, 0);

    let mut tasks: Vec<Task> = ["Write report 1h", "Review PR e:1h !high", "Plan sprint 60min"]
        .iter()
        .enumerate()
        .map(|(i, line)| task_from_capture(&format!("t{i}"), line, created))
        .collect();
    for task in &mut tasks {
        task.due_date = Some(utc(12, 18, 0));
    }

    assert_eq!(tasks[1].title, "Review PR");
    assert_eq!(tasks[1].priority, PriorityLabel::High);
    assert!(tasks.iter().all(|t| t.estimated_duration == Some(60)));

    let summary = capacity::summarize_default(&tasks, &now);
    assert_eq!(summary.hours_remaining, 2.0);
    assert_eq!(summary.today_tasks.len(), 3);
    assert_eq!(summary.tasks_fit, 2);
    assert_eq!(summary.total_task_hours, 3.0);
    assert!(summary.is_over_capacity);
    assert!(!summary.is_after_work);
    assert_eq!(summary.headline(), "2.0h left \u{b7} 2 of 3 tasks fit (over capacity)");
}

#[test]
fn capacity_only_counts_open_tasks_due_on_the_local_day() {
    let now = local(12, 13, 30);
    let created = utc(10, 9, 0);

    let mut due_today = Task::new("a", "Due today", created);
    due_today.due_date = Some(utc(12, 23, 30));
    due_today.estimated_duration = Some(45);

    // 00:30 local on the 13th, still the 12th in UTC.
    let mut due_tomorrow = Task::new("b", "Due tomorrow", created);
    due_tomorrow.due_date = Some(utc(13, 0, 30));

    let mut finished = Task::new("c", "Finished", created);
    finished.due_date = Some(utc(12, 10, 0));
    finished.status = TaskStatus::Done;

    let summary = capacity::summarize(&[due_today, due_tomorrow, finished], &now, 18);
    assert_eq!(summary.hours_remaining, 4.5);
    assert_eq!(summary.today_tasks.len(), 1);
    assert_eq!(summary.today_tasks[0].id, "a");
    assert_eq!(summary.tasks_fit, 1);
    assert!(!summary.is_over_capacity);
}

#[test]
fn urgency_follows_a_task_through_its_deadline() {
    let created = utc(1, 9, 0);
    let mut task = Task::new("t", "Submit taxes", created);
    task.due_date = Some(utc(3, 9, 0));

    let stale_days = urgency::DEFAULT_STALE_DAYS;

    let early = urgency::assess(&task, stale_days, utc(1, 10, 0));
    assert_eq!(early.level, UrgencyLevel::Safe);
    assert!(!early.stale);
    assert_eq!(early.label.as_deref(), Some("2 days left"));

    let close = urgency::assess(&task, stale_days, utc(3, 8, 30));
    assert_eq!(close.level, UrgencyLevel::Critical);
    assert_eq!(close.label.as_deref(), Some("30 minutes left"));

    let late = urgency::assess(&task, stale_days, utc(3, 9, 1));
    assert_eq!(late.level, UrgencyLevel::Overdue);
    assert_eq!(late.color, COLOR_OVERDUE);
    assert_eq!(late.label.as_deref(), Some(urgency::OVERDUE_LABEL));

    task.status = TaskStatus::Done;
    let finished = urgency::assess(&task, stale_days, utc(3, 9, 1));
    assert_eq!(finished.color, COLOR_NONE);
}

#[test]
fn captured_deadlines_get_one_reminder_each() {
    let now = utc(1, 9, 0);
    let mut registry = ReminderRegistry::new();

    let mut taxes = task_from_capture("taxes", "Submit taxes !high", now);
    taxes.due_date = Some(utc(1, 12, 0));
    let mut passport = task_from_capture("passport", "Renew passport 30m", now);
    passport.due_date = Some(utc(2, 9, 0));
    let mut far = task_from_capture("far", "Plan trip", now);
    far.due_date = Some(now + Duration::days(40));
    let undated = task_from_capture("undated", "Read book", now);

    for task in [&taxes, &passport, &far, &undated] {
        registry.schedule_task(task, now);
    }
    assert_eq!(registry.len(), 2);

    // Moving the deadline replaces the pending reminder.
    taxes.due_date = Some(utc(1, 11, 0));
    registry.schedule_task(&taxes, now);
    assert_eq!(registry.len(), 2);

    let fired = registry.take_due(utc(1, 10, 0));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].task_id, "taxes");
    assert_eq!(fired[0].body(), "\"Submit taxes\" is due in 1 hour");

    // Completing a task cancels its reminder before it fires.
    assert!(registry.cancel("passport").is_some());
    assert!(registry.take_due(utc(3, 0, 0)).is_empty());
}

#[test]
fn backlog_goes_stale_but_active_work_does_not() {
    let created = utc(1, 9, 0);
    let now = utc(5, 9, 0);
    let mut task = Task::new("t", "Someday", created);

    assert!(urgency::assess(&task, 3.0, now).stale);
    assert!(!urgency::assess(&task, 5.0, now).stale);

    task.status = TaskStatus::Todo;
    assert!(!urgency::assess(&task, 3.0, now).stale);
}

#[test]
fn defaults_complete_a_bare_draft() {
    let now = utc(12, 9, 0);
    let draft = TaskDraft {
        due_date: Some(now + Duration::hours(30)),
        estimated_duration: Some(10),
        ..TaskDraft::titled("Call the dentist")
    };

    let payload = calculate_defaults(&draft, now);
    assert_eq!(payload.title, "Call the dentist");
    assert_eq!(payload.priority_score, Some(70));
    assert_eq!(payload.priority, Some(PriorityLabel::High));
    assert_eq!(payload.value_score, Some(90));
    assert_eq!(payload.effort_score, Some(10));
    assert_eq!(payload.due_date, draft.due_date);
}

#[test]
fn interpret_routes_chat_lines() {
    match capture::interpret("create task Draft blog post e:30m theme: Writing") {
        CaptureOutcome::NewTask { task, theme_name } => {
            assert_eq!(task.estimated_duration, Some(30));
            assert_eq!(theme_name.as_deref(), Some("Writing"));
        }
        other => panic!("expected a new task, got {other:?}"),
    }

    assert_eq!(capture::interpret("update task 42 p:10"), CaptureOutcome::Update);
    assert!(matches!(
        capture::interpret("how are you?"),
        CaptureOutcome::Help { .. }
    ));
}

#[test]
fn streak_and_personal_best_persist_to_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    let now = local(20, 18, 0);

    let week: Vec<Task> = (0..7)
        .map(|d| {
            let task = Task::new(format!("d{d}"), "daily", utc(1, 9, 0));
            done_at(task, (now - Duration::days(d)).with_timezone(&Utc))
        })
        .collect();

    let mut store = FileBestStore::new(&path);
    let stats = compute_stats(&week, &mut store, &now).unwrap();
    assert_eq!(stats.current_streak, 7);
    assert_eq!(stats.personal_best, 7);
    assert_eq!(EodSummary::from_stats(&stats).headline, "New personal best!");

    // A later, shorter streak keeps the stored best.
    let later = local(28, 18, 0);
    let short: Vec<Task> = (0..3)
        .map(|d| {
            let mut task = Task::new(format!("s{d}"), "short", utc(1, 9, 0));
            task.estimated_duration = Some(20);
            done_at(task, (later - Duration::days(d)).with_timezone(&Utc))
        })
        .collect();

    let mut reopened = FileBestStore::new(&path);
    let stats = compute_stats(&short, &mut reopened, &later).unwrap();
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.personal_best, 7);
    assert_eq!(stats.best_suffix(), " (best: 7)");
    assert_eq!(stats.impact_message(), "You freed up some time today");
    assert_eq!(
        reopened.get(PERSONAL_BEST_KEY).unwrap().as_deref(),
        Some("7")
    );
}

#[test]
fn configured_key_isolates_personal_best() {
    let mut config = Config::default();
    config
        .set_value("stats.personal_best_key", "work-streak")
        .unwrap();

    let now = local(20, 12, 0);
    let tasks = vec![done_at(Task::new("a", "a", utc(1, 9, 0)), utc(20, 10, 0))];

    let mut store = MemoryBestStore::new();
    let stats =
        compute_stats_with_key(&tasks, &mut store, &config.stats.personal_best_key, &now).unwrap();
    assert_eq!(stats.personal_best, 1);
    assert_eq!(store.get("work-streak").unwrap().as_deref(), Some("1"));
    assert_eq!(store.get(PERSONAL_BEST_KEY).unwrap(), None);
}
