//! Remaining-workday capacity for tasks due today.
//!
//! Uses a fixed workday that ends at a configurable hour (17:00 by default)
//! and a shortest-first greedy fit. The greedy pass is intentionally not an
//! optimal packing: it answers "how many of today's tasks can I still
//! finish", which favors many small wins.

use chrono::{DateTime, TimeZone, Timelike};
use serde::Serialize;

use crate::task::Task;

/// Hour of day (local) at which the workday ends.
pub const DEFAULT_WORKDAY_END_HOUR: u32 = 17;

/// Minutes assumed for a task with no duration estimate.
pub const FALLBACK_TASK_MINUTES: u32 = 30;

/// Capacity snapshot for the current day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CapacitySummary {
    pub hours_remaining: f64,
    pub today_tasks: Vec<Task>,
    pub tasks_fit: usize,
    pub total_task_hours: f64,
    pub is_over_capacity: bool,
    pub is_after_work: bool,
}

impl CapacitySummary {
    /// One-line status for the "Due Today" card.
    pub fn headline(&self) -> String {
        if self.is_after_work {
            return "Workday ended".to_string();
        }
        if self.today_tasks.is_empty() {
            return "No tasks due today".to_string();
        }
        let mut line = format!(
            "{:.1}h left \u{b7} {} of {} tasks fit",
            self.hours_remaining,
            self.tasks_fit,
            self.today_tasks.len()
        );
        if self.is_over_capacity {
            line.push_str(" (over capacity)");
        }
        line
    }
}

/// Estimated hours for one task: duration, then effort, then the fallback.
pub fn task_hours(task: &Task) -> f64 {
    task.duration_minutes().unwrap_or(FALLBACK_TASK_MINUTES) as f64 / 60.0
}

/// Summarize today's workload against the time left before `workday_end_hour`.
///
/// "Today" is `now`'s calendar date in `now`'s own timezone; due dates are
/// converted into that zone before comparing.
pub fn summarize<Tz: TimeZone>(
    tasks: &[Task],
    now: &DateTime<Tz>,
    workday_end_hour: u32,
) -> CapacitySummary {
    let current_hour = now.hour() as f64 + now.minute() as f64 / 60.0;
    let hours_remaining = (workday_end_hour as f64 - current_hour).max(0.0);

    let today = now.date_naive();
    let tz = now.timezone();
    let today_tasks: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.is_done())
        .filter(|t| {
            t.due_date
                .is_some_and(|due| due.with_timezone(&tz).date_naive() == today)
        })
        .cloned()
        .collect();

    let hours: Vec<f64> = today_tasks.iter().map(task_hours).collect();
    let total_task_hours: f64 = hours.iter().sum();

    let mut sorted = hours.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut accumulated = 0.0;
    let mut tasks_fit = 0;
    for h in sorted {
        if accumulated + h > hours_remaining {
            break;
        }
        accumulated += h;
        tasks_fit += 1;
    }

    tracing::debug!(
        hours_remaining,
        due_today = today_tasks.len(),
        tasks_fit,
        total_task_hours,
        "computed capacity"
    );

    CapacitySummary {
        hours_remaining,
        tasks_fit,
        total_task_hours,
        is_over_capacity: total_task_hours > hours_remaining,
        is_after_work: hours_remaining == 0.0,
        today_tasks,
    }
}

/// [`summarize`] with the default 17:00 end of day.
pub fn summarize_default<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> CapacitySummary {
    summarize(tasks, now, DEFAULT_WORKDAY_END_HOUR)
}
