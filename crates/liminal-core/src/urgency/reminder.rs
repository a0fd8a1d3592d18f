//! Deadline reminders: when to nudge, and which nudges are pending.
//!
//! Delivery is the caller's job. This module only decides the timing and
//! keeps at most one pending reminder per task in a registry the caller
//! owns.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::task::Task;

/// Hours before the deadline a reminder fires.
pub const REMINDER_LEAD_HOURS: i64 = 1;

/// Reminders further out than this many days are not scheduled.
pub const MAX_REMINDER_DELAY_DAYS: i64 = 25;

/// Title shown on every reminder.
pub const REMINDER_TITLE: &str = "Liminal: Task due soon";

/// Delay from `now` until the reminder for `due` should fire.
///
/// `None` when the firing time has already been reached, or lies more
/// than [`MAX_REMINDER_DELAY_DAYS`] away.
pub fn reminder_delay(due: DateTime<Utc>, now: DateTime<Utc>) -> Option<Duration> {
    let delay = due - Duration::hours(REMINDER_LEAD_HOURS) - now;
    let max = Duration::days(MAX_REMINDER_DELAY_DAYS);
    (delay > Duration::zero() && delay <= max).then_some(delay)
}

/// A pending reminder for one task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reminder {
    pub task_id: String,
    pub task_title: String,
    pub fire_at: DateTime<Utc>,
}

impl Reminder {
    pub fn body(&self) -> String {
        format!("\"{}\" is due in 1 hour", self.task_title)
    }
}

/// Pending reminders keyed by task id.
#[derive(Debug, Clone, Default)]
pub struct ReminderRegistry {
    pending: HashMap<String, Reminder>,
}

impl ReminderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a reminder, replacing any pending one for the same task.
    ///
    /// Returns `None` and leaves the registry untouched when the timing
    /// rule rejects the due date.
    pub fn schedule(
        &mut self,
        task_id: &str,
        task_title: &str,
        due: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Option<&Reminder> {
        let delay = reminder_delay(due, now)?;
        let reminder = Reminder {
            task_id: task_id.to_string(),
            task_title: task_title.to_string(),
            fire_at: now + delay,
        };
        if self.pending.insert(task_id.to_string(), reminder).is_some() {
            tracing::debug!(task_id, "replaced pending reminder");
        }
        self.pending.get(task_id)
    }

    /// [`schedule`](Self::schedule) from a task's own due date.
    pub fn schedule_task(&mut self, task: &Task, now: DateTime<Utc>) -> Option<&Reminder> {
        let due = task.due_date?;
        self.schedule(&task.id, &task.title, due, now)
    }

    pub fn cancel(&mut self, task_id: &str) -> Option<Reminder> {
        self.pending.remove(task_id)
    }

    pub fn get(&self, task_id: &str) -> Option<&Reminder> {
        self.pending.get(task_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every reminder whose time has come, earliest first.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<Reminder> {
        let ready: Vec<String> = self
            .pending
            .values()
            .filter(|r| r.fire_at <= now)
            .map(|r| r.task_id.clone())
            .collect();
        let mut fired: Vec<Reminder> = ready
            .iter()
            .filter_map(|id| self.pending.remove(id))
            .collect();
        fired.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then_with(|| a.task_id.cmp(&b.task_id)));
        fired
    }
}
