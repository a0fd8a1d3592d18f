//! Deadline urgency signals.
//!
//! Three independent calculations over a task's timestamps:
//!
//! - [`urgency_color`]: continuous green-to-red color as the deadline nears
//! - [`urgency_level`]: categorical bucket from time remaining
//! - [`is_stale`]: aging flag for backlog items, unrelated to deadlines
//!
//! [`ReminderRegistry`] adds the one-hour-before reminder timing on top.
//!
//! Overdue tasks get a warm orange rather than the scale's terminal red so
//! that missing a deadline does not read as failure. "Now" is always passed
//! in by the caller.

mod color;
mod countdown;
mod reminder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::task::{Task, TaskStatus};

pub use color::{Color, ColorScale, ColorStop};
pub use countdown::{countdown, format_distance, indicator_label, Countdown, OVERDUE_LABEL};
pub use reminder::{
    reminder_delay, Reminder, ReminderRegistry, MAX_REMINDER_DELAY_DAYS, REMINDER_LEAD_HOURS,
    REMINDER_TITLE,
};

/// No deadline, or already done (Tailwind gray-400).
pub const COLOR_NONE: Color = Color::rgb(0x94, 0xa3, 0xb8);
/// Past the deadline (Tailwind orange-500).
pub const COLOR_OVERDUE: Color = Color::rgb(0xf9, 0x73, 0x16);

/// Backlog age, in days, after which a task counts as stale.
pub const DEFAULT_STALE_DAYS: f64 = 3.0;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: f64 = 24.0 * HOUR_MS as f64;

/// safe -> soon -> urgent -> critical, over deadline progress 0..1.
static URGENCY_SCALE: LazyLock<ColorScale> = LazyLock::new(|| {
    let stops = [
        (0.0, Color::rgb(0x10, 0xb9, 0x81)),
        (0.5, Color::rgb(0xfb, 0xbf, 0x24)),
        (0.85, Color::rgb(0xf9, 0x73, 0x16)),
        (1.0, Color::rgb(0xef, 0x44, 0x44)),
    ]
    .into_iter()
    .map(|(position, color)| ColorStop { position, color })
    .collect();
    ColorScale::new(stops).expect("urgency scale has stops")
});

/// The scale used by [`urgency_color`].
pub fn urgency_scale() -> &'static ColorScale {
    &URGENCY_SCALE
}

/// Fraction of the created-to-due window that has elapsed, in `[0, 1]`.
///
/// A zero-width or inverted window counts as fully elapsed.
pub fn deadline_progress(due: DateTime<Utc>, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let total = (due - created_at).num_milliseconds();
    if total <= 0 {
        return 1.0;
    }
    let remaining = (due - now).num_milliseconds();
    (1.0 - remaining as f64 / total as f64).clamp(0.0, 1.0)
}

/// Display color for a task's deadline pressure.
pub fn urgency_color(
    due: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    status: TaskStatus,
    now: DateTime<Utc>,
) -> Color {
    let Some(due) = due else {
        return COLOR_NONE;
    };
    if status.is_done() {
        return COLOR_NONE;
    }
    if due < now {
        return COLOR_OVERDUE;
    }
    URGENCY_SCALE.at(deadline_progress(due, created_at, now))
}

/// Categorical urgency, ordered from least to most pressing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    /// No due date
    None,
    /// 24 hours or more remaining
    Safe,
    /// Under 24 hours
    Soon,
    /// Under 4 hours
    Urgent,
    /// Under 1 hour
    Critical,
    /// Deadline reached or passed
    Overdue,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::None => "none",
            UrgencyLevel::Safe => "safe",
            UrgencyLevel::Soon => "soon",
            UrgencyLevel::Urgent => "urgent",
            UrgencyLevel::Critical => "critical",
            UrgencyLevel::Overdue => "overdue",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket the time remaining until `due`.
///
/// Each threshold is exclusive: exactly one hour left is `Urgent`.
pub fn urgency_level(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> UrgencyLevel {
    let Some(due) = due else {
        return UrgencyLevel::None;
    };
    let remaining = (due - now).num_milliseconds();

    if remaining <= 0 {
        UrgencyLevel::Overdue
    } else if remaining < HOUR_MS {
        UrgencyLevel::Critical
    } else if remaining < 4 * HOUR_MS {
        UrgencyLevel::Urgent
    } else if remaining < 24 * HOUR_MS {
        UrgencyLevel::Soon
    } else {
        UrgencyLevel::Safe
    }
}

/// Whether a backlog task has sat untouched for more than `stale_days`.
///
/// Tasks in any other status are never stale.
pub fn is_stale(created_at: DateTime<Utc>, status: TaskStatus, stale_days: f64, now: DateTime<Utc>) -> bool {
    if status != TaskStatus::Backlog {
        return false;
    }
    let age_days = (now - created_at).num_milliseconds() as f64 / DAY_MS;
    age_days > stale_days
}

/// Every urgency signal for one task, as shown on its card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskUrgency {
    pub id: String,
    pub color: Color,
    pub level: UrgencyLevel,
    pub stale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Evaluate all urgency signals for `task` at `now`.
pub fn assess(task: &Task, stale_days: f64, now: DateTime<Utc>) -> TaskUrgency {
    TaskUrgency {
        id: task.id.clone(),
        color: urgency_color(task.due_date, task.created_at, task.status, now),
        level: urgency_level(task.due_date, now),
        stale: is_stale(task.created_at, task.status, stale_days, now),
        label: indicator_label(task.due_date, now),
    }
}
