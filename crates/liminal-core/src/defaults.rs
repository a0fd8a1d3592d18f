//! Smart defaults for task creation.
//!
//! Fills in priority, value and effort from the two signals a user gives
//! almost for free: when it is due and how long it takes.
//!
//! - Priority follows due-date proximity (imminent feels urgent)
//! - Value follows duration (quick wins feel valuable)
//! - Effort mirrors the duration in minutes
//!
//! This is a fixed decision table, not a weighted score.

use chrono::{DateTime, Utc};

use crate::task::{PriorityLabel, TaskCreate, TaskDraft, TaskStatus, NEUTRAL_SCORE};

/// Duration assumed when the draft has none, in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Priority score from hours until the due date.
///
/// - < 24h: 90 (due today, including already overdue)
/// - < 72h: 70
/// - < 168h: 50
/// - otherwise: 30
/// - no due date: 50
pub fn priority_for_due(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u8 {
    let Some(due) = due else {
        return NEUTRAL_SCORE;
    };
    let hours_until_due = (due - now).num_milliseconds() as f64 / 3_600_000.0;

    if hours_until_due < 24.0 {
        90
    } else if hours_until_due < 72.0 {
        70
    } else if hours_until_due < 168.0 {
        50
    } else {
        30
    }
}

/// Value score from duration in minutes.
///
/// - < 15 min: 90 (quick win)
/// - < 30 min: 70
/// - < 60 min: 50
/// - otherwise: 30
pub fn value_for_duration(minutes: u32) -> u8 {
    if minutes < 15 {
        90
    } else if minutes < 30 {
        70
    } else if minutes < 60 {
        50
    } else {
        30
    }
}

/// Complete a draft into a creation payload.
///
/// Fields the table does not derive pass through untouched.
pub fn calculate_defaults(draft: &TaskDraft, now: DateTime<Utc>) -> TaskCreate {
    let duration = draft.estimated_duration.unwrap_or(DEFAULT_DURATION_MINUTES);
    let priority_score = priority_for_due(draft.due_date, now);
    let value_score = value_for_duration(duration);

    tracing::debug!(duration, priority_score, value_score, "applied smart defaults");

    TaskCreate {
        title: draft.title.clone().unwrap_or_default(),
        description: draft.description.clone(),
        notes: draft.notes.clone(),
        priority: Some(PriorityLabel::from_score(priority_score)),
        priority_score: Some(priority_score),
        status: Some(draft.status.unwrap_or(TaskStatus::Backlog)),
        start_date: draft.start_date,
        due_date: draft.due_date,
        start_date_natural: draft.start_date_natural.clone(),
        due_date_natural: draft.due_date_natural.clone(),
        estimated_duration: Some(duration),
        effort_score: Some(duration),
        value_score: Some(value_score),
        theme_id: draft.theme_id.clone(),
        initiative_id: draft.initiative_id.clone(),
    }
}
