//! Task data model shared by every engine.
//!
//! Tasks are owned by the external task store; the engines in this crate only
//! read [`Task`] values and produce [`TaskCreate`] payloads for the store to
//! persist.

pub mod timestamp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowest score a task may carry on any 1-100 axis.
pub const MIN_SCORE: u8 = 1;
/// Highest score a task may carry on any 1-100 axis.
pub const MAX_SCORE: u8 = 100;
/// Score used when nothing better is known.
pub const NEUTRAL_SCORE: u8 = 50;

/// Clamp an arbitrary integer onto the 1-100 score range.
///
/// Out-of-range input is pulled to the nearest bound rather than rejected,
/// and clamping an already clamped value returns it unchanged.
pub fn clamp_score(value: i64) -> u8 {
    value.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8
}

/// Any JSON number, rounded and clamped with [`clamp_score`].
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(|score| clamp_score(score.round() as i64)))
}

/// Task status tag.
///
/// The store owns transitions; the engines only compare against it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Captured but not yet triaged
    #[default]
    Backlog,
    /// Triaged, waiting to start
    Todo,
    /// Being worked on
    InProgress,
    /// Waiting on something external
    Blocked,
    /// Completed
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Backlog,
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "status".into(),
                message: format!(
                    "'{s}' is not one of backlog, todo, in_progress, blocked, done"
                ),
            })
    }
}

/// Categorical priority derived from a 1-100 priority score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLabel {
    High,
    #[default]
    Medium,
    Low,
}

impl PriorityLabel {
    /// Map a score onto a label: 67 and above is high, 34 and above medium.
    pub fn from_score(score: u8) -> Self {
        if score >= 67 {
            PriorityLabel::High
        } else if score >= 34 {
            PriorityLabel::Medium
        } else {
            PriorityLabel::Low
        }
    }

    /// Score assigned by the `!high` / `!medium` / `!low` shorthand.
    pub fn shorthand_score(&self) -> u8 {
        match self {
            PriorityLabel::High => 90,
            PriorityLabel::Medium => 60,
            PriorityLabel::Low => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLabel::High => "high",
            PriorityLabel::Medium => "medium",
            PriorityLabel::Low => "low",
        }
    }
}

impl fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(PriorityLabel::High),
            "medium" => Ok(PriorityLabel::Medium),
            "low" => Ok(PriorityLabel::Low),
            _ => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("'{s}' is not one of high, medium, low"),
            }),
        }
    }
}

/// A task as read back from the task store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: PriorityLabel,
    /// Clamped onto 1-100 on read; the store does not enforce the range.
    #[serde(
        default,
        deserialize_with = "deserialize_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority_score: Option<u8>,
    #[serde(
        default,
        deserialize_with = "deserialize_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_score: Option<u8>,
    /// Legacy twin of `estimated_duration`, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_score: Option<u32>,
    /// Estimated duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative_id: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// Set by the store on every write, including the transition to done.
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Minimal backlog task with everything optional left unset.
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            notes: None,
            status: TaskStatus::Backlog,
            priority: PriorityLabel::Medium,
            priority_score: None,
            value_score: None,
            effort_score: None,
            estimated_duration: None,
            start_date: None,
            due_date: None,
            theme_id: None,
            initiative_id: None,
            created_at,
            updated_at: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// Completion timestamp: `updated_at` of a done task.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        if self.is_done() {
            self.updated_at
        } else {
            None
        }
    }

    /// Best duration estimate in minutes, preferring `estimated_duration`.
    pub fn duration_minutes(&self) -> Option<u32> {
        self.estimated_duration.or(self.effort_score)
    }
}

/// Task-creation payload handed to the task store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
    /// Free-text start date ("next monday"), resolved by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_natural: Option<String>,
    /// Free-text due date, resolved by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date_natural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative_id: Option<String>,
}

/// Partially filled task, as typed by the user before defaults are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_natural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date_natural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative_id: Option<String>,
}

impl TaskDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
