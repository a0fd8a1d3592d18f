//! # Liminal Core Library
//!
//! This library provides the task-engine logic behind Liminal, an
//! ADHD-friendly task manager. Tasks live in an external store; everything
//! here is a pure transformation over task values, with "now" passed in by
//! the caller. A standalone CLI exposes every engine for scripting.
//!
//! ## Architecture
//!
//! - **Quick capture**: inline mini-syntax parser (`!high`, `p:70`, `e:30m`,
//!   `v:80`) and chat intent routing
//! - **Urgency**: deadline color gradient, urgency buckets, backlog staleness,
//!   one-hour-before deadline reminders
//! - **Smart defaults**: priority / value / effort decision table
//! - **Capacity**: today's work against the remaining workday
//! - **Stats**: streaks, personal best, impact hours, end-of-day summary
//! - **Storage**: TOML configuration and the personal-best key-value store
//!
//! ## Key Components
//!
//! - [`capture::parse`]: Quick-capture parser
//! - [`urgency::urgency_color`] / [`urgency::urgency_level`]: Urgency signals
//! - [`defaults::calculate_defaults`]: Smart defaults
//! - [`capacity::summarize`]: Capacity planner
//! - [`stats::compute_stats`]: Gamification stats
//! - [`PersonalBestStore`]: Injected persistence for the best streak

pub mod capacity;
pub mod capture;
pub mod defaults;
pub mod error;
pub mod stats;
pub mod storage;
pub mod task;
pub mod urgency;

pub use capacity::CapacitySummary;
pub use capture::{CaptureIntent, CaptureOutcome};
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use stats::{EodSummary, GamificationStats};
pub use storage::{Config, FileBestStore, MemoryBestStore, PersonalBestStore};
pub use task::{PriorityLabel, Task, TaskCreate, TaskDraft, TaskStatus};
pub use urgency::{Color, Countdown, Reminder, ReminderRegistry, TaskUrgency, UrgencyLevel};
