//! Statistics module for Liminal
//!
//! Motivation stats derived from the task list on every render: tasks done
//! today, the completion streak with its persisted personal best, impact
//! hours, and the end-of-day summary built from them.

mod gamification;
mod summary;

pub use gamification::{
    completion_dates, compute_stats, compute_stats_with_key, current_streak, done_today,
    format_impact_message, impact_hours, read_personal_best, update_personal_best,
    GamificationStats, STREAK_LOOKBACK_DAYS,
};

pub use summary::{should_show_eod_summary, until_end_of_day, EodSummary};
