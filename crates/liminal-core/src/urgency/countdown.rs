//! Human-readable countdown text for due dates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown instead of "overdue" wording once a deadline passes.
pub const OVERDUE_LABEL: &str = "Let's finish this";

const MINUTES_IN_DAY: f64 = 1440.0;
const MINUTES_IN_MONTH: f64 = 43_200.0;
const MINUTES_IN_YEAR: f64 = 525_600.0;

/// Countdown state for a due date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Countdown {
    /// `None` without a due date, `"overdue"` once passed, else e.g. `"3 hours"`.
    pub time_left: Option<String>,
    pub is_overdue: bool,
}

/// Countdown from `now` to `due`.
pub fn countdown(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Countdown {
    let Some(due) = due else {
        return Countdown::default();
    };
    let remaining_ms = (due - now).num_milliseconds();
    if remaining_ms <= 0 {
        return Countdown {
            time_left: Some("overdue".to_string()),
            is_overdue: true,
        };
    }
    Countdown {
        time_left: Some(format_distance(remaining_ms)),
        is_overdue: false,
    }
}

/// Strict distance in the largest fitting unit, rounded to nearest.
///
/// Units step up at one minute, one hour, one day, 30 days and 365 days;
/// a distance that rounds to 12 months is reported as a year.
pub fn format_distance(milliseconds: i64) -> String {
    let ms = milliseconds.unsigned_abs() as f64;
    let minutes = ms / 60_000.0;

    if minutes < 1.0 {
        plural((ms / 1000.0).round(), "second")
    } else if minutes < 60.0 {
        plural(minutes.round(), "minute")
    } else if minutes < MINUTES_IN_DAY {
        plural((minutes / 60.0).round(), "hour")
    } else if minutes < MINUTES_IN_MONTH {
        plural((minutes / MINUTES_IN_DAY).round(), "day")
    } else if minutes < MINUTES_IN_YEAR {
        let months = (minutes / MINUTES_IN_MONTH).round();
        if months >= 12.0 {
            plural(1.0, "year")
        } else {
            plural(months, "month")
        }
    } else {
        plural((minutes / MINUTES_IN_YEAR).round(), "year")
    }
}

fn plural(count: f64, unit: &str) -> String {
    let count = count as u64;
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Card label for a due date: `"<n units> left"`, or an encouraging
/// prompt once overdue.
pub fn indicator_label(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<String> {
    let state = countdown(due, now);
    if state.is_overdue {
        return Some(OVERDUE_LABEL.to_string());
    }
    state.time_left.map(|left| format!("{left} left"))
}
