//! End-of-day summary shown once the workday is over.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::gamification::{format_impact_message, GamificationStats};

/// Content of the end-of-day toast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EodSummary {
    pub headline: String,
    pub is_new_best: bool,
    pub lines: Vec<String>,
}

impl EodSummary {
    pub fn from_stats(stats: &GamificationStats) -> Self {
        let is_new_best = stats.current_streak > 0 && stats.current_streak == stats.personal_best;
        let headline = if is_new_best {
            "New personal best!"
        } else {
            "Great work today!"
        };

        let mut lines = vec![format!("Tasks completed: {}", stats.done_today)];

        let impact = format_impact_message(stats.impact_hours);
        if !impact.is_empty() {
            lines.push(impact);
        }

        if stats.current_streak > 0 {
            let unit = if stats.current_streak == 1 { "day" } else { "days" };
            let mut streak = format!("Streak: {} {unit}", stats.current_streak);
            if stats.personal_best > 0 {
                streak.push_str(&format!(" (best: {})", stats.personal_best));
            }
            lines.push(streak);
        }

        Self {
            headline: headline.to_string(),
            is_new_best,
            lines,
        }
    }
}

fn end_of_workday<Tz: TimeZone>(now: &DateTime<Tz>, end_hour: u32) -> Option<DateTime<Tz>> {
    let time = if end_hour >= 24 {
        NaiveTime::from_hms_opt(23, 59, 59)?
    } else {
        NaiveTime::from_hms_opt(end_hour, 0, 0)?
    };
    now.timezone()
        .from_local_datetime(&now.date_naive().and_time(time))
        .earliest()
}

/// Time left until today's end of workday, `None` once it has passed.
pub fn until_end_of_day<Tz: TimeZone>(now: &DateTime<Tz>, end_hour: u32) -> Option<Duration> {
    let eod = end_of_workday(now, end_hour)?;
    let left = eod - now.clone();
    (left > Duration::zero()).then_some(left)
}

/// Whether the summary is due: the workday is over and it has not yet
/// been shown today.
pub fn should_show_eod_summary<Tz: TimeZone>(
    now: &DateTime<Tz>,
    last_shown: Option<NaiveDate>,
    end_hour: u32,
) -> bool {
    until_end_of_day(now, end_hour).is_none() && last_shown != Some(now.date_naive())
}
