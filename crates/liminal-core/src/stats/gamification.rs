//! Completion stats: done today, streak, personal best and impact hours.
//!
//! Calendar days are taken in the timezone of the `now` passed in, so a
//! task finished at 23:30 local counts for that local day.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Result;
use crate::storage::{PersonalBestStore, PERSONAL_BEST_KEY};
use crate::task::Task;

/// How far back the streak walk looks, in days.
pub const STREAK_LOOKBACK_DAYS: u32 = 365;

/// Stats shown in the stats bar and end-of-day summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GamificationStats {
    pub done_today: usize,
    pub current_streak: u32,
    pub personal_best: u32,
    pub impact_hours: f64,
}

impl GamificationStats {
    /// `" (best: N)"` while the current streak trails the best, else empty.
    pub fn best_suffix(&self) -> String {
        if self.personal_best > self.current_streak {
            format!(" (best: {})", self.personal_best)
        } else {
            String::new()
        }
    }

    pub fn impact_message(&self) -> String {
        format_impact_message(self.impact_hours)
    }
}

fn local_date<Tz: TimeZone>(stamp: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    stamp.with_timezone(tz).date_naive()
}

/// Done tasks completed on `now`'s calendar date.
fn completed_today<'a, Tz: TimeZone>(tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
    let today = now.date_naive();
    let tz = now.timezone();
    tasks
        .iter()
        .filter(|t| {
            t.completed_at()
                .is_some_and(|done| local_date(done, &tz) == today)
        })
        .collect()
}

/// Number of tasks completed today.
pub fn done_today<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> usize {
    completed_today(tasks, now).len()
}

/// Local calendar dates on which at least one task was completed.
pub fn completion_dates<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> HashSet<NaiveDate> {
    tasks
        .iter()
        .filter_map(Task::completed_at)
        .map(|done| local_date(done, tz))
        .collect()
}

/// Consecutive days with completions, ending today or yesterday.
///
/// A today without completions yet does not break the streak; the first
/// earlier day without one ends it.
pub fn current_streak<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> u32 {
    let dates = completion_dates(tasks, &now.timezone());
    let mut day = now.date_naive();
    let mut streak = 0;

    for i in 0..STREAK_LOOKBACK_DAYS {
        if dates.contains(&day) {
            streak += 1;
        } else if i != 0 {
            break;
        }
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }

    streak
}

/// Stored best streak; missing or unreadable values count as 0.
pub fn read_personal_best<S: PersonalBestStore + ?Sized>(store: &S, key: &str) -> Result<u32> {
    let Some(raw) = store.get(key)? else {
        return Ok(0);
    };
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u32>() {
        Ok(best) => Ok(best),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unreadable personal best");
            Ok(0)
        }
    }
}

/// Record `current_streak` if it beats the stored best; returns the best.
///
/// Re-reads before writing and only ever writes a larger value, so repeat
/// calls with the same or a smaller streak leave the store untouched.
pub fn update_personal_best<S: PersonalBestStore + ?Sized>(
    store: &mut S,
    key: &str,
    current_streak: u32,
) -> Result<u32> {
    let best = read_personal_best(&*store, key)?;
    if current_streak > best {
        store.set(key, &current_streak.to_string())?;
        tracing::info!(previous = best, best = current_streak, "new personal best streak");
        return Ok(current_streak);
    }
    Ok(best)
}

/// Hours of estimated work completed today.
///
/// Only tasks with a duration estimate contribute; missing estimates are
/// skipped rather than counted as zero.
pub fn impact_hours<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> f64 {
    let minutes: u64 = completed_today(tasks, now)
        .into_iter()
        .filter_map(|t| t.estimated_duration)
        .filter(|&m| m > 0)
        .map(u64::from)
        .sum();
    minutes as f64 / 60.0
}

/// Message for the impact stat.
///
/// Empty for zero hours (which also covers "no estimates at all"), a vague
/// message under half an hour, otherwise rounded to the nearest half hour.
pub fn format_impact_message(hours: f64) -> String {
    if hours.is_nan() || hours <= 0.0 {
        return String::new();
    }
    if hours < 0.5 {
        return "You freed up some time today".to_string();
    }
    let rounded = (hours * 2.0).round() / 2.0;
    if rounded == 1.0 {
        "You freed up 1 hour today".to_string()
    } else {
        format!("You freed up {rounded} hours today")
    }
}

/// Compute all stats, persisting a new personal best under the default key.
pub fn compute_stats<S, Tz>(tasks: &[Task], store: &mut S, now: &DateTime<Tz>) -> Result<GamificationStats>
where
    S: PersonalBestStore + ?Sized,
    Tz: TimeZone,
{
    compute_stats_with_key(tasks, store, PERSONAL_BEST_KEY, now)
}

/// [`compute_stats`] with a custom personal-best key.
pub fn compute_stats_with_key<S, Tz>(
    tasks: &[Task],
    store: &mut S,
    key: &str,
    now: &DateTime<Tz>,
) -> Result<GamificationStats>
where
    S: PersonalBestStore + ?Sized,
    Tz: TimeZone,
{
    let done_today = done_today(tasks, now);
    let current_streak = current_streak(tasks, now);
    let personal_best = update_personal_best(store, key, current_streak)?;
    let impact_hours = impact_hours(tasks, now);

    tracing::debug!(done_today, current_streak, personal_best, impact_hours, "computed stats");

    Ok(GamificationStats {
        done_today,
        current_streak,
        personal_best,
        impact_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBestStore;
    use crate::task::TaskStatus;
    use chrono::{Duration, FixedOffset};

    fn tz() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn now() -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(2026, 4, 20, 14, 0, 0).unwrap()
    }

    fn done_days_ago(id: &str, days: i64, minutes: Option<u32>) -> Task {
        let when = (now() - Duration::days(days)).with_timezone(&Utc);
        let mut task = Task::new(id, id, when - Duration::days(1));
        task.status = TaskStatus::Done;
        task.updated_at = Some(when);
        task.estimated_duration = minutes;
        task
    }

    #[test]
    fn five_day_streak_ending_today() {
        let tasks: Vec<Task> = (0..5).map(|d| done_days_ago(&format!("t{d}"), d, None)).collect();
        assert_eq!(current_streak(&tasks, &now()), 5);
    }

    #[test]
    fn empty_today_does_not_break_streak() {
        let tasks: Vec<Task> = (1..4).map(|d| done_days_ago(&format!("t{d}"), d, None)).collect();
        assert_eq!(current_streak(&tasks, &now()), 3);
    }

    #[test]
    fn gap_ends_streak() {
        let tasks = vec![
            done_days_ago("a", 0, None),
            done_days_ago("b", 1, None),
            done_days_ago("c", 4, None),
            done_days_ago("d", 5, None),
        ];
        assert_eq!(current_streak(&tasks, &now()), 2);
    }

    #[test]
    fn no_recent_completion_is_zero() {
        let tasks = vec![done_days_ago("a", 2, None), done_days_ago("b", 3, None)];
        assert_eq!(current_streak(&tasks, &now()), 0);
    }

    #[test]
    fn streak_ignores_not_done_tasks() {
        let mut task = done_days_ago("a", 0, None);
        task.status = TaskStatus::InProgress;
        assert_eq!(current_streak(&[task], &now()), 0);
    }

    #[test]
    fn streak_is_capped_at_lookback() {
        let tasks: Vec<Task> = (0..400).map(|d| done_days_ago(&format!("t{d}"), d, None)).collect();
        assert_eq!(current_streak(&tasks, &now()), STREAK_LOOKBACK_DAYS);
    }

    #[test]
    fn done_today_uses_local_date() {
        // 04:00 UTC on the 21st is 23:00 on the 20th at UTC-5.
        let mut late = done_days_ago("late", 0, None);
        late.updated_at = Some(Utc.with_ymd_and_hms(2026, 4, 21, 4, 0, 0).unwrap());
        let yesterday = done_days_ago("y", 1, None);
        assert_eq!(done_today(&[late, yesterday], &now()), 1);
    }

    #[test]
    fn personal_best_only_grows() {
        let mut store = MemoryBestStore::new();
        assert_eq!(update_personal_best(&mut store, PERSONAL_BEST_KEY, 7).unwrap(), 7);
        assert_eq!(update_personal_best(&mut store, PERSONAL_BEST_KEY, 3).unwrap(), 7);
        assert_eq!(update_personal_best(&mut store, PERSONAL_BEST_KEY, 7).unwrap(), 7);
        assert_eq!(store.writes(), 1);
        assert_eq!(store.get(PERSONAL_BEST_KEY).unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn unreadable_best_counts_as_zero() {
        let mut store = MemoryBestStore::new();
        store.set(PERSONAL_BEST_KEY, "lots").unwrap();
        assert_eq!(read_personal_best(&store, PERSONAL_BEST_KEY).unwrap(), 0);
        store.set(PERSONAL_BEST_KEY, "12days").unwrap();
        assert_eq!(read_personal_best(&store, PERSONAL_BEST_KEY).unwrap(), 12);
    }

    #[test]
    fn impact_hours_skip_missing_estimates() {
        let tasks = vec![
            done_days_ago("a", 0, Some(45)),
            done_days_ago("b", 0, Some(45)),
            done_days_ago("c", 0, None),
            done_days_ago("d", 1, Some(600)),
        ];
        assert_eq!(impact_hours(&tasks, &now()), 1.5);
    }

    #[test]
    fn impact_messages() {
        assert_eq!(format_impact_message(0.0), "");
        assert_eq!(format_impact_message(0.25), "You freed up some time today");
        assert_eq!(format_impact_message(0.8), "You freed up 1 hour today");
        assert_eq!(format_impact_message(1.2), "You freed up 1 hour today");
        assert_eq!(format_impact_message(1.3), "You freed up 1.5 hours today");
        assert_eq!(format_impact_message(2.0), "You freed up 2 hours today");
        assert_eq!(format_impact_message(0.5), "You freed up 0.5 hours today");
    }

    #[test]
    fn compute_stats_end_to_end() {
        let mut store = MemoryBestStore::new();
        store.set(PERSONAL_BEST_KEY, "2").unwrap();
        let tasks = vec![
            done_days_ago("a", 0, Some(30)),
            done_days_ago("b", 0, Some(60)),
            done_days_ago("c", 1, None),
            done_days_ago("d", 2, None),
        ];
        let stats = compute_stats(&tasks, &mut store, &now()).unwrap();
        assert_eq!(
            stats,
            GamificationStats {
                done_today: 2,
                current_streak: 3,
                personal_best: 3,
                impact_hours: 1.5,
            }
        );
        assert_eq!(stats.best_suffix(), "");
    }

    #[test]
    fn best_suffix_when_trailing() {
        let stats = GamificationStats {
            current_streak: 2,
            personal_best: 9,
            ..GamificationStats::default()
        };
        assert_eq!(stats.best_suffix(), " (best: 9)");
    }
}
