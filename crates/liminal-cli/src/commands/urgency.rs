use chrono::{DateTime, FixedOffset, Utc};
use clap::Args;
use liminal_core::task::timestamp::parse_timestamp;
use liminal_core::urgency::{self, Color, Countdown, UrgencyLevel};
use liminal_core::{Config, TaskStatus};
use serde::Serialize;

use super::print_json;

#[derive(Args)]
pub struct UrgencyArgs {
    /// When the task was created
    #[arg(long, value_parser = parse_timestamp)]
    created: DateTime<Utc>,

    /// Due date; without one the task has no urgency
    #[arg(long, value_parser = parse_timestamp)]
    due: Option<DateTime<Utc>>,

    #[arg(long, default_value = "backlog")]
    status: TaskStatus,

    /// Backlog age in days before a task is stale [default: from config]
    #[arg(long)]
    stale_days: Option<f64>,
}

#[derive(Serialize)]
struct UrgencyReport {
    color: Color,
    level: UrgencyLevel,
    stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    countdown: Countdown,
}

pub fn run(args: UrgencyArgs, now: DateTime<FixedOffset>) -> Result<(), Box<dyn std::error::Error>> {
    let stale_days = match args.stale_days {
        Some(days) => days,
        None => Config::load_or_default().urgency.stale_days,
    };
    let now = now.with_timezone(&Utc);

    let report = UrgencyReport {
        color: urgency::urgency_color(args.due, args.created, args.status, now),
        level: urgency::urgency_level(args.due, now),
        stale: urgency::is_stale(args.created, args.status, stale_days, now),
        progress: args
            .due
            .map(|due| urgency::deadline_progress(due, args.created, now)),
        label: urgency::indicator_label(args.due, now),
        countdown: urgency::countdown(args.due, now),
    };
    print_json(&report)
}
