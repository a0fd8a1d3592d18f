use chrono::{DateTime, FixedOffset};
use liminal_core::{capacity, CapacitySummary, Config};
use serde::Serialize;

use super::{print_json, TasksArgs};

#[derive(Serialize)]
struct CapacityReport {
    #[serde(flatten)]
    summary: CapacitySummary,
    headline: String,
}

pub fn run(args: TasksArgs, now: DateTime<FixedOffset>) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = args.load()?;
    let config = Config::load_or_default();

    let summary = capacity::summarize(&tasks, &now, config.capacity.workday_end_hour);
    let headline = summary.headline();
    print_json(&CapacityReport { summary, headline })
}
