use chrono::{DateTime, FixedOffset};
use clap::Args;
use liminal_core::stats::{self, EodSummary, GamificationStats};
use liminal_core::{Config, FileBestStore};
use serde::Serialize;

use super::{print_json, TasksArgs};

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    tasks: TasksArgs,

    /// Print the end-of-day summary instead of the raw stats
    #[arg(long)]
    summary: bool,
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    stats: GamificationStats,
    best_suffix: String,
    impact_message: String,
}

pub fn run(args: StatsArgs, now: DateTime<FixedOffset>) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = args.tasks.load()?;
    let config = Config::load_or_default();
    let mut store = FileBestStore::new(config.state_file()?);

    let stats =
        stats::compute_stats_with_key(&tasks, &mut store, &config.stats.personal_best_key, &now)?;

    if args.summary {
        return print_json(&EodSummary::from_stats(&stats));
    }

    print_json(&StatsReport {
        best_suffix: stats.best_suffix(),
        impact_message: stats.impact_message(),
        stats,
    })
}
