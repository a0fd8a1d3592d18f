use chrono::{DateTime, FixedOffset, Utc};
use clap::Args;
use liminal_core::defaults::calculate_defaults;
use liminal_core::task::timestamp::parse_timestamp;
use liminal_core::{TaskDraft, TaskStatus};

use super::print_json;

#[derive(Args)]
pub struct DefaultsArgs {
    /// Task title
    #[arg(long)]
    title: String,

    /// Due date (RFC 3339, naive ISO as UTC, or YYYY-MM-DD)
    #[arg(long, value_parser = parse_timestamp)]
    due: Option<DateTime<Utc>>,

    /// Estimated duration in minutes
    #[arg(long)]
    duration: Option<u32>,

    /// Initial status (backlog, todo, in_progress, blocked, done)
    #[arg(long)]
    status: Option<TaskStatus>,
}

pub fn run(args: DefaultsArgs, now: DateTime<FixedOffset>) -> Result<(), Box<dyn std::error::Error>> {
    let draft = TaskDraft {
        due_date: args.due,
        estimated_duration: args.duration,
        status: args.status,
        ..TaskDraft::titled(args.title)
    };
    print_json(&calculate_defaults(&draft, now.with_timezone(&Utc)))
}
