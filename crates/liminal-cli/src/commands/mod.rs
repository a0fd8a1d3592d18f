pub mod capacity;
pub mod capture;
pub mod completions;
pub mod config;
pub mod defaults;
pub mod stats;
pub mod urgency;

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use clap::Args;
use liminal_core::{StoreError, Task, ValidationError};
use serde::Serialize;

/// Where to read the task list from.
#[derive(Args)]
pub struct TasksArgs {
    /// JSON array of tasks; reads stdin when omitted or "-"
    #[arg(long, value_name = "FILE")]
    pub tasks: Option<PathBuf>,
}

impl TasksArgs {
    pub fn load(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        match self.tasks.as_deref() {
            Some(path) if path != Path::new("-") => read_tasks_file(path),
            _ => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                parse_tasks(&input)
            }
        }
    }
}

fn read_tasks_file(path: &Path) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tasks(&content)
}

fn parse_tasks(input: &str) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    let tasks: Vec<Task> = serde_json::from_str(input)?;
    tracing::debug!(count = tasks.len(), "loaded tasks");
    Ok(tasks)
}

/// `--now` must carry an offset so "today" is unambiguous.
pub fn parse_now(input: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    DateTime::parse_from_rfc3339(input.trim())
        .map_err(|_| ValidationError::InvalidTimestamp(input.to_string()))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
