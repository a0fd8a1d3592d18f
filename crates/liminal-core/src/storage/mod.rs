mod best;
mod config;

pub use best::{FileBestStore, MemoryBestStore, PersonalBestStore, PERSONAL_BEST_KEY};
pub use config::{CapacityConfig, Config, StatsConfig, UrgencyConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/liminal[-dev]/` based on LIMINAL_ENV.
///
/// Set LIMINAL_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LIMINAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("liminal-dev")
    } else {
        base_dir.join("liminal")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
