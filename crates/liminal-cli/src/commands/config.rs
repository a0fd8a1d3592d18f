//! `liminal config`: read and edit `~/.config/liminal/config.toml`.
//!
//! Keys are dotted paths into the `urgency`, `capacity` and `stats` tables.

use clap::Subcommand;
use liminal_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dotted key: urgency.stale_days, capacity.workday_end_hour,
        /// stats.personal_best_key or stats.state_file
        key: String,
    },
    /// Change one setting; the value is validated before it is saved
    Set {
        /// Dotted key, as for `get`
        key: String,
        /// New value (number for urgency/capacity keys, text for stats keys)
        value: String,
    },
    /// Print the whole configuration as JSON
    List,
    /// Restore the default thresholds and personal-best location
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key} (see `liminal config list`)"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            Config::load()?.set(&key, &value)?;
            tracing::debug!(key = %key, value = %value, "config updated");
            println!("ok");
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to Liminal defaults");
        }
    }
    Ok(())
}
