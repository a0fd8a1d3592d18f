//! TOML-based application configuration.
//!
//! Stores the tunables of the engines:
//! - Backlog staleness threshold
//! - End of the workday used for capacity planning
//! - Where and under which key the personal-best streak is kept
//!
//! Configuration is stored at `~/.config/liminal/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{best::PERSONAL_BEST_KEY, data_dir};
use crate::capacity::DEFAULT_WORKDAY_END_HOUR;
use crate::error::{ConfigError, Result};
use crate::urgency::DEFAULT_STALE_DAYS;

/// Urgency display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrgencyConfig {
    /// Days a backlog task may sit before it is shown as stale.
    #[serde(default = "default_stale_days")]
    pub stale_days: f64,
}

/// Capacity planner settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityConfig {
    /// Local hour (0-24) at which the workday ends.
    #[serde(default = "default_workday_end_hour")]
    pub workday_end_hour: u32,
}

/// Gamification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsConfig {
    #[serde(default = "default_personal_best_key")]
    pub personal_best_key: String,
    /// Personal-best file; `<data_dir>/state.json` when unset.
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/liminal/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub urgency: UrgencyConfig,
    #[serde(default)]
    pub capacity: CapacityConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

fn default_stale_days() -> f64 {
    DEFAULT_STALE_DAYS
}
fn default_workday_end_hour() -> u32 {
    DEFAULT_WORKDAY_END_HOUR
}
fn default_personal_best_key() -> String {
    PERSONAL_BEST_KEY.into()
}

impl Default for UrgencyConfig {
    fn default() -> Self {
        Self {
            stale_days: default_stale_days(),
        }
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            workday_end_hour: default_workday_end_hour(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            personal_best_key: default_personal_best_key(),
            state_file: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        if key.is_empty() {
            return Err(invalid("config key is empty".into()).into());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| invalid("unknown config key".into()))?;
                continue;
            }

            let obj = current
                .as_object_mut()
                .ok_or_else(|| invalid("unknown config key".into()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| invalid("unknown config key".into()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(invalid("unknown config key".into()).into())
    }

    /// Default location, `<data_dir>/config.toml`.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values the engines cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.urgency.stale_days.is_finite() || self.urgency.stale_days < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "urgency.stale_days".into(),
                message: "must be a non-negative number".into(),
            }
            .into());
        }
        if self.capacity.workday_end_hour > 24 {
            return Err(ConfigError::InvalidValue {
                key: "capacity.workday_end_hour".into(),
                message: "must be between 0 and 24".into(),
            }
            .into());
        }
        if self.stats.personal_best_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "stats.personal_best_key".into(),
                message: "must not be empty".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key, without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Personal-best file, from config or the data directory.
    pub fn state_file(&self) -> Result<PathBuf> {
        match &self.stats.state_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("state.json")),
        }
    }
}
