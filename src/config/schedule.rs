use chrono::Weekday;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::ScheduleKind;
use crate::error::{PathError, Result};

/// Environment variable that points at an explicit `schedule.toml`.
pub const CONFIG_ENV: &str = "MISHNAH_PATH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub schedule: ScheduleKind,
    pub rest_day: Weekday,
    pub skip_friday: bool,
    /// Study days the average-rate pace assumes per order.
    pub study_days_per_year: u32,
    /// Admitted study days planned ahead by default.
    pub horizon_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            schedule: ScheduleKind::WeekdaysOnly,
            rest_day: Weekday::Sat,
            skip_friday: false,
            study_days_per_year: 250,
            horizon_days: 14,
        }
    }
}

impl ScheduleConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScheduleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PathError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.study_days_per_year == 0 {
            return Err(PathError::Config {
                message: "study_days_per_year must be at least 1".into(),
            });
        }
        Ok(())
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(explicit);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support/mishnah-path");
            dir.push("schedule.toml");
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push("mishnah-path");
            dir.push("schedule.toml");
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".config/mishnah-path");
            dir.push("schedule.toml");
            return dir;
        }
    }

    PathBuf::from("schedule.toml")
}

/// Missing or unreadable config falls back to defaults.
pub fn load_schedule_config(path: &Path) -> ScheduleConfig {
    if !path.exists() {
        tracing::debug!(path = ?path, "No schedule config found, using defaults");
        return ScheduleConfig::default();
    }

    match ScheduleConfig::from_path(path) {
        Ok(config) => {
            tracing::info!(path = ?path, "Loaded schedule config");
            config
        }
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "Failed to load schedule config, using defaults");
            ScheduleConfig::default()
        }
    }
}

lazy_static! {
    static ref SCHEDULE_CONFIG: ScheduleConfig = load_schedule_config(&get_config_path());
}

/// Get the cached schedule configuration (loaded once per process)
pub fn get_schedule_config() -> &'static ScheduleConfig {
    &SCHEDULE_CONFIG
}
