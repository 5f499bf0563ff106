use crate::i18n::Language;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read error: {source}")]
    Read {
        #[from]
        source: std::io::Error,
    },

    #[error("TOML parse error: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("TOML write error: {message}")]
    Write { message: String },
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub timer: TimerConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: Language,
}

/// Work/break durations in minutes. Adjustable at runtime through the
/// daemon; the file only seeds the initial value for a run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub work_duration_minutes: u64,
    pub break_duration_minutes: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub sound_enabled: bool,
    pub urgency: NotificationUrgency,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationUrgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration_minutes: 30,
            break_duration_minutes: 5,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            urgency: NotificationUrgency::Normal,
        }
    }
}

impl TimerConfig {
    pub const WORK_MINUTES_MIN: u64 = 5;
    pub const WORK_MINUTES_MAX: u64 = 120;
    pub const WORK_MINUTES_STEP: u64 = 5;
    pub const BREAK_MINUTES_MIN: u64 = 1;
    pub const BREAK_MINUTES_MAX: u64 = 30;

    /// Rounds to the 5-minute step, then clamps into [5, 120].
    pub fn clamp_work_minutes(minutes: u64) -> u64 {
        let stepped = (minutes + Self::WORK_MINUTES_STEP / 2) / Self::WORK_MINUTES_STEP
            * Self::WORK_MINUTES_STEP;
        stepped.clamp(Self::WORK_MINUTES_MIN, Self::WORK_MINUTES_MAX)
    }

    /// Clamps into [1, 30]; break durations step by one minute.
    pub fn clamp_break_minutes(minutes: u64) -> u64 {
        minutes.clamp(Self::BREAK_MINUTES_MIN, Self::BREAK_MINUTES_MAX)
    }

    /// A copy with both durations forced into their valid ranges, so a
    /// hand-edited config file cannot smuggle in an out-of-range countdown.
    pub fn clamped(&self) -> Self {
        Self {
            work_duration_minutes: Self::clamp_work_minutes(self.work_duration_minutes),
            break_duration_minutes: Self::clamp_break_minutes(self.break_duration_minutes),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("etut")
            .join("config.toml")
    }

    /// Persists a new language choice, preserving whatever else the file
    /// already contains.
    pub fn save_language(language: Language) -> Result<(), ConfigError> {
        let path = Self::config_path();

        let mut document: toml::Value = if path.exists() {
            toml::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            toml::Value::Table(Default::default())
        };

        let Some(table) = document.as_table_mut() else {
            return Err(ConfigError::Write {
                message: "config root is not a table".to_string(),
            });
        };
        table
            .entry("general")
            .or_insert_with(|| toml::Value::Table(Default::default()))
            .as_table_mut()
            .ok_or_else(|| ConfigError::Write {
                message: "[general] is not a table".to_string(),
            })?
            .insert(
                "language".to_string(),
                toml::Value::String(language.code().to_string()),
            );

        let content = toml::to_string_pretty(&document).map_err(|error| ConfigError::Write {
            message: error.to_string(),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
