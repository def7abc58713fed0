//! TOML-based application configuration.
//!
//! Stores the calendar query settings:
//! - Hebcal geoname id of the community's location
//! - Havdalah offset in minutes
//! - How far ahead to query for the coming Shabbat
//!
//! Configuration is stored at `~/.config/luach/config.toml`.

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

fn default_geoname_id() -> u32 {
    // Ramat Gan, Israel
    293_397
}

fn default_havdalah_minutes() -> u8 {
    18
}

fn default_lookahead_days() -> u8 {
    14
}

/// Calendar query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_geoname_id")]
    pub geoname_id: u32,
    #[serde(default = "default_havdalah_minutes")]
    pub havdalah_minutes: u8,
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u8,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            geoname_id: default_geoname_id(),
            havdalah_minutes: default_havdalah_minutes(),
            lookahead_days: default_lookahead_days(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/luach/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
}

impl Config {
    fn path() -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut value = &json;
        for part in key.split('.') {
            value = value.get(part)?;
        }
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns an error for unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "calendar.geoname_id" => {
                self.calendar.geoname_id =
                    value.parse().map_err(|_| invalid("expected an integer".into()))?;
            }
            "calendar.havdalah_minutes" => {
                self.calendar.havdalah_minutes =
                    value.parse().map_err(|_| invalid("expected minutes 0-255".into()))?;
            }
            "calendar.lookahead_days" => {
                self.calendar.lookahead_days =
                    value.parse().map_err(|_| invalid("expected days 0-255".into()))?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
