//! TOML-based engine configuration.
//!
//! Holds the tunables of the planning engine:
//! - Distribution defaults and the calendar-day ceiling
//! - Reschedule look-ahead horizon and free-time threshold
//!
//! Reading the file is up to the caller; this module only parses and renders.
//!
//! ```toml
//! [distribution]
//! default_item_minutes = 60
//! max_calendar_days = 100
//!
//! [reschedule]
//! horizon_days = 60
//! min_free_minutes = 30
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Goal distribution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Duration used when an item has no estimate for the chosen intensity.
    #[serde(default = "default_item_minutes")]
    pub default_item_minutes: u32,
    /// Calendar days walked, counting from the start date, before giving up.
    #[serde(default = "default_max_calendar_days")]
    pub max_calendar_days: u32,
}

/// Reschedule search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleConfig {
    /// Days searched after the reference date before falling back.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Free minutes a day needs to accept a relocated item.
    #[serde(default = "default_min_free_minutes")]
    pub min_free_minutes: u32,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub distribution: DistributionConfig,
    #[serde(default)]
    pub reschedule: RescheduleConfig,
}

// Default functions
fn default_item_minutes() -> u32 {
    60
}
fn default_max_calendar_days() -> u32 {
    100
}
fn default_horizon_days() -> u32 {
    60
}
fn default_min_free_minutes() -> u32 {
    30
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            default_item_minutes: default_item_minutes(),
            max_calendar_days: default_max_calendar_days(),
        }
    }
}

impl Default for RescheduleConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            min_free_minutes: default_min_free_minutes(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or a value fails
    /// [`EngineConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Render as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would make a search loop do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distribution.max_calendar_days == 0 {
            return Err(invalid("distribution.max_calendar_days", "must be at least 1"));
        }
        if self.reschedule.horizon_days == 0 {
            return Err(invalid("reschedule.horizon_days", "must be at least 1"));
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        let json = serde_json::to_value(self).ok()?;
        let val = key
            .split('.')
            .try_fold(&json, |current, part| current.get(part))?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
