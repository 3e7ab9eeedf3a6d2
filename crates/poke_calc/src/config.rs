//! Configuration loading from TOML files

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field::BattleFormat;
use crate::multihit::HitSelector;
use crate::stats::DEFAULT_LEVEL;

/// Defaults applied to queries that don't specify their own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Level for sets that omit one
    pub default_level: u8,
    pub format: BattleFormat,
    pub hits: HitSelector,
    /// `tracing` filter directive used when `POKE_CALC_LOG` is unset
    pub log_filter: String,
}

impl Default for CalcSettings {
    fn default() -> Self {
        Self {
            default_level: DEFAULT_LEVEL,
            format: BattleFormat::Singles,
            hits: HitSelector::Auto,
            log_filter: "warn".to_string(),
        }
    }
}

impl CalcSettings {
    fn validate(self) -> Result<Self, ConfigError> {
        if !(1..=100).contains(&self.default_level) {
            return Err(ConfigError::ValidationError(format!(
                "default_level must be between 1 and 100, got {}",
                self.default_level
            )));
        }
        Ok(self)
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate settings from a file.
pub fn load_settings(path: &Path) -> Result<CalcSettings, ConfigError> {
    let settings: CalcSettings = load_toml(path)?;
    tracing::debug!(path = %path.display(), "loaded settings");
    settings.validate()
}

/// Parse and validate settings from a string.
pub fn parse_settings(content: &str) -> Result<CalcSettings, ConfigError> {
    parse_toml::<CalcSettings>(content)?.validate()
}
