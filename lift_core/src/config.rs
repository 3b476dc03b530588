//! Configuration file support for Lift.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/lift/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Which volume allocator turns a session budget into per-muscle counts
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AllocatorKind {
    /// Independent draws from the biased probability distribution
    #[default]
    Stochastic,
    /// Focus-range shares scaled to the budget
    Biased,
}

/// Workout generation parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_minutes_per_set")]
    pub minutes_per_set: u32,

    #[serde(default = "default_sets_per_exercise")]
    pub sets_per_exercise: u32,

    /// Extra weight given to the user's priority muscles
    #[serde(default = "default_bias_factor")]
    pub bias_factor: f64,

    #[serde(default)]
    pub allocator: AllocatorKind,

    #[serde(default = "default_favorite_multiplier")]
    pub favorite_multiplier: f64,

    #[serde(default = "default_suggest_less_multiplier")]
    pub suggest_less_multiplier: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            minutes_per_set: default_minutes_per_set(),
            sets_per_exercise: default_sets_per_exercise(),
            bias_factor: default_bias_factor(),
            allocator: AllocatorKind::default(),
            favorite_multiplier: default_favorite_multiplier(),
            suggest_less_multiplier: default_suggest_less_multiplier(),
        }
    }
}

impl GenerationConfig {
    /// Reject parameter combinations the allocator and selector cannot use
    pub fn validate(&self) -> Result<()> {
        if self.sets_per_exercise == 0 {
            return Err(Error::Config(
                "sets_per_exercise must be at least 1".into(),
            ));
        }
        if self.minutes_per_set == 0 {
            return Err(Error::Config("minutes_per_set must be at least 1".into()));
        }
        if !self.bias_factor.is_finite() || self.bias_factor < 0.0 {
            return Err(Error::Config(format!(
                "bias_factor must be a non-negative number, got {}",
                self.bias_factor
            )));
        }
        if !(self.favorite_multiplier > 1.0) {
            return Err(Error::Config(format!(
                "favorite_multiplier must be greater than 1, got {}",
                self.favorite_multiplier
            )));
        }
        if !(0.0..1.0).contains(&self.suggest_less_multiplier) {
            return Err(Error::Config(format!(
                "suggest_less_multiplier must be in [0, 1), got {}",
                self.suggest_less_multiplier
            )));
        }
        Ok(())
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|_| PathBuf::from("."))
    });
    base.join("lift")
}

fn default_minutes_per_set() -> u32 {
    1
}

fn default_sets_per_exercise() -> u32 {
    4
}

fn default_bias_factor() -> f64 {
    0.1
}

fn default_favorite_multiplier() -> f64 {
    2.0
}

fn default_suggest_less_multiplier() -> f64 {
    0.25
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.generation.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        base.join("lift").join("config.toml")
    }

    /// Path of the JSONL exercise history inside the data directory
    pub fn history_path(&self) -> PathBuf {
        self.data.data_dir.join("history.jsonl")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
