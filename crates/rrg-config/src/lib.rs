//! Configuration management for rrg.
//!
//! Loads configuration from TOML files. Every section falls back to its
//! defaults, so a config file only needs the keys it overrides.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rrg_core::{MomentumMode, Timeframe};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name searched for in the working and user config directories.
pub const CONFIG_FILE_NAME: &str = "rrg.toml";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub rrg: RrgConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./rrg.toml`
    /// 2. `~/.config/rrg/rrg.toml`
    ///
    /// Returns default config if no file is found. A file that exists but
    /// fails to parse is an error rather than silently ignored.
    pub fn load_default() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.is_file() {
                log::debug!("Using config {}", path.display());
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }

    /// Candidate config locations, in priority order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![Self::default_path()];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("rrg").join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rrg.period < 2 {
            return Err(ConfigError::Invalid(format!(
                "rrg.period must be at least 2, got {}",
                self.rrg.period
            )));
        }
        if self.rrg.momentum_lookback == 0 {
            return Err(ConfigError::Invalid(
                "rrg.momentum_lookback must be at least 1".to_string(),
            ));
        }
        let radius = self.display.hit_radius_px;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "display.hit_radius_px must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// General application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Benchmark symbol every instrument is compared against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<String>,
    /// Directory holding `<symbol>.csv` price files.
    pub data_dir: PathBuf,
    /// Timeframe the daily rows are resampled to.
    pub timeframe: Timeframe,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            benchmark: None,
            data_dir: PathBuf::from("data"),
            timeframe: Timeframe::Weekly,
        }
    }
}

/// Metric parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RrgConfig {
    /// Rolling window for the RS-Ratio normalization.
    pub period: usize,
    /// Periods back from the latest date used as the momentum anchor.
    pub momentum_lookback: usize,
    /// Explicit momentum anchor, overriding `momentum_lookback`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_date: Option<NaiveDate>,
    /// Number of most recent points kept per instrument.
    pub tail_length: usize,
    /// Draw tails as smooth curves when possible.
    pub tail_curve: bool,
    /// How momentum is derived from the ratio.
    pub momentum_mode: MomentumMode,
}

impl Default for RrgConfig {
    fn default() -> Self {
        Self {
            period: 14,
            momentum_lookback: 52,
            base_date: None,
            tail_length: 4,
            tail_curve: true,
            momentum_mode: MomentumMode::Anchored,
        }
    }
}

impl RrgConfig {
    /// Minimum number of points shown per tail.
    pub const MIN_TAIL_LENGTH: usize = 2;

    /// Tail length with the minimum applied.
    pub fn effective_tail_length(&self) -> usize {
        self.tail_length.max(Self::MIN_TAIL_LENGTH)
    }
}

/// Display defaults, restored when the chart is reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show tail lines on startup.
    pub show_tails: bool,
    /// Show name labels on startup.
    pub show_annotations: bool,
    /// Show the help overlay on startup.
    pub show_help: bool,
    /// Click distance, in logical pixels, that still selects a marker.
    pub hit_radius_px: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_tails: false,
            show_annotations: false,
            show_help: false,
            hit_radius_px: 8.0,
        }
    }
}
