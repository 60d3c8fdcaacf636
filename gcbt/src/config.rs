//! Configuration module for the gcbt CLI.
//!
//! This module handles loading, saving, and managing configuration
//! settings for the gcbt application.

use dirs::{config_dir, home_dir};
use gcbench_metrics::MetricConfig;
use num_cpus::get as get_num_cpus;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GcbtError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "gcbt.toml";

/// Application configuration structure.
///
/// Metric thresholds, histogram layout and report layout. Every section
/// may be omitted from the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Metric thresholds and sample filters.
    #[serde(default)]
    pub metrics: MetricConfig,

    /// Latency histogram options.
    #[serde(default)]
    pub histogram: HistogramConfig,

    /// Report line options.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Latency histogram options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramConfig {
    /// Columns of the rendered histogram.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Rows of the rendered histogram.
    #[serde(default = "default_height")]
    pub height: usize,

    /// Producer threads feeding samples.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

/// Report line options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Tabs before each value on a capable terminal.
    #[serde(default = "default_align_tabs")]
    pub align_tabs: usize,
}

fn default_width() -> usize {
    70
}

fn default_height() -> usize {
    5
}

/// One producer per CPU.
fn default_jobs() -> usize {
    get_num_cpus()
}

fn default_align_tabs() -> usize {
    15
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            jobs: default_jobs(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            align_tabs: default_align_tabs(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. User's home directory
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GcbtError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| GcbtError::Config(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| GcbtError::Config(format!("Failed to serialize configuration: {}", e)))
    }

    /// Reject settings no command can run with.
    pub fn validate(&self) -> Result<()> {
        self.metrics
            .validate()
            .map_err(|e| GcbtError::Config(e.to_string()))?;

        if self.histogram.width == 0 || self.histogram.height == 0 {
            return Err(GcbtError::Config(
                "histogram width and height must be positive".to_string(),
            ));
        }

        if self.histogram.jobs == 0 {
            return Err(GcbtError::Config("histogram jobs must be positive".to_string()));
        }

        Ok(())
    }

    /// Check for config in current directory.
    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Check for config in home directory.
    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("gcbt").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Check for config in system config directory.
    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("gcbt").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Find the configuration file in standard locations.
    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
