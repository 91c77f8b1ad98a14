//! Configuration loading for impact studies
//!
//! A study is described by a JSON file in which every field is optional:
//!
//! ```json
//! {
//!     "data_dir": "Data",
//!     "volumes": [100, 500, 1000, 2000, 5000],
//!     "side": "buy",
//!     "depth": 10
//! }
//! ```

use impactfit_core::{Quantity, Side};
use impactfit_loader::DEFAULT_DEPTH;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Root configuration for an impact study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Directory searched recursively for snapshots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Snapshot file extension
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Target order sizes walked against every snapshot
    #[serde(default = "default_volumes")]
    pub volumes: Vec<Quantity>,

    #[serde(default)]
    pub side: Side,

    /// Levels per side read from each snapshot
    #[serde(default = "default_depth")]
    pub depth: usize,

    #[serde(default)]
    pub output: OutputConfig,

    /// Worker threads; rayon's default when absent
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("Data")
}

fn default_extension() -> String {
    "csv".to_string()
}

fn default_volumes() -> Vec<Quantity> {
    [100, 500, 1000, 2000, 5000]
        .into_iter()
        .map(Decimal::from)
        .collect()
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            extension: default_extension(),
            volumes: default_volumes(),
            side: Side::default(),
            depth: default_depth(),
            output: OutputConfig::default(),
            workers: None,
        }
    }
}

impl StudyConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check the settings a study cannot run without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(v) = self.volumes.iter().find(|v| **v <= Decimal::ZERO) {
            return Err(ConfigError::InvalidVolumes(format!(
                "volumes must be positive, got {}",
                v
            )));
        }

        let mut distinct = self.volumes.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(ConfigError::InvalidVolumes(format!(
                "at least two distinct volumes are needed for a fit, got {}",
                distinct.len()
            )));
        }

        if self.depth == 0 {
            return Err(ConfigError::Invalid("depth must be at least 1".to_string()));
        }
        if self.output.fit_line_points < 2 {
            return Err(ConfigError::Invalid(
                "fit_line_points must be at least 2".to_string(),
            ));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid(
                "workers must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Where and what to report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write per-snapshot chart data
    #[serde(default = "default_charts")]
    pub charts: bool,

    #[serde(default = "default_loglog_dir")]
    pub loglog_dir: PathBuf,

    #[serde(default = "default_residuals_dir")]
    pub residuals_dir: PathBuf,

    /// Points along the fitted curve in the log-log chart data
    #[serde(default = "default_fit_line_points")]
    pub fit_line_points: usize,

    /// JSON summary of every report, written at the end of the study
    #[serde(default)]
    pub summary: Option<PathBuf>,

    /// Print per-snapshot results to stdout
    #[serde(default = "default_console")]
    pub console: bool,
}

fn default_charts() -> bool {
    true
}

fn default_loglog_dir() -> PathBuf {
    PathBuf::from("Graph_LogLog")
}

fn default_residuals_dir() -> PathBuf {
    PathBuf::from("Graph_Residuals")
}

fn default_fit_line_points() -> usize {
    100
}

fn default_console() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            charts: default_charts(),
            loglog_dir: default_loglog_dir(),
            residuals_dir: default_residuals_dir(),
            fit_line_points: default_fit_line_points(),
            summary: None,
            console: default_console(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid volumes: {0}")]
    InvalidVolumes(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
