//! Analysis configuration
//!
//! Defaults match the benchmark producers' layout: an `Operation` column, a
//! `Time (seconds)` column holding `<number><unit>` strings, and samples that
//! aggregate 40 units of work each. Everything can be overridden from a TOML
//! file or the command line.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of underlying units each benchmark sample spans
pub const DEFAULT_DIVISOR: f64 = 40.0;

/// What to do with a row whose time field does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Drop the row, log a warning and keep building the batch
    #[default]
    Skip,
    /// Fail the whole source
    Abort,
}

/// How a measurement batch is extracted from one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Column holding the operation category
    pub operation_column: String,

    /// Column holding the `<number><unit>` duration
    pub time_column: String,

    /// Category to keep (exact, case-sensitive match after trimming)
    pub category: String,

    /// Normalization divisor applied to every parsed duration
    ///
    /// Samples are aggregates over a fixed-size batch of operations; dividing
    /// by the batch size yields a per-operation figure.
    pub divisor: f64,

    /// Policy for rows whose time field is malformed
    pub on_malformed: MalformedRowPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            operation_column: "Operation".to_string(),
            time_column: "Time (seconds)".to_string(),
            category: "Decode".to_string(),
            divisor: DEFAULT_DIVISOR,
            on_malformed: MalformedRowPolicy::Skip,
        }
    }
}

impl BatchConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.divisor.is_finite() || self.divisor <= 0.0 {
            return Err(format!(
                "divisor must be a positive finite number, got {}",
                self.divisor
            ));
        }

        if self.category.trim().is_empty() {
            return Err("category must not be empty".to_string());
        }

        if self.operation_column.trim().is_empty() || self.time_column.trim().is_empty() {
            return Err("column names must not be empty".to_string());
        }

        Ok(())
    }
}

/// Presentation settings for the latency chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Chart output path; must end in `.svg`
    pub output: PathBuf,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Mean Decode Times Comparison".to_string(),
            x_label: "Type of encoding".to_string(),
            y_label: "Time (\u{b5}s)".to_string(),
            output: PathBuf::from("decode_times_comparison.svg"),
        }
    }
}

/// Full configuration for the `decode` pipeline
///
/// # Example
/// ```
/// use decodestat::config::AnalysisConfig;
///
/// let config = AnalysisConfig::from_toml_str("[batch]\ndivisor = 10.0\n").unwrap();
/// assert_eq!(config.batch.divisor, 10.0);
/// assert_eq!(config.batch.category, "Decode");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub batch: BatchConfig,
    pub chart: ChartConfig,
}

impl AnalysisConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse analysis config")?;
        config.batch.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }
}
