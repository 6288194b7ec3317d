//! CLI argument parsing for decodestat

use crate::config::{AnalysisConfig, MalformedRowPolicy, DEFAULT_DIVISOR};
use crate::size::PayloadSpec;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

/// Output format for console reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "decodestat")]
#[command(version)]
#[command(about = "Decode latency and payload size statistics for encoding benchmarks", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize per-operation latency from benchmark CSV files and chart the means
    Decode(DecodeArgs),
    /// Compare payload sizes across encodings
    Size(SizeArgs),
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Benchmark CSV files, analyzed in the order given
    #[arg(value_hint = ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// TOML config file; command-line flags take precedence
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Operation category to summarize (default: Decode)
    #[arg(short = 'c', long, value_name = "NAME")]
    pub category: Option<String>,

    /// Units of work each sample spans (default: 40)
    #[arg(long, value_name = "N")]
    pub divisor: Option<f64>,

    /// Name of the operation column (default: "Operation")
    #[arg(long, value_name = "COLUMN")]
    pub operation_column: Option<String>,

    /// Name of the time column (default: "Time (seconds)")
    #[arg(long, value_name = "COLUMN")]
    pub time_column: Option<String>,

    /// What to do with rows whose time does not parse (default: skip)
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_malformed: Option<MalformedRowPolicy>,

    /// Chart output path, must end in .svg (default: decode_times_comparison.svg)
    #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_plot: bool,

    /// Console report format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DecodeArgs {
    /// Merge the optional config file with command-line overrides
    pub fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(category) = &self.category {
            config.batch.category = category.clone();
        }
        if let Some(divisor) = self.divisor {
            config.batch.divisor = divisor;
        }
        if let Some(column) = &self.operation_column {
            config.batch.operation_column = column.clone();
        }
        if let Some(column) = &self.time_column {
            config.batch.time_column = column.clone();
        }
        if let Some(policy) = self.on_malformed {
            config.batch.on_malformed = policy;
        }
        if let Some(output) = &self.output {
            config.chart.output = output.clone();
        }
        if let Some(title) = &self.title {
            config.chart.title = title.clone();
        }

        config.batch.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }
}

#[derive(Parser, Debug)]
pub struct SizeArgs {
    /// Payloads as LABEL=BYTES or LABEL=PATH, charted in the order given
    #[arg(required = true, value_name = "LABEL=SIZE")]
    pub payloads: Vec<PayloadSpec>,

    /// Units of work each payload spans
    #[arg(long, value_name = "N", default_value_t = DEFAULT_DIVISOR)]
    pub divisor: f64,

    /// Chart output path, must end in .svg
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = "size_comparison.svg",
        value_hint = ValueHint::FilePath
    )]
    pub output: PathBuf,

    /// Chart title
    #[arg(long, default_value = "Size Comparison for data transfer")]
    pub title: String,

    /// Skip chart rendering
    #[arg(long)]
    pub no_plot: bool,
}
