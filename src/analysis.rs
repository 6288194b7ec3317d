//! Multi-source decode latency analysis
//!
//! Each source is processed to completion before the next one starts, and a
//! failure in one source never prevents the others from being analyzed.

use crate::batch::{read_batch, SkippedRow};
use crate::chart::BarChart;
use crate::config::{BatchConfig, ChartConfig};
use crate::error::AnalysisError;
use crate::label::clean_label;
use crate::stats::SummaryStats;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Statistics for one successfully analyzed source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSummary {
    pub stats: SummaryStats,
    /// Rows dropped because their time field was malformed
    pub skipped: Vec<SkippedRow>,
}

/// Outcome of analyzing one source
#[derive(Debug)]
pub struct SourceReport {
    pub path: PathBuf,
    /// Chart label derived from the path
    pub label: String,
    pub outcome: Result<SourceSummary, AnalysisError>,
}

impl SourceReport {
    pub fn stats(&self) -> Option<&SummaryStats> {
        self.outcome.as_ref().ok().map(|summary| &summary.stats)
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        self.outcome.as_ref().err()
    }
}

/// Analyze a single CSV source
pub fn analyze_source(path: &Path, config: &BatchConfig) -> Result<SourceSummary, AnalysisError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => AnalysisError::MissingSource {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::Read {
            path: path.to_path_buf(),
            source: csv::Error::from(err),
        },
    })?;

    let batch =
        read_batch(file, config).map_err(|err| AnalysisError::from_batch(path.to_path_buf(), err))?;

    for row in batch.skipped() {
        tracing::warn!("{}: skipping line {}: {}", path.display(), row.line, row.reason);
    }

    let stats = batch.summarize().map_err(|source| AnalysisError::EmptyBatch {
        path: path.to_path_buf(),
        category: config.category.clone(),
        source,
    })?;

    tracing::debug!(
        source = %path.display(),
        samples = stats.count,
        "summarized '{}' batch",
        config.category
    );

    Ok(SourceSummary {
        stats,
        skipped: batch.skipped().to_vec(),
    })
}

/// Analyze every source in order, collecting failures instead of stopping
///
/// # Example
/// ```
/// use decodestat::analysis::analyze_sources;
/// use decodestat::config::BatchConfig;
///
/// let reports = analyze_sources(&["does/not/exist.csv"], &BatchConfig::default());
/// assert_eq!(reports.len(), 1);
/// assert!(reports[0].error().is_some());
/// ```
pub fn analyze_sources<P: AsRef<Path>>(paths: &[P], config: &BatchConfig) -> Vec<SourceReport> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let outcome = analyze_source(path, config);
            if let Err(err) = &outcome {
                tracing::warn!("{}", err);
            }
            SourceReport {
                path: path.to_path_buf(),
                label: clean_label(path),
                outcome,
            }
        })
        .collect()
}

/// Bar chart of mean latency, one bar per successful source in input order
pub fn mean_latency_chart(reports: &[SourceReport], config: &ChartConfig) -> BarChart {
    let mut chart = BarChart::new(config.title.as_str())
        .with_axes(config.x_label.as_str(), config.y_label.as_str())
        .with_unit("\u{b5}s");

    for report in reports {
        if let Some(stats) = report.stats() {
            chart.push(report.label.as_str(), stats.mean);
        }
    }

    chart
}
