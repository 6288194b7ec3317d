//! Console reports for analyzed sources
//!
//! Text mirrors the classic benchmark summary, JSON and CSV are meant for
//! scripts and spreadsheets.

use crate::analysis::SourceReport;
use crate::batch::SkippedRow;
use crate::cli::OutputFormat;
use crate::config::BatchConfig;
use crate::stats::SummaryStats;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;

/// Render `reports` in the requested format
pub fn render(format: OutputFormat, reports: &[SourceReport], config: &BatchConfig) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(to_text(reports, config)),
        OutputFormat::Json => to_json(reports, config),
        OutputFormat::Csv => to_csv(reports),
    }
}

/// Human-readable summary, four decimals per figure
pub fn to_text(reports: &[SourceReport], config: &BatchConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Statistics for {} operations for each file:",
        config.category
    );

    for report in reports {
        let _ = writeln!(out, "\nFile: {}", report.path.display());
        match &report.outcome {
            Ok(summary) => {
                let stats = &summary.stats;
                let _ = writeln!(out, "Minimum time: {:.4} microseconds", stats.min);
                let _ = writeln!(out, "Mean time: {:.4} microseconds", stats.mean);
                let _ = writeln!(out, "Maximum time: {:.4} microseconds", stats.max);
                match summary.skipped.len() {
                    0 => {}
                    1 => out.push_str("Skipped 1 malformed row\n"),
                    n => {
                        let _ = writeln!(out, "Skipped {} malformed rows", n);
                    }
                }
            }
            Err(err) => {
                let _ = writeln!(out, "Error: {}", err);
            }
        }
    }

    out
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    category: &'a str,
    divisor: f64,
    unit: &'static str,
    sources: Vec<JsonSource<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonSource<'a> {
    path: String,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a SummaryStats>,
    #[serde(skip_serializing_if = "no_rows")]
    skipped_rows: &'a [SkippedRow],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

fn no_rows(rows: &&[SkippedRow]) -> bool {
    rows.is_empty()
}

#[derive(Debug, Serialize)]
struct JsonError {
    kind: &'static str,
    message: String,
}

/// Single JSON document covering every source
pub fn to_json(reports: &[SourceReport], config: &BatchConfig) -> Result<String> {
    let sources = reports
        .iter()
        .map(|report| JsonSource {
            path: report.path.display().to_string(),
            label: &report.label,
            stats: report.stats(),
            skipped_rows: report
                .outcome
                .as_ref()
                .map(|summary| summary.skipped.as_slice())
                .unwrap_or_default(),
            error: report.error().map(|err| JsonError {
                kind: err.kind(),
                message: err.to_string(),
            }),
        })
        .collect();

    let doc = JsonReport {
        category: &config.category,
        divisor: config.divisor,
        unit: "us",
        sources,
    };

    serde_json::to_string_pretty(&doc).context("Failed to serialize JSON report")
}

/// One CSV row per source; failed sources leave the figures empty
pub fn to_csv(reports: &[SourceReport]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["source", "label", "samples", "min_us", "mean_us", "max_us", "error"])?;

    for report in reports {
        let path = report.path.display().to_string();
        let row = match &report.outcome {
            Ok(summary) => {
                let stats = &summary.stats;
                [
                    path,
                    report.label.clone(),
                    stats.count.to_string(),
                    format!("{:.4}", stats.min),
                    format!("{:.4}", stats.mean),
                    format!("{:.4}", stats.max),
                    String::new(),
                ]
            }
            Err(err) => [
                path,
                report.label.clone(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                err.to_string(),
            ],
        };
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Failed to flush CSV report: {}", err))?;
    String::from_utf8(bytes).context("CSV report is not valid UTF-8")
}
