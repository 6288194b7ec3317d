//! Payload size comparison across encodings
//!
//! Each encoding is described as `label=value`, where the value is either a
//! byte count or the path of a captured payload file. Sizes are normalized by
//! the same divisor as latencies and reported in kilobytes.

use crate::chart::BarChart;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

const BYTES_PER_KB: f64 = 1024.0;

/// Where a payload size comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Bytes(u64),
    File(PathBuf),
}

/// One encoding's payload, parsed from `label=value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSpec {
    pub label: String,
    pub source: PayloadSource,
}

impl FromStr for PayloadSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=BYTES or LABEL=PATH, got '{}'", s))?;

        let label = label.trim();
        let value = value.trim();
        if label.is_empty() {
            return Err(format!("missing label in '{}'", s));
        }
        if value.is_empty() {
            return Err(format!("missing size or path in '{}'", s));
        }

        let source = match value.parse::<u64>() {
            Ok(bytes) => PayloadSource::Bytes(bytes),
            Err(_) => PayloadSource::File(PathBuf::from(value)),
        };

        Ok(Self {
            label: label.to_string(),
            source,
        })
    }
}

impl PayloadSpec {
    /// Raw payload size in bytes
    pub fn bytes(&self) -> Result<u64> {
        match &self.source {
            PayloadSource::Bytes(bytes) => Ok(*bytes),
            PayloadSource::File(path) => Ok(std::fs::metadata(path)
                .with_context(|| format!("Failed to stat payload file {}", path.display()))?
                .len()),
        }
    }
}

/// Normalized size of one encoding
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadSize {
    pub label: String,
    pub bytes: u64,
    /// Per-unit size in kilobytes
    pub kilobytes: f64,
}

/// Resolve and normalize every payload, preserving order
pub fn measure_payloads(specs: &[PayloadSpec], divisor: f64) -> Result<Vec<PayloadSize>> {
    specs
        .iter()
        .map(|spec| {
            let bytes = spec.bytes()?;
            Ok(PayloadSize {
                label: spec.label.clone(),
                bytes,
                kilobytes: bytes as f64 / divisor / BYTES_PER_KB,
            })
        })
        .collect()
}

/// Text listing, one encoding per line
pub fn to_text(sizes: &[PayloadSize]) -> String {
    sizes
        .iter()
        .map(|size| format!("{}: {:.2} kB\n", size.label, size.kilobytes))
        .collect()
}

/// Bar chart of per-unit payload sizes
pub fn size_chart(sizes: &[PayloadSize], title: &str) -> BarChart {
    let mut chart = BarChart::new(title)
        .with_axes("Type of encoding", "Size (KB)")
        .with_unit(" kB");
    for size in sizes {
        chart.push(size.label.as_str(), size.kilobytes);
    }
    chart
}
