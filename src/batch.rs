//! Measurement batch extraction from benchmark tables
//!
//! A benchmark table has (at least) an operation column and a time column.
//! Rows whose operation matches the configured category contribute one sample
//! each: the parsed duration divided by the normalization divisor.

use crate::config::{BatchConfig, MalformedRowPolicy};
use crate::duration::{parse_duration, DurationError};
use crate::stats::{EmptyBatchError, SummaryStats};
use serde::Serialize;
use std::io::Read;
use thiserror::Error;

/// Errors raised while building a batch from one table
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("'{0}' column not found")]
    MissingColumn(String),

    #[error("malformed duration on line {line}: {reason}")]
    Malformed {
        line: u64,
        #[source]
        reason: DurationError,
    },

    #[error("failed to read table: {0}")]
    Csv(#[from] csv::Error),
}

/// A row dropped under [`MalformedRowPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the source (header is line 1)
    pub line: u64,
    pub reason: String,
}

/// Normalized samples for one category within one source, in microseconds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementBatch {
    samples: Vec<f64>,
    skipped: Vec<SkippedRow>,
}

impl MeasurementBatch {
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Compute (min, mean, max) over the batch
    pub fn summarize(&self) -> Result<SummaryStats, EmptyBatchError> {
        SummaryStats::from_samples(&self.samples)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, BatchError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| BatchError::MissingColumn(name.to_string()))
}

/// Build a batch from CSV data with a header row
///
/// The source is only read, never modified. Schema problems fail the whole
/// table; malformed time fields follow `config.on_malformed`.
///
/// # Example
/// ```
/// use decodestat::batch::read_batch;
/// use decodestat::config::BatchConfig;
///
/// let csv = "Operation,Run,Time (seconds)\nDecode,0,40us\nEncode,0,9ms\nDecode,1,80us\n";
/// let batch = read_batch(csv.as_bytes(), &BatchConfig::default()).unwrap();
/// assert_eq!(batch.samples(), &[1.0, 2.0]);
/// ```
pub fn read_batch<R: Read>(reader: R, config: &BatchConfig) -> Result<MeasurementBatch, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    tracing::debug!(columns = ?headers.iter().collect::<Vec<_>>(), "table columns");

    let operation_idx = column_index(&headers, &config.operation_column)?;
    let time_idx = column_index(&headers, &config.time_column)?;

    let mut batch = MeasurementBatch::default();

    for record in reader.records() {
        let record = record?;

        let operation = record.get(operation_idx).unwrap_or_default();
        if operation.trim() != config.category {
            continue;
        }

        let line = record.position().map_or(0, |pos| pos.line());
        let raw = record.get(time_idx).unwrap_or_default();

        match parse_duration(raw) {
            Ok(micros) => batch.samples.push(micros.per_unit(config.divisor).as_f64()),
            Err(reason) => match config.on_malformed {
                MalformedRowPolicy::Skip => batch.skipped.push(SkippedRow {
                    line,
                    reason: reason.to_string(),
                }),
                MalformedRowPolicy::Abort => return Err(BatchError::Malformed { line, reason }),
            },
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Operation,Run,Time (seconds)\n";

    fn batch_from(body: &str, config: &BatchConfig) -> Result<MeasurementBatch, BatchError> {
        read_batch(format!("{HEADER}{body}").as_bytes(), config)
    }

    #[test]
    fn test_decode_rows_normalized() {
        let batch = batch_from(
            "Decode,0,40us\nDecode,1,40us\nDecode,2,40us\n",
            &BatchConfig::default(),
        )
        .unwrap();

        assert_eq!(batch.samples(), &[1.0, 1.0, 1.0]);
        let stats = batch.summarize().unwrap();
        assert_eq!((stats.min, stats.mean, stats.max), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_mixed_units() {
        let batch = batch_from(
            "Decode,0,40us\nDecode,1,2ms\nDecode,2,1s\n",
            &BatchConfig::default(),
        )
        .unwrap();

        assert_eq!(batch.samples(), &[1.0, 50.0, 25_000.0]);
    }

    #[test]
    fn test_operation_trimmed_but_exact() {
        let batch = batch_from(
            " Decode ,0,40us\ndecode,1,40us\nDecoder,2,40us\nDecode,3,80us\n",
            &BatchConfig::default(),
        )
        .unwrap();

        // Case and partial matches are not the category
        assert_eq!(batch.samples(), &[1.0, 2.0]);
    }

    #[test]
    fn test_other_categories_ignored() {
        let batch = batch_from("Encode,0,1ms\nEncode,1,2ms\n", &BatchConfig::default()).unwrap();
        assert!(batch.is_empty());
        assert!(batch.summarize().is_err());
    }

    #[test]
    fn test_custom_category_and_divisor() {
        let config = BatchConfig {
            category: "Encode".to_string(),
            divisor: 1.0,
            ..BatchConfig::default()
        };
        let batch = batch_from("Encode,0,1ms\nDecode,0,5ms\n", &config).unwrap();
        assert_eq!(batch.samples(), &[1_000.0]);
    }

    #[test]
    fn test_missing_operation_column() {
        let err = read_batch(
            "Op,Time (seconds)\nDecode,40us\n".as_bytes(),
            &BatchConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, BatchError::MissingColumn(ref c) if c == "Operation"));
    }

    #[test]
    fn test_missing_time_column() {
        let err = read_batch("Operation,Run\nDecode,0\n".as_bytes(), &BatchConfig::default())
            .unwrap_err();

        assert!(matches!(err, BatchError::MissingColumn(ref c) if c == "Time (seconds)"));
    }

    #[test]
    fn test_header_whitespace_tolerated() {
        let batch = read_batch(
            " Operation , Run , Time (seconds) \nDecode,0,40us\n".as_bytes(),
            &BatchConfig::default(),
        )
        .unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_malformed_row_skipped_by_default() {
        let batch = batch_from(
            "Decode,0,40us\nDecode,1,42ns\nDecode,2,80us\n",
            &BatchConfig::default(),
        )
        .unwrap();

        assert_eq!(batch.samples(), &[1.0, 2.0]);
        assert_eq!(batch.skipped().len(), 1);
        assert_eq!(batch.skipped()[0].line, 3);
        assert!(batch.skipped()[0].reason.contains("42ns"));
    }

    #[test]
    fn test_overflowing_time_never_reaches_summary() {
        let batch = batch_from("Decode,0,1e308s\nDecode,1,40us\n", &BatchConfig::default()).unwrap();

        assert_eq!(batch.samples(), &[1.0]);
        assert_eq!(batch.skipped().len(), 1);
        assert!(batch.skipped()[0].reason.contains("1e308s"));

        let stats = batch.summarize().unwrap();
        assert!(stats.max.is_finite());
        assert_eq!(stats.mean, 1.0);
    }

    #[test]
    fn test_short_row_counts_as_malformed() {
        let batch = batch_from("Decode,0\nDecode,1,40us\n", &BatchConfig::default()).unwrap();
        assert_eq!(batch.samples(), &[1.0]);
        assert_eq!(batch.skipped().len(), 1);
    }

    #[test]
    fn test_malformed_row_aborts_under_abort_policy() {
        let config = BatchConfig {
            on_malformed: MalformedRowPolicy::Abort,
            ..BatchConfig::default()
        };
        let err = batch_from("Decode,0,40us\nDecode,1,fastus\n", &config).unwrap_err();

        match err {
            BatchError::Malformed { line, reason } => {
                assert_eq!(line, 3);
                assert_eq!(reason, DurationError::InvalidMagnitude("fastus".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_table() {
        let batch = read_batch(HEADER.as_bytes(), &BatchConfig::default()).unwrap();
        assert!(batch.is_empty());
    }
}
