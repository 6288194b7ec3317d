//! Per-source failure taxonomy
//!
//! Every variant names the source it came from so a failed run can be
//! diagnosed from the console alone. None of them stop processing of the
//! remaining sources.

use crate::batch::BatchError;
use crate::duration::DurationError;
use crate::stats::EmptyBatchError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single source produced no statistics
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("could not find file {}", .path.display())]
    MissingSource { path: PathBuf },

    #[error("'{column}' column not found in {}", .path.display())]
    Schema { path: PathBuf, column: String },

    #[error("malformed duration in {} on line {line}: {reason}", .path.display())]
    MalformedInput {
        path: PathBuf,
        line: u64,
        #[source]
        reason: DurationError,
    },

    #[error("no '{category}' samples in {}", .path.display())]
    EmptyBatch {
        path: PathBuf,
        category: String,
        #[source]
        source: EmptyBatchError,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl AnalysisError {
    /// Attach the source path to a batch construction failure
    pub fn from_batch(path: PathBuf, err: BatchError) -> Self {
        match err {
            BatchError::MissingColumn(column) => Self::Schema { path, column },
            BatchError::Malformed { line, reason } => Self::MalformedInput { path, line, reason },
            BatchError::Csv(source) => Self::Read { path, source },
        }
    }

    /// Short machine-readable tag for structured reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSource { .. } => "missing_source",
            Self::Schema { .. } => "schema",
            Self::MalformedInput { .. } => "malformed_input",
            Self::EmptyBatch { .. } => "empty_batch",
            Self::Read { .. } => "read",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_message() {
        let err = AnalysisError::MissingSource {
            path: PathBuf::from("./proto/gRPC_results.csv"),
        };
        assert_eq!(
            err.to_string(),
            "could not find file ./proto/gRPC_results.csv"
        );
        assert_eq!(err.kind(), "missing_source");
    }

    #[test]
    fn test_schema_from_batch() {
        let err = AnalysisError::from_batch(
            PathBuf::from("a.csv"),
            BatchError::MissingColumn("Operation".to_string()),
        );
        assert_eq!(err.to_string(), "'Operation' column not found in a.csv");
        assert_eq!(err.kind(), "schema");
    }

    #[test]
    fn test_malformed_names_value() {
        let err = AnalysisError::from_batch(
            PathBuf::from("a.csv"),
            BatchError::Malformed {
                line: 4,
                reason: DurationError::UnknownUnit("42ns".to_string()),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("a.csv"));
        assert!(msg.contains("line 4"));
        assert!(msg.contains("42ns"));
        assert_eq!(err.kind(), "malformed_input");
    }

    #[test]
    fn test_empty_batch_message() {
        let err = AnalysisError::EmptyBatch {
            path: PathBuf::from("a.csv"),
            category: "Decode".to_string(),
            source: EmptyBatchError,
        };
        assert_eq!(err.to_string(), "no 'Decode' samples in a.csv");
        assert_eq!(err.kind(), "empty_batch");
    }
}
