//! Summary statistics over a measurement batch
//!
//! Minimum, mean and maximum only: no weighting, no outlier removal and no
//! percentiles.

use serde::Serialize;
use thiserror::Error;

/// Returned when statistics are requested over zero samples
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot compute statistics over an empty batch")]
pub struct EmptyBatchError;

/// (min, mean, max) over a batch, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    /// Number of samples the figures were computed from
    pub count: usize,
}

impl SummaryStats {
    /// Summarize `samples`
    ///
    /// # Example
    /// ```
    /// use decodestat::stats::SummaryStats;
    ///
    /// let stats = SummaryStats::from_samples(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!((stats.min, stats.mean, stats.max), (1.0, 2.0, 3.0));
    /// assert!(SummaryStats::from_samples(&[]).is_err());
    /// ```
    pub fn from_samples(samples: &[f64]) -> Result<Self, EmptyBatchError> {
        let (&first, rest) = samples.split_first().ok_or(EmptyBatchError)?;

        let (min, max, sum) = rest
            .iter()
            .fold((first, first, first), |(min, max, sum), &value| {
                (min.min(value), max.max(value), sum + value)
            });

        Ok(Self {
            min,
            mean: sum / samples.len() as f64,
            max,
            count: samples.len(),
        })
    }
}
