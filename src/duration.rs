//! Unit-aware duration parsing
//!
//! Benchmark producers write timings as `<number><unit>` (e.g. `40us`,
//! `1.25ms`, `0.5s`). Everything is normalized to microseconds.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when a duration string cannot be interpreted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("unknown time unit in '{0}' (expected us, ms or s)")]
    UnknownUnit(String),

    #[error("invalid magnitude in '{0}'")]
    InvalidMagnitude(String),

    #[error("negative duration '{0}'")]
    Negative(String),
}

/// Time units accepted in benchmark output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Micros,
    Millis,
    Seconds,
}

impl TimeUnit {
    /// Units in suffix-matching priority order.
    ///
    /// `s` is a suffix of both `us` and `ms`, so it must come last.
    pub const PRIORITY: [TimeUnit; 3] = [TimeUnit::Micros, TimeUnit::Millis, TimeUnit::Seconds];

    /// Accepted spellings for this unit
    pub fn suffixes(self) -> &'static [&'static str] {
        match self {
            // `{:?}` on std::time::Duration prints the micro sign (U+00B5);
            // the Greek mu (U+03BC) shows up in hand-edited files.
            TimeUnit::Micros => &["us", "\u{b5}s", "\u{3bc}s"],
            TimeUnit::Millis => &["ms"],
            TimeUnit::Seconds => &["s"],
        }
    }

    /// Multiplier converting a value in this unit to microseconds
    pub fn factor(self) -> f64 {
        match self {
            TimeUnit::Micros => 1.0,
            TimeUnit::Millis => 1_000.0,
            TimeUnit::Seconds => 1_000_000.0,
        }
    }

    /// Split `text` into its magnitude and unit, if it carries a known suffix
    fn split(text: &str) -> Option<(&str, TimeUnit)> {
        Self::PRIORITY.iter().find_map(|&unit| {
            unit.suffixes()
                .iter()
                .find_map(|suffix| text.strip_suffix(suffix))
                .map(|magnitude| (magnitude, unit))
        })
    }
}

/// A non-negative duration in microseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Micros(f64);

impl Micros {
    pub const ZERO: Micros = Micros(0.0);

    /// Raw microsecond value
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Per-unit figure for a measurement that spans `divisor` units of work
    pub fn per_unit(self, divisor: f64) -> Micros {
        Micros(self.0 / divisor)
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(f, "{:.*}us", precision, self.0)
        } else {
            write!(f, "{}us", self.0)
        }
    }
}

impl FromStr for Micros {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)
    }
}

/// Parse a `<number><unit>` string into microseconds
///
/// # Example
/// ```
/// use decodestat::duration::parse_duration;
///
/// assert_eq!(parse_duration("40us").unwrap().as_f64(), 40.0);
/// assert_eq!(parse_duration("1.5ms").unwrap().as_f64(), 1_500.0);
/// assert!(parse_duration("42ns").is_err());
/// ```
pub fn parse_duration(text: &str) -> Result<Micros, DurationError> {
    let trimmed = text.trim();
    let (magnitude, unit) =
        TimeUnit::split(trimmed).ok_or_else(|| DurationError::UnknownUnit(trimmed.to_string()))?;

    let value: f64 = magnitude.trim().parse().map_err(|_| {
        // "42ns" strips to "42n": a unit we don't know, not a bad number
        if unit == TimeUnit::Seconds && magnitude.ends_with(char::is_alphabetic) {
            DurationError::UnknownUnit(trimmed.to_string())
        } else {
            DurationError::InvalidMagnitude(trimmed.to_string())
        }
    })?;

    if !value.is_finite() {
        return Err(DurationError::InvalidMagnitude(trimmed.to_string()));
    }
    if value < 0.0 {
        return Err(DurationError::Negative(trimmed.to_string()));
    }

    // -0.0 would otherwise survive as a negative zero
    let micros = value.abs() * unit.factor();
    // Finite magnitudes near f64::MAX overflow once scaled
    if !micros.is_finite() {
        return Err(DurationError::InvalidMagnitude(trimmed.to_string()));
    }
    Ok(Micros(micros))
}
