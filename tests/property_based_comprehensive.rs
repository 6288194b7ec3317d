//! Property-based tests for decodestat
//!
//! Cover the duration parser, batch normalization and the aggregator with
//! generated inputs.

use decodestat::batch::read_batch;
use decodestat::config::BatchConfig;
use decodestat::duration::{parse_duration, DurationError};
use decodestat::stats::SummaryStats;
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_unit_factors(n in 0.0f64..1.0e6) {
        let micros = parse_duration(&format!("{}us", n)).unwrap().as_f64();
        let millis = parse_duration(&format!("{}ms", n)).unwrap().as_f64();
        let seconds = parse_duration(&format!("{}s", n)).unwrap().as_f64();

        prop_assert!(close(micros, n));
        prop_assert!(close(millis, n * 1_000.0));
        prop_assert!(close(seconds, n * 1_000_000.0));
    }

    #[test]
    fn prop_parser_never_panics(input in "\\PC{0,16}") {
        // Any accepted value is finite and non-negative
        if let Ok(micros) = parse_duration(&input) {
            prop_assert!(micros.as_f64().is_finite());
            prop_assert!(micros.as_f64() >= 0.0);
        }
    }

    #[test]
    fn prop_scaled_overflow_rejected(mantissa in 1.0f64..9.0, exponent in 303i32..308) {
        let text = format!("{}e{}s", mantissa, exponent);
        let parsed = parse_duration(&text);
        prop_assert_eq!(parsed, Err(DurationError::InvalidMagnitude(text.clone())));
    }

    #[test]
    fn prop_negative_magnitudes_rejected(n in 0.001f64..1.0e6) {
        let text = format!("-{}ms", n);
        prop_assert_eq!(parse_duration(&text), Err(DurationError::Negative(text.clone())));
    }

    #[test]
    fn prop_unknown_units_rejected(n in 0u32..100_000, unit in "(ns|min|h|d|ps)") {
        let text = format!("{n}{unit}");
        prop_assert!(parse_duration(&text).is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_summary_bounds(samples in prop::collection::vec(0.0f64..1.0e7, 1..200)) {
        let stats = SummaryStats::from_samples(&samples).unwrap();

        prop_assert!(stats.min <= stats.mean + 1e-6);
        prop_assert!(stats.mean <= stats.max + 1e-6);
        prop_assert_eq!(stats.count, samples.len());
        prop_assert!(samples.iter().all(|&s| s >= stats.min && s <= stats.max));
    }

    #[test]
    fn prop_batch_divides_by_divisor(
        micros in prop::collection::vec(0u32..1_000_000, 1..50),
        divisor in 1u32..1000,
    ) {
        let mut csv = String::from("Operation,Run,Time (seconds)\n");
        for (run, value) in micros.iter().enumerate() {
            csv.push_str(&format!("Decode,{run},{value}us\n"));
        }
        let config = BatchConfig {
            divisor: f64::from(divisor),
            ..BatchConfig::default()
        };

        let batch = read_batch(csv.as_bytes(), &config).unwrap();

        prop_assert_eq!(batch.len(), micros.len());
        for (sample, raw) in batch.samples().iter().zip(&micros) {
            prop_assert!(close(*sample, f64::from(*raw) / f64::from(divisor)));
        }
    }
}
