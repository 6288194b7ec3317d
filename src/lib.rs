//! decodestat - decode latency and payload size statistics for encoding benchmarks
//!
//! This library parses unit-suffixed benchmark timings (`40us`, `1.2ms`,
//! `0.5s`), normalizes them to per-unit microseconds, summarizes them per
//! source file, and renders comparison bar charts.

pub mod analysis;
pub mod batch;
pub mod chart;
pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod label;
pub mod report;
pub mod size;
pub mod stats;
