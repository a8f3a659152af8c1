//! Per-file analysis.

pub mod line_lengths;

pub use line_lengths::{measure_lines, LineAnalyzer};
