//! Reduce per-file statistics to a [`GlobalSummary`].
//!
//! The default [`SummaryMode::MeanOfMeans`] averages the per-file means
//! and takes the median of the per-file medians. That equals the corpus
//! wide mean only when every file has the same number of measured lines.
//! [`SummaryMode::Pooled`] computes both over every line length instead.

use super::stats::{as_floats, mean, median};
use super::{FileStats, GlobalSummary, ResultMapping, SummaryMode};
use crate::errors::{Error, Result};
use std::path::Path;

pub fn summarize(files: &ResultMapping, mode: SummaryMode) -> Result<GlobalSummary> {
    let (max_file, max_value) = find_max_file(files).ok_or(Error::EmptyCorpus)?;

    let (overall_mean, overall_median) = match mode {
        SummaryMode::MeanOfMeans => {
            let means: Vec<f64> = files.values().map(FileStats::mean).collect();
            let medians: Vec<f64> = files.values().map(FileStats::median).collect();
            (mean(&means), median(&medians))
        }
        SummaryMode::Pooled => {
            let pooled = pooled_lengths(files);
            (mean(&pooled), median(&pooled))
        }
    };

    Ok(GlobalSummary {
        mode,
        overall_mean: overall_mean.ok_or(Error::EmptyCorpus)?,
        overall_median: overall_median.ok_or(Error::EmptyCorpus)?,
        max_file: max_file.to_path_buf(),
        max_value,
    })
}

/// File with the largest per-file maximum.
///
/// Ties go to the lexicographically smallest path, so the answer depends
/// only on the mapping's contents.
pub fn find_max_file(files: &ResultMapping) -> Option<(&Path, usize)> {
    files
        .iter()
        .fold(None, |best: Option<(&Path, usize)>, (path, stats)| match best {
            Some((_, max)) if max >= stats.max() => best,
            _ => Some((path.as_path(), stats.max())),
        })
}

fn pooled_lengths(files: &ResultMapping) -> Vec<f64> {
    files
        .values()
        .flat_map(|stats| as_floats(stats.line_lengths()))
        .collect()
}
