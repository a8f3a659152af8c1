//! Core data model: per-file statistics, the result mapping and the
//! global summary derived from it.

pub mod aggregate;
pub mod stats;

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Lengths below this are left out of [`FileStats::min`]; blank and
/// single-character lines would otherwise make it meaningless.
pub const MIN_LENGTH_FLOOR: usize = 2;

/// Summary of one file's line lengths.
///
/// Constructed once per file by the analyzer and never mutated; the
/// fields are private so every statistic always agrees with
/// `line_lengths`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStats {
    line_lengths: Vec<usize>,
    max: usize,
    mean: f64,
    median: f64,
    min: usize,
    std_dev: f64,
}

impl FileStats {
    /// Build stats from measured line lengths.
    ///
    /// An empty sequence is replaced by a single synthetic length of 0 so
    /// every statistic stays defined.
    pub fn from_lengths(mut line_lengths: Vec<usize>) -> Self {
        if line_lengths.is_empty() {
            line_lengths.push(0);
        }

        let floats = stats::as_floats(&line_lengths);
        Self {
            max: line_lengths.iter().copied().max().unwrap_or(0),
            mean: stats::mean(&floats).unwrap_or(0.0),
            median: stats::median(&floats).unwrap_or(0.0),
            min: stats::min_at_least(&line_lengths, MIN_LENGTH_FLOOR).unwrap_or(0),
            std_dev: stats::std_dev(&floats).unwrap_or(0.0),
            line_lengths,
        }
    }

    pub fn line_lengths(&self) -> &[usize] {
        &self.line_lengths
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    /// Shortest line of at least [`MIN_LENGTH_FLOOR`] characters, or 0
    /// when there is none.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Sample standard deviation; 0 for a single length.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

/// Per-file results keyed by path.
///
/// Ordered by path so reports and tie-breaks do not depend on the order
/// in which workers finished.
pub type ResultMapping = BTreeMap<PathBuf, FileStats>;

/// Aggregate statistics over a whole [`ResultMapping`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSummary {
    pub mode: SummaryMode,
    pub overall_mean: f64,
    pub overall_median: f64,
    #[serde(serialize_with = "serialize_lossy_path")]
    pub max_file: PathBuf,
    pub max_value: usize,
}

/// Serialize a path as a string, replacing invalid UTF-8.
///
/// Formats like JSON need string keys and values; a file name that is not
/// valid UTF-8 must not make the whole report unserializable.
pub(crate) fn serialize_lossy_path<P, S>(path: &P, serializer: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: Serializer,
{
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}

/// Serialize a [`ResultMapping`] with lossy string keys.
pub(crate) fn serialize_lossy_keys<S: Serializer>(
    files: &&ResultMapping,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        files
            .iter()
            .map(|(path, stats)| (path.to_string_lossy(), stats)),
    )
}

/// Which lines of a file contribute a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LineRule {
    /// Strip trailing whitespace and skip lines that end up empty
    #[default]
    Trimmed,
    /// Count every line as read, including its newline
    Raw,
}

/// How per-file statistics are combined into the global summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMode {
    /// Mean of per-file means and median of per-file medians
    #[default]
    MeanOfMeans,
    /// Mean and median over every line length in the corpus
    Pooled,
}

/// What to do when a single file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole run on the first unreadable file
    #[default]
    FailFast,
    /// Log the file, leave it out of the results and keep going
    SkipUnreadable,
}
