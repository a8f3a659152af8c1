//! Line-length measurement for a single file.
//!
//! # Line Rules
//!
//! - **Trimmed** (default): trailing whitespace is stripped before
//!   measuring, and lines that are empty afterwards are skipped.
//! - **Raw**: every line counts, including its newline. A `\r\n` pair
//!   counts as one character, the way text-mode reads see it.
//!
//! Lengths are counted in Unicode scalar values. Files that are not valid
//! UTF-8 fail to read.

use crate::core::{FileStats, LineRule};
use crate::errors::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Reads one file and turns it into [`FileStats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LineAnalyzer {
    rule: LineRule,
}

impl LineAnalyzer {
    pub fn new(rule: LineRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> LineRule {
        self.rule
    }

    /// Analyze the file at `path`.
    ///
    /// The file handle lives only for the duration of this call and is
    /// closed on both the success and the error path.
    pub fn analyze(&self, path: PathBuf) -> Result<(PathBuf, FileStats)> {
        log::debug!("processing {}", path.display());
        let lengths = self.read_lengths(&path).map_err(|e| Error::file_read(&path, e))?;
        Ok((path, FileStats::from_lengths(lengths)))
    }

    fn read_lengths(&self, path: &Path) -> io::Result<Vec<usize>> {
        // Opening a FIFO would block the worker indefinitely
        if !std::fs::metadata(path)?.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }
        let file = File::open(path)?;
        measure_lines(BufReader::new(file), self.rule)
    }
}

/// Measure every qualifying line produced by `reader`, in order.
pub fn measure_lines<R: BufRead>(mut reader: R, rule: LineRule) -> io::Result<Vec<usize>> {
    let mut lengths = Vec::new();
    let mut line = String::new();

    while reader.read_line(&mut line)? != 0 {
        if let Some(length) = line_length(&line, rule) {
            lengths.push(length);
        }
        line.clear();
    }

    Ok(lengths)
}

/// Length of one line as returned by `read_line`, or `None` if the line
/// does not qualify under `rule`.
fn line_length(line: &str, rule: LineRule) -> Option<usize> {
    match rule {
        LineRule::Trimmed => {
            let length = line.trim_end().chars().count();
            (length > 0).then_some(length)
        }
        LineRule::Raw => {
            let (body, terminated) = match line.strip_suffix('\n') {
                Some(rest) => (rest.strip_suffix('\r').unwrap_or(rest), true),
                None => (line, false),
            };
            Some(body.chars().count() + usize::from(terminated))
        }
    }
}
