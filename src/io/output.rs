use crate::core::{serialize_lossy_keys, FileStats, GlobalSummary, ResultMapping, MIN_LENGTH_FLOOR};
use crate::errors::{AnalysisFailure, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Everything a finished run reports.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    #[serde(serialize_with = "serialize_lossy_keys")]
    pub files: &'a ResultMapping,
    pub summary: &'a GlobalSummary,
    pub skipped: &'a [AnalysisFailure],
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report<'_>) -> Result<()>;
}

/// Build the writer for `format`.
///
/// `list_files` controls the per-file blocks of the terminal report; the
/// JSON document always carries every file.
pub fn create_writer<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
    list_files: bool,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Terminal => {
            Box::new(TerminalWriter::new(writer).with_file_listing(list_files))
        }
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report<'_>) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Plain text report: one block per file, then the three summary lines.
pub struct TerminalWriter<W: Write> {
    writer: W,
    list_files: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            list_files: true,
        }
    }

    pub fn with_file_listing(mut self, list_files: bool) -> Self {
        self.list_files = list_files;
        self
    }

    fn write_file(&mut self, path: &Path, stats: &FileStats) -> Result<()> {
        writeln!(self.writer, "{}", path.display())?;
        writeln!(self.writer, "  line lengths: {:?}", stats.line_lengths())?;
        writeln!(self.writer, "  max: {}", stats.max())?;
        writeln!(self.writer, "  mean: {}", format_float(stats.mean()))?;
        writeln!(self.writer, "  median: {}", format_float(stats.median()))?;
        writeln!(
            self.writer,
            "  min (lengths >= {}): {}",
            MIN_LENGTH_FLOOR,
            stats.min()
        )?;
        writeln!(self.writer, "  std dev: {:.2}", stats.std_dev())?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &GlobalSummary) -> Result<()> {
        writeln!(
            self.writer,
            "average line length is {}",
            format_float(summary.overall_mean)
        )?;
        writeln!(
            self.writer,
            "median line length is {}",
            format_float(summary.overall_median)
        )?;
        writeln!(
            self.writer,
            "maximum line length in {} is {}",
            summary.max_file.display(),
            summary.max_value
        )?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report<'_>) -> Result<()> {
        if self.list_files {
            for (path, stats) in report.files {
                self.write_file(path, stats)?;
            }
        }
        self.write_summary(report.summary)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Shortest round-trip form, always with a decimal part (`2.5`, `0.0`)
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}
