//! The end-to-end pipeline: enumerate, dispatch, aggregate, report.

use crate::analyzers::LineAnalyzer;
use crate::config::LinestatConfig;
use crate::core::aggregate::summarize;
use crate::core::{GlobalSummary, ResultMapping};
use crate::dispatch::{CancelToken, WorkDispatcher, WorkerPool};
use crate::errors::{AnalysisFailure, Result};
use crate::io::{create_writer, validate_root, FileWalker, OutputFormat, Report};
use crate::progress::{file_counter, ProgressConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct RunConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Print the per-file blocks before the summary lines
    pub list_files: bool,
    pub settings: LinestatConfig,
    pub progress: ProgressConfig,
}

/// Result of analyzing a directory tree.
#[derive(Debug)]
pub struct Analysis {
    pub files: ResultMapping,
    pub summary: GlobalSummary,
    pub skipped: Vec<AnalysisFailure>,
}

/// Analyze every file under `root` and summarize the results.
///
/// Nothing is read before `root` is confirmed to be a directory. The
/// summary is only computed once every file has been analyzed; a run with
/// no analyzable files fails instead of producing statistics.
pub fn analyze_directory(
    root: &Path,
    settings: &LinestatConfig,
    progress: &ProgressConfig,
    cancel: &CancelToken,
) -> Result<Analysis> {
    validate_root(root)?;

    let start = Instant::now();
    let counter = file_counter(progress, "Analyzing");
    let dispatcher = WorkDispatcher::from_config(
        &settings.parallelism,
        settings.analysis.failure_policy,
    )?
    .with_progress(counter.clone());

    let analyzer = LineAnalyzer::new(settings.analysis.line_rule);
    let walker = FileWalker::new(root.to_path_buf());
    let dispatched = dispatcher.map_reduce(walker.walk(), |path| analyzer.analyze(path), cancel);
    counter.finish_and_clear();
    let dispatched = dispatched?;

    log::info!(
        "analyzed {} files ({} skipped) with {} workers in {:.2?}",
        dispatched.files.len(),
        dispatched.skipped.len(),
        dispatcher.size(),
        start.elapsed()
    );

    let summary = summarize(&dispatched.files, settings.analysis.summary_mode)?;
    Ok(Analysis {
        files: dispatched.files,
        summary,
        skipped: dispatched.skipped,
    })
}

/// Run the analysis and write the report to `out`.
pub fn handle_run<W: Write>(config: &RunConfig, out: W) -> Result<Analysis> {
    let analysis = analyze_directory(
        &config.path,
        &config.settings,
        &config.progress,
        &CancelToken::new(),
    )?;

    create_writer(config.format, out, config.list_files).write_report(&Report {
        files: &analysis.files,
        summary: &analysis.summary,
        skipped: &analysis.skipped,
    })?;

    Ok(analysis)
}
