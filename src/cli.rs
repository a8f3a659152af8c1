use crate::config::LinestatConfig;
use crate::core::{FailurePolicy, LineRule, SummaryMode};
use crate::io::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linestat")]
#[command(about = "Line-length statistics for every file in a directory tree", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory to analyze
    pub dir: PathBuf,

    /// Number of worker threads (0 = all available CPUs)
    #[arg(short = 'j', long = "jobs", visible_alias = "workers", env = "LINESTAT_JOBS")]
    pub jobs: Option<usize>,

    /// Analyze files one at a time on the main thread
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Which lines contribute a length
    #[arg(long = "line-rule", value_enum)]
    pub line_rule: Option<LineRule>,

    /// Compute the overall mean and median over every line instead of
    /// averaging per-file values
    #[arg(long)]
    pub pooled: bool,

    /// Leave unreadable files out instead of aborting the run
    #[arg(long = "skip-unreadable")]
    pub skip_unreadable: bool,

    /// Print only the three summary lines, without per-file blocks
    #[arg(short = 's', long = "summary-only")]
    pub summary_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Configuration file (defaults to the nearest .linestat.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Layer command-line flags over settings loaded from a config file.
    pub fn apply_overrides(&self, mut settings: LinestatConfig) -> LinestatConfig {
        if let Some(jobs) = self.jobs {
            settings.parallelism.enabled = true;
            settings.parallelism.max_concurrency = Some(jobs);
        }
        if self.no_parallel {
            settings.parallelism.enabled = false;
        }
        if let Some(rule) = self.line_rule {
            settings.analysis.line_rule = rule;
        }
        if self.pooled {
            settings.analysis.summary_mode = SummaryMode::Pooled;
        }
        if self.skip_unreadable {
            settings.analysis.failure_policy = FailurePolicy::SkipUnreadable;
        }
        settings
    }
}

/// Default log filter for a verbosity count
pub fn log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
