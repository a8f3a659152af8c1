//! Progress feedback on stderr using `indicatif`.
//!
//! # Progress Behavior
//!
//! - **Quiet Mode**: no progress output (`--quiet` or `LINESTAT_QUIET`)
//! - **Non-TTY**: progress is hidden when stderr is not a terminal, so
//!   piped and CI output stays clean
//!
//! The number of files is not known up front (paths are enumerated while
//! workers run), so progress is a running counter rather than a bar.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const TEMPLATE_FILE_COUNTER: &str = "{spinner} {msg} {pos} files ({per_sec}) [{elapsed}]";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var("LINESTAT_QUIET").is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
        }
    }

    /// Determine if progress should be displayed
    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

/// Create a file counter, or a hidden one when progress is off.
pub fn file_counter(config: &ProgressConfig, msg: &str) -> ProgressBar {
    if !config.should_show_progress() {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_spinner()
        .template(TEMPLATE_FILE_COUNTER)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
