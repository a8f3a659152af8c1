//! Run configuration.
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags (including `LINESTAT_JOBS`), a `.linestat.toml` file, and the
//! built-in defaults below.
//!
//! ```toml
//! [parallelism]
//! enabled = true
//! max_concurrency = 8
//!
//! [analysis]
//! line_rule = "trimmed"
//! failure_policy = "fail_fast"
//! summary_mode = "mean_of_means"
//! ```

pub mod loader;
pub mod parallel;

pub use loader::{directory_ancestors, load_config, parse_config, CONFIG_FILE_NAME};
pub use parallel::ParallelConfig;

use crate::core::{FailurePolicy, LineRule, SummaryMode};
use serde::{Deserialize, Serialize};

/// Settings for the analysis itself.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub line_rule: LineRule,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub summary_mode: SummaryMode,
}

/// Top-level configuration, as read from `.linestat.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LinestatConfig {
    #[serde(default)]
    pub parallelism: ParallelConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let config = parse_config(
            r#"
            [parallelism]
            enabled = false
            max_concurrency = 3

            [analysis]
            line_rule = "raw"
            failure_policy = "skip_unreadable"
            summary_mode = "pooled"
            "#,
        )
        .unwrap();

        assert!(!config.parallelism.enabled);
        assert_eq!(config.parallelism.max_concurrency, Some(3));
        assert_eq!(config.analysis.line_rule, LineRule::Raw);
        assert_eq!(config.analysis.failure_policy, FailurePolicy::SkipUnreadable);
        assert_eq!(config.analysis.summary_mode, SummaryMode::Pooled);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[analysis]\nline_rule = \"raw\"\n").unwrap();
        assert_eq!(config.parallelism, ParallelConfig::default());
        assert_eq!(config.analysis.line_rule, LineRule::Raw);
        assert_eq!(config.analysis.summary_mode, SummaryMode::MeanOfMeans);
    }
}
