//! Worker pool sizing.
//!
//! ```toml
//! [parallelism]
//! enabled = true        # false analyzes on the calling thread
//! max_concurrency = 4   # omit or 0 for one worker per CPU
//! ```

use serde::{Deserialize, Serialize};

/// How many files may be analyzed at once.
///
/// ```rust
/// use linestat::config::ParallelConfig;
///
/// assert_eq!(ParallelConfig::with_workers(4).effective_concurrency(), 4);
/// assert_eq!(ParallelConfig::sequential().effective_concurrency(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParallelConfig {
    pub enabled: bool,

    /// Worker count; `None` or `Some(0)` means one per available CPU
    pub max_concurrency: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_concurrency: None,
        }
    }
}

impl ParallelConfig {
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            max_concurrency: None,
        }
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            enabled: true,
            max_concurrency: Some(workers),
        }
    }

    /// Number of workers the dispatcher should start. Always at least 1.
    pub fn effective_concurrency(&self) -> usize {
        match (self.enabled, self.max_concurrency) {
            (false, _) => 1,
            (true, Some(workers)) if workers > 0 => workers,
            (true, _) => available_cpus(),
        }
    }
}

/// CPUs this process may use, falling back to 1 when unknown.
pub fn available_cpus() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}
