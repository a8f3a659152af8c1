//! Work distribution: fan paths out to a fixed pool of workers and fan
//! the per-file results back into a [`ResultMapping`].
//!
//! # Contract
//!
//! - Every submitted path is analyzed at most once per submission.
//! - Duplicate paths collapse to one entry; the later submission wins.
//! - `map_reduce` blocks until all work is done; there is no streaming.
//! - Under [`FailurePolicy::FailFast`] the first failure cancels the run.
//!   Workers already busy finish their file, but their results are dropped
//!   and the error is returned instead of a partial mapping.
//!
//! # Example
//!
//! ```rust,no_run
//! use linestat::analyzers::LineAnalyzer;
//! use linestat::config::ParallelConfig;
//! use linestat::core::FailurePolicy;
//! use linestat::dispatch::{CancelToken, WorkDispatcher, WorkerPool};
//! use linestat::io::FileWalker;
//!
//! let pool = WorkDispatcher::from_config(&ParallelConfig::default(), FailurePolicy::FailFast)?;
//! let analyzer = LineAnalyzer::default();
//! let walker = FileWalker::new("src".into());
//! let dispatched = pool.map_reduce(walker.walk(), |p| analyzer.analyze(p), &CancelToken::new())?;
//! println!("{} files", dispatched.files.len());
//! # Ok::<(), linestat::errors::Error>(())
//! ```

mod collect;
pub mod sequential;
pub mod thread_pool;

pub use sequential::SequentialPool;
pub use thread_pool::ThreadWorkerPool;

use crate::config::ParallelConfig;
use crate::core::{FailurePolicy, FileStats, ResultMapping};
use crate::errors::{AnalysisFailure, Result};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag.
///
/// Cloning yields a handle to the same flag. Once cancelled it stays
/// cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of a completed dispatch.
#[derive(Debug, Default)]
pub struct Dispatched {
    pub files: ResultMapping,
    /// Files left out under [`FailurePolicy::SkipUnreadable`], by path
    pub skipped: Vec<AnalysisFailure>,
}

/// A fixed-size set of workers that can map an analysis over paths.
pub trait WorkerPool {
    /// Number of files that may be analyzed at the same time
    fn size(&self) -> usize;

    /// Analyze every path with `analyze` and collect the results.
    fn map_reduce<I, F>(&self, paths: I, analyze: F, cancel: &CancelToken) -> Result<Dispatched>
    where
        I: IntoIterator<Item = PathBuf>,
        I::IntoIter: Send,
        F: Fn(PathBuf) -> Result<(PathBuf, FileStats)> + Sync;
}

/// The pool selected by configuration.
pub enum WorkDispatcher {
    Threads(ThreadWorkerPool),
    Sequential(SequentialPool),
}

impl WorkDispatcher {
    pub fn from_config(config: &ParallelConfig, policy: FailurePolicy) -> Result<Self> {
        if config.enabled {
            let pool = ThreadWorkerPool::new(config.effective_concurrency(), policy)?;
            Ok(Self::Threads(pool))
        } else {
            Ok(Self::Sequential(SequentialPool::new(policy)))
        }
    }

    /// Report progress on `bar` while dispatching.
    pub fn with_progress(self, bar: ProgressBar) -> Self {
        match self {
            Self::Threads(pool) => Self::Threads(pool.with_progress(bar)),
            Self::Sequential(pool) => Self::Sequential(pool.with_progress(bar)),
        }
    }
}

impl WorkerPool for WorkDispatcher {
    fn size(&self) -> usize {
        match self {
            Self::Threads(pool) => pool.size(),
            Self::Sequential(pool) => pool.size(),
        }
    }

    fn map_reduce<I, F>(&self, paths: I, analyze: F, cancel: &CancelToken) -> Result<Dispatched>
    where
        I: IntoIterator<Item = PathBuf>,
        I::IntoIter: Send,
        F: Fn(PathBuf) -> Result<(PathBuf, FileStats)> + Sync,
    {
        match self {
            Self::Threads(pool) => pool.map_reduce(paths, analyze, cancel),
            Self::Sequential(pool) => pool.map_reduce(paths, analyze, cancel),
        }
    }
}
