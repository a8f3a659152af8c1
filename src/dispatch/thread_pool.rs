//! Rayon-backed worker pool.

use super::collect::{finish, FatalSlot, Partial, StepContext};
use super::{CancelToken, Dispatched, WorkerPool};
use crate::core::{FailurePolicy, FileStats};
use crate::errors::{Error, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::PathBuf;

/// A dedicated rayon pool with a fixed number of threads.
///
/// The path iterator is bridged into the pool as it is consumed, so an
/// enumeration still in progress does not have to be collected first.
/// Each thread folds its own results and the partial maps are reduced at
/// the end, which keeps the workers free of shared locks.
pub struct ThreadWorkerPool {
    pool: rayon::ThreadPool,
    policy: FailurePolicy,
    progress: ProgressBar,
}

impl ThreadWorkerPool {
    pub fn new(workers: usize, policy: FailurePolicy) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("linestat-worker-{}", i))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;

        Ok(Self {
            pool,
            policy,
            progress: ProgressBar::hidden(),
        })
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }
}

impl WorkerPool for ThreadWorkerPool {
    fn size(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn map_reduce<I, F>(&self, paths: I, analyze: F, cancel: &CancelToken) -> Result<Dispatched>
    where
        I: IntoIterator<Item = PathBuf>,
        I::IntoIter: Send,
        F: Fn(PathBuf) -> Result<(PathBuf, FileStats)> + Sync,
    {
        log::debug!("dispatching with {} workers", self.size());

        let fatal = FatalSlot::default();
        let ctx = StepContext {
            analyze: &analyze,
            policy: self.policy,
            cancel,
            fatal: &fatal,
            progress: &self.progress,
        };

        let paths = paths.into_iter();
        let partial = self.pool.install(|| {
            paths
                .take_while(|_| !cancel.is_cancelled())
                .enumerate()
                .par_bridge()
                .map(|(seq, path)| ctx.run(seq, path))
                .fold(Partial::default, Partial::absorb)
                .reduce(Partial::default, Partial::merge)
        });

        finish(partial, &fatal, cancel)
    }
}
