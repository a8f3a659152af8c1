//! Single-threaded pool, used when parallelism is disabled.

use super::collect::{finish, FatalSlot, Partial, StepContext};
use super::{CancelToken, Dispatched, WorkerPool};
use crate::core::{FailurePolicy, FileStats};
use crate::errors::Result;
use indicatif::ProgressBar;
use std::path::PathBuf;

/// Analyzes paths one after another on the calling thread.
pub struct SequentialPool {
    policy: FailurePolicy,
    progress: ProgressBar,
}

impl SequentialPool {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }
}

impl WorkerPool for SequentialPool {
    fn size(&self) -> usize {
        1
    }

    fn map_reduce<I, F>(&self, paths: I, analyze: F, cancel: &CancelToken) -> Result<Dispatched>
    where
        I: IntoIterator<Item = PathBuf>,
        I::IntoIter: Send,
        F: Fn(PathBuf) -> Result<(PathBuf, FileStats)> + Sync,
    {
        let fatal = FatalSlot::default();
        let ctx = StepContext {
            analyze: &analyze,
            policy: self.policy,
            cancel,
            fatal: &fatal,
            progress: &self.progress,
        };

        let partial = paths
            .into_iter()
            .take_while(|_| !cancel.is_cancelled())
            .enumerate()
            .map(|(seq, path)| ctx.run(seq, path))
            .fold(Partial::default(), Partial::absorb);

        finish(partial, &fatal, cancel)
    }
}
