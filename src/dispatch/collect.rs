//! Fan-in state shared by every pool implementation.

use super::CancelToken;
use crate::core::{FailurePolicy, FileStats, ResultMapping};
use crate::errors::{AnalysisFailure, Error, Result};
use indicatif::ProgressBar;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;

/// Outcome of processing one submitted path.
pub(crate) enum Step {
    Analyzed {
        seq: usize,
        path: PathBuf,
        stats: FileStats,
    },
    Skipped(AnalysisFailure),
    Discarded,
}

/// Results collected by one worker, or by several after merging.
///
/// Each entry remembers the submission sequence number of the path that
/// produced it; on a duplicate path the later submission wins no matter
/// which one finished first.
#[derive(Default)]
pub(crate) struct Partial {
    entries: HashMap<PathBuf, (usize, FileStats)>,
    skipped: Vec<AnalysisFailure>,
}

impl Partial {
    pub(crate) fn absorb(mut self, step: Step) -> Self {
        match step {
            Step::Analyzed { seq, path, stats } => self.insert(path, seq, stats),
            Step::Skipped(failure) => self.skipped.push(failure),
            Step::Discarded => {}
        }
        self
    }

    pub(crate) fn merge(mut self, other: Partial) -> Self {
        for (path, (seq, stats)) in other.entries {
            self.insert(path, seq, stats);
        }
        self.skipped.extend(other.skipped);
        self
    }

    fn insert(&mut self, path: PathBuf, seq: usize, stats: FileStats) {
        match self.entries.get(&path) {
            Some((existing, _)) if *existing > seq => {}
            _ => {
                self.entries.insert(path, (seq, stats));
            }
        }
    }

    pub(crate) fn into_mapping(self) -> (ResultMapping, Vec<AnalysisFailure>) {
        let mapping = self
            .entries
            .into_iter()
            .map(|(path, (_, stats))| (path, stats))
            .collect();
        let mut skipped = self.skipped;
        skipped.sort_by(|a, b| a.path.cmp(&b.path));
        (mapping, skipped)
    }
}

/// Holds the first fatal error reported by any worker.
#[derive(Default)]
pub(crate) struct FatalSlot(Mutex<Option<Error>>);

impl FatalSlot {
    /// Record `error` unless an earlier one is already held, and cancel
    /// the remaining work.
    pub(crate) fn record(&self, error: Error, cancel: &CancelToken) {
        let mut slot = self.0.lock();
        if slot.is_none() {
            log::debug!("fatal error recorded, cancelling remaining work: {}", error);
            *slot = Some(error);
        }
        cancel.cancel();
    }

    pub(crate) fn take(&self) -> Option<Error> {
        self.0.lock().take()
    }
}

/// Everything a worker needs besides the path itself.
pub(crate) struct StepContext<'a, F> {
    pub analyze: &'a F,
    pub policy: FailurePolicy,
    pub cancel: &'a CancelToken,
    pub fatal: &'a FatalSlot,
    pub progress: &'a ProgressBar,
}

impl<F> StepContext<'_, F>
where
    F: Fn(PathBuf) -> Result<(PathBuf, FileStats)>,
{
    /// Analyze one path under the failure policy.
    ///
    /// Work that starts or finishes after cancellation is discarded.
    pub(crate) fn run(&self, seq: usize, path: PathBuf) -> Step {
        if self.cancel.is_cancelled() {
            return Step::Discarded;
        }

        let outcome = (self.analyze)(path.clone());
        self.progress.inc(1);

        match outcome {
            Ok(_) if self.cancel.is_cancelled() => Step::Discarded,
            Ok((path, stats)) => Step::Analyzed { seq, path, stats },
            Err(e) => match self.policy {
                FailurePolicy::SkipUnreadable => {
                    let failure = AnalysisFailure::new(path, &e);
                    log::warn!("Skipping: {}", failure.error);
                    Step::Skipped(failure)
                }
                FailurePolicy::FailFast => {
                    self.fatal.record(e, self.cancel);
                    Step::Discarded
                }
            },
        }
    }
}

/// Turn the collected state into the final dispatch result.
pub(crate) fn finish(
    partial: Partial,
    fatal: &FatalSlot,
    cancel: &CancelToken,
) -> Result<super::Dispatched> {
    if let Some(error) = fatal.take() {
        return Err(error);
    }
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let (files, skipped) = partial.into_mapping();
    Ok(super::Dispatched { files, skipped })
}
