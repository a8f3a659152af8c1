// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod errors;
pub mod io;
pub mod progress;

// Re-export commonly used types
pub use crate::core::{
    FailurePolicy, FileStats, GlobalSummary, LineRule, ResultMapping, SummaryMode,
};

pub use crate::core::aggregate::summarize;

pub use crate::analyzers::LineAnalyzer;

pub use crate::dispatch::{CancelToken, Dispatched, WorkDispatcher, WorkerPool};

pub use crate::commands::{analyze_directory, Analysis};

pub use crate::errors::{Error, Result};
