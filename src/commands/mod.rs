pub mod run;

pub use run::{analyze_directory, handle_run, Analysis, RunConfig};
