pub mod output;
pub mod walker;

pub use output::{create_writer, OutputFormat, OutputWriter, Report};
pub use walker::{validate_root, FileWalker};
