//! External analyzer collaborators.
//!
//! An analyzer is any tool that takes a list of target paths, writes an
//! optional report file and signals its verdict through an exit code.

mod command;

pub use command::CommandAnalyzer;

use crate::discovery::FileList;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Analyzer '{name}' is not available ({program})")]
    Unavailable { name: String, program: PathBuf },

    #[error("Failed to start analyzer '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait Analyzer {
    fn name(&self) -> &str;

    /// Whether the tool is installed and can be started.
    fn can_run(&self) -> bool;

    /// Analyze `files` and return the tool's exit code.
    fn run(&self, files: &FileList) -> Result<i32, AnalyzerError>;

    /// Report file the tool writes, if any.
    fn report_path(&self) -> Option<&Path> {
        None
    }
}
