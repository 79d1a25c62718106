pub mod analyzer;
pub mod checks;
pub mod cli;
pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod handlers;
pub mod reporter;
pub mod version;

#[cfg(test)]
pub mod test_utils;

pub use analyzer::{Analyzer, AnalyzerError, CommandAnalyzer};
pub use checks::{CheckOutcome, CheckReport, CheckRunner};
pub use cli::{Cli, Command, OutputFormat};
pub use config::{CheckConfig, CheckScope, Config, ConfigError};
pub use context::SuiteContext;
pub use discovery::{
    BlacklistPattern, ChangeKind, ChangeSetResolver, FileFilter, FileList, GitDiff,
    ListFileLoader, ListOutcome, ListSpec, ScanMode, TargetSetBuilder, VcsDiff, filter,
};
pub use error::{LiveCheckError, Result};
pub use reporter::{JsonReporter, Reporter, TerminalReporter};
pub use version::{VersionError, VersionRange};
