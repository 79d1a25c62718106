//! Error types for livecheck.
//!
//! Recoverable conditions (missing list files, an empty change set, paths
//! that no longer exist) are modelled as ordinary values by the discovery
//! layer. Only the conditions below surface as errors.

mod context;

pub use context::IoOperation;

use crate::analyzer::AnalyzerError;
use crate::config::ConfigError;
use crate::version::VersionError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unified error type for all livecheck operations.
#[derive(Error, Debug)]
pub enum LiveCheckError {
    /// I/O operation failed.
    #[error("Failed to {operation} {path}: {source}")]
    Io {
        path: PathBuf,
        operation: IoOperation,
        #[source]
        source: std::io::Error,
    },

    /// A list line or list-file pattern is not a valid glob.
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Blacklist entries could not be combined into a regular expression.
    #[error("Invalid blacklist pattern: {0}")]
    InvalidBlacklist(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

impl LiveCheckError {
    pub fn io(path: impl AsRef<Path>, operation: IoOperation, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            operation,
            source,
        }
    }
}

/// Result type alias for livecheck operations.
pub type Result<T> = std::result::Result<T, LiveCheckError>;
