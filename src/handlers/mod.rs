//! CLI command handlers.
//!
//! Kept apart from main.rs so each command can be unit tested.

mod check;
mod select;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::SuiteContext;
use crate::error::Result;
use colored::Colorize;
use std::process::ExitCode;
use tracing::debug;

pub use check::{handle_run, handle_strict_types};
pub use select::{handle_added, handle_targets, handle_versions};

/// Environment switch for full-scan mode.
pub const FULL_SCAN_ENV: &str = "LIVECHECK_FULL_SCAN";

/// Result type for handler functions that can be tested.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    Success,
    Error(u8),
}

impl HandlerResult {
    /// Some check failed.
    pub const FAILED: Self = Self::Error(1);
    /// Configuration, I/O or version-constraint error.
    pub const ERROR: Self = Self::Error(2);
}

impl From<HandlerResult> for ExitCode {
    fn from(result: HandlerResult) -> Self {
        match result {
            HandlerResult::Success => ExitCode::SUCCESS,
            HandlerResult::Error(code) => ExitCode::from(code),
        }
    }
}

/// Load the configuration and build the run's context.
///
/// Full-scan mode is on when the config, the command-line flag or
/// [`FULL_SCAN_ENV`] asks for it.
pub fn load_context(cli: &Cli, full_scan_flag: bool) -> Result<SuiteContext> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(&cli.root)?,
    };

    let env_value = std::env::var(FULL_SCAN_ENV).ok();
    let full_scan =
        config.full_scan || full_scan_requested(full_scan_flag, env_value.as_deref());

    let context = SuiteContext::new(&cli.root, config).with_full_scan(full_scan);
    debug!(
        root = %context.project_root().display(),
        full_scan,
        "Loaded suite context"
    );
    Ok(context)
}

fn full_scan_requested(flag: bool, env_value: Option<&str>) -> bool {
    flag || env_value.is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Print `err` and map it to the error exit code.
pub(crate) fn fail(err: impl std::fmt::Display) -> HandlerResult {
    eprintln!("{} {}", "error:".red().bold(), err);
    HandlerResult::ERROR
}
