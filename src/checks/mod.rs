//! Check execution.
//!
//! A check selects its targets, hands them to an [`Analyzer`] and turns the
//! exit code into an outcome. An empty selection or a missing tool skips the
//! check instead of failing it.

pub mod strict_types;

use crate::analyzer::{Analyzer, AnalyzerError, CommandAnalyzer};
use crate::config::{CheckConfig, CheckScope};
use crate::context::SuiteContext;
use crate::discovery::{
    BlacklistPattern, FileList, ListFileLoader, ScanMode, TargetSetBuilder, VcsDiff,
};
use crate::error::{IoOperation, LiveCheckError, Result};
use crate::version::VersionRange;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing::{debug, info, warn};

pub use strict_types::STRICT_TYPES_CHECK;

const TEST_VERSION_PLACEHOLDER: &str = "{test_version}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckOutcome {
    Passed,
    Failed { exit_code: i32, report: String },
    Skipped { reason: String },
}

impl CheckOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub name: String,
    /// Number of targets handed to the analyzer.
    pub targets: usize,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

pub struct CheckRunner<'a, D: VcsDiff> {
    context: &'a SuiteContext,
    targets: TargetSetBuilder<'a, D>,
}

impl<'a, D: VcsDiff> CheckRunner<'a, D> {
    pub fn new(context: &'a SuiteContext, vcs: D) -> Self {
        Self {
            context,
            targets: TargetSetBuilder::new(context, vcs),
        }
    }

    /// Files `check` runs against.
    pub fn select_targets(&self, check: &CheckConfig) -> Result<FileList> {
        let config = self.context.config();
        let selected = match check.scope {
            CheckScope::Whitelist => self.targets.build(
                ScanMode::from_full_scan(self.context.is_full_scan()),
                &check.file_types,
                check.whitelist.as_deref().unwrap_or(&config.whitelist),
            )?,
            CheckScope::Added => self
                .targets
                .build_added(&check.file_types, check.exclude_list.as_deref())?,
            CheckScope::Project => [self.context.project_root().to_path_buf()]
                .into_iter()
                .collect(),
        };

        let Some(location) = &check.exclude_patterns else {
            return Ok(selected);
        };
        let specs = ListFileLoader::load(self.context.suite_dir(), location)?.into_specs_or_empty();
        Ok(BlacklistPattern::from_specs(&specs)?.apply(&selected))
    }

    /// Entries of the check's `forward_excludes` lists, comments and blank
    /// lines removed. A missing list forwards nothing.
    pub fn forwarded_excludes(&self, check: &CheckConfig) -> Result<Vec<String>> {
        let Some(location) = &check.forward_excludes else {
            return Ok(Vec::new());
        };
        let entries: Vec<String> = ListFileLoader::load(self.context.suite_dir(), location)?
            .into_specs_or_empty()
            .iter()
            .filter(|spec| !spec.is_comment())
            .map(|spec| spec.as_str().trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect();
        debug!(check = %check.name, count = entries.len(), "Forwarding excludes");
        Ok(entries)
    }

    /// The analyzer for `check`, with the test version and forwarded
    /// excludes applied.
    ///
    /// A check that needs the runtime version range fails hard when the
    /// manifest does not declare one.
    pub fn analyzer(&self, check: &CheckConfig) -> Result<CommandAnalyzer> {
        let mut analyzer = CommandAnalyzer::from_check(check, self.context);

        let needs_version = check.needs_test_version
            || check.args.iter().any(|a| a.contains(TEST_VERSION_PLACEHOLDER));
        if needs_version {
            let config = self.context.config();
            let range = VersionRange::from_manifest(&self.context.manifest_path(), &config.runtime)?;
            analyzer = analyzer.with_test_version(range.test_version());
        }

        let excludes = self.forwarded_excludes(check)?;
        Ok(analyzer.with_excludes(&check.exclude_arg, excludes))
    }

    /// Run a configured external check.
    pub fn run(&self, check: &CheckConfig) -> Result<CheckReport> {
        let analyzer = self.analyzer(check)?;
        let targets = self.select_targets(check)?;
        self.run_analyzer(check, &analyzer, &targets)
    }

    /// Hand `targets` to `analyzer` and interpret the result.
    pub fn run_analyzer(
        &self,
        check: &CheckConfig,
        analyzer: &dyn Analyzer,
        targets: &FileList,
    ) -> Result<CheckReport> {
        let report = |outcome| CheckReport {
            name: check.name.clone(),
            targets: targets.len(),
            outcome,
        };

        if targets.is_empty() {
            info!(check = %check.name, "No target files, skipping");
            return Ok(report(CheckOutcome::skipped("no target files")));
        }

        if !analyzer.can_run() {
            if check.skip_if_unavailable {
                warn!(check = %check.name, "Analyzer not available, skipping");
                return Ok(report(CheckOutcome::skipped(format!(
                    "{} is not available",
                    analyzer.name()
                ))));
            }
            return Err(AnalyzerError::Unavailable {
                name: analyzer.name().to_string(),
                program: check.command.clone().into(),
            }
            .into());
        }

        if let Some(path) = analyzer.report_path() {
            self.context.ensure_report_dir()?;
            touch(path)?;
        }

        let exit_code = analyzer.run(targets)?;
        let report_text = match analyzer.report_path() {
            Some(path) => read_report(path)?,
            None => String::new(),
        };

        if check.success_codes.contains(&exit_code) {
            if let Some(path) = analyzer.report_path()
                && report_text.trim().is_empty()
            {
                remove_report(path)?;
            }
            debug!(check = %check.name, exit_code, "Check passed");
            return Ok(report(CheckOutcome::Passed));
        }

        Ok(report(CheckOutcome::Failed {
            exit_code,
            report: report_text,
        }))
    }

    /// Built-in check: every newly added source file declares strict types.
    pub fn run_strict_types(&self) -> Result<CheckReport> {
        let config = self.context.config();
        let file_types: Vec<String> = strict_types::STRICT_TYPES_FILE_TYPES
            .iter()
            .map(|t| t.to_string())
            .collect();
        let targets = self
            .targets
            .build_added(&file_types, Some(&config.strict_types_blacklist))?;

        let missing = strict_types::missing_declaration(&targets, &config.strict_types_marker)?;
        let outcome = if missing.is_empty() {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed {
                exit_code: 1,
                report: strict_types::failure_message(&missing),
            }
        };

        Ok(CheckReport {
            name: STRICT_TYPES_CHECK.to_string(),
            targets: targets.len(),
            outcome,
        })
    }
}

fn touch(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| LiveCheckError::io(path, IoOperation::Create, e))
}

fn read_report(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }
    let bytes = fs::read(path).map_err(|e| LiveCheckError::io(path, IoOperation::Read, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn remove_report(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LiveCheckError::io(path, IoOperation::Delete, e)),
    }
}
