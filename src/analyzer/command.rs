use super::{Analyzer, AnalyzerError};
use crate::config::{CheckConfig, ENTRY_PLACEHOLDER};
use crate::context::SuiteContext;
use crate::discovery::FileList;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

const REPORT_PLACEHOLDER: &str = "{report}";
const TEST_VERSION_PLACEHOLDER: &str = "{test_version}";

/// Runs an executable with the target paths appended to its arguments.
///
/// The tool's stdout is forwarded to stderr so that livecheck's own output
/// stays machine readable.
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    name: String,
    program: PathBuf,
    args: Vec<String>,
    workdir: PathBuf,
    report: Option<PathBuf>,
    test_version: Option<String>,
    exclude_args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            workdir: workdir.into(),
            report: None,
            test_version: None,
            exclude_args: Vec::new(),
        }
    }

    /// Build from a check definition. Commands containing a path separator
    /// are resolved against the project root, bare names through `PATH`.
    pub fn from_check(check: &CheckConfig, context: &SuiteContext) -> Self {
        let program = if check.command.contains('/') {
            context.project_root().join(&check.command)
        } else {
            PathBuf::from(&check.command)
        };

        let mut analyzer = Self::new(&check.name, program, context.project_root())
            .with_args(check.args.iter().cloned());
        if let Some(report) = &check.report {
            analyzer = analyzer.with_report(context.report_file(report));
        }
        analyzer
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn with_report(mut self, report: impl Into<PathBuf>) -> Self {
        self.report = Some(report.into());
        self
    }

    pub fn with_test_version(mut self, test_version: impl Into<String>) -> Self {
        self.test_version = Some(test_version.into());
        self
    }

    /// Repeat `template` for every entry, substituting `{entry}`. The
    /// results follow the regular arguments.
    pub fn with_excludes<I>(mut self, template: &[String], entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for entry in entries {
            self.exclude_args.extend(
                template
                    .iter()
                    .map(|arg| arg.replace(ENTRY_PLACEHOLDER, entry.as_ref())),
            );
        }
        self
    }

    /// Arguments with placeholders substituted.
    pub fn expanded_args(&self) -> Vec<String> {
        let report = self
            .report
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let test_version = self.test_version.clone().unwrap_or_default();

        self.args
            .iter()
            .map(|arg| {
                arg.replace(REPORT_PLACEHOLDER, &report)
                    .replace(TEST_VERSION_PLACEHOLDER, &test_version)
            })
            .chain(self.exclude_args.iter().cloned())
            .collect()
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Analyzer for CommandAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_run(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .current_dir(&self.workdir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn run(&self, files: &FileList) -> Result<i32, AnalyzerError> {
        let args = self.expanded_args();
        debug!(analyzer = %self.name, ?args, files = files.len(), "Starting analyzer");

        let status = Command::new(&self.program)
            .args(&args)
            .args(files.iter())
            .current_dir(&self.workdir)
            .stdout(Stdio::from(std::io::stderr()))
            .status()
            .map_err(|e| AnalyzerError::Spawn {
                name: self.name.clone(),
                source: e,
            })?;

        // terminated by a signal
        let code = status.code().unwrap_or(-1);
        info!(analyzer = %self.name, code, "Analyzer finished");
        Ok(code)
    }

    fn report_path(&self) -> Option<&Path> {
        self.report.as_deref()
    }
}
