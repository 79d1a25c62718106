//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Placeholder for one forwarded list entry in `exclude_arg`.
pub const ENTRY_PLACEHOLDER: &str = "{entry}";

/// Main configuration structure for livecheck.
///
/// Every location is relative: `suite_dir`, `changed_files_dir` and
/// `report_dir` to the project root, list locations to `suite_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base folder holding the suite's `_files` lists.
    pub suite_dir: String,
    /// Base folder whose `_files` holds `changed_files*` lists. Defaults to `suite_dir`.
    pub changed_files_dir: Option<String>,
    /// Where analyzers write their reports.
    pub report_dir: String,
    /// Whitelist location used by checks that do not name their own.
    pub whitelist: String,
    /// Exact-path blacklist for the strict declaration check.
    pub strict_types_blacklist: String,
    /// Text every newly added source file must contain.
    pub strict_types_marker: String,
    /// Analyze the whole whitelist instead of changed files.
    pub full_scan: bool,
    /// Dependency manifest declaring the runtime constraint.
    pub manifest: String,
    /// Key of the runtime under the manifest's `require` section.
    pub runtime: String,
    /// External analyzer checks.
    pub checks: Vec<CheckConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suite_dir: "dev/tests/static".to_string(),
            changed_files_dir: None,
            report_dir: "dev/tests/static/report".to_string(),
            whitelist: "_files/whitelist/common.txt".to_string(),
            strict_types_blacklist: "_files/blacklist/strict_type.txt".to_string(),
            strict_types_marker: "strict_types=1".to_string(),
            full_scan: false,
            manifest: "composer.json".to_string(),
            runtime: "php".to_string(),
            checks: Vec::new(),
        }
    }
}

impl Config {
    pub fn check(&self, name: &str) -> Option<&CheckConfig> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Which files a check is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckScope {
    /// Changed whitelisted files, or the whole whitelist in full-scan mode.
    #[default]
    Whitelist,
    /// Newly added files minus `exclude_list`.
    Added,
    /// The project root itself.
    Project,
}

/// One external analyzer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    pub name: String,
    /// Executable, resolved from `PATH` or relative to the project root.
    pub command: String,
    /// Arguments placed before the target paths. `{report}` and
    /// `{test_version}` are substituted.
    #[serde(default)]
    pub args: Vec<String>,
    /// Report file name inside the report directory.
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub scope: CheckScope,
    /// Allowed extensions; empty allows all.
    #[serde(default)]
    pub file_types: Vec<String>,
    /// Whitelist location overriding the suite default.
    #[serde(default)]
    pub whitelist: Option<String>,
    /// Exact-path blacklist location for the `added` scope.
    #[serde(default)]
    pub exclude_list: Option<String>,
    /// Location of regex fragments; matching targets are dropped.
    #[serde(default)]
    pub exclude_patterns: Option<String>,
    /// Location of lists whose entries are passed on to the tool itself,
    /// for tools that walk the project and take their own excludes.
    #[serde(default)]
    pub forward_excludes: Option<String>,
    /// Arguments added once per forwarded entry, `{entry}` substituted.
    #[serde(default = "default_exclude_arg")]
    pub exclude_arg: Vec<String>,
    /// Resolve the runtime version range from the manifest before running.
    #[serde(default)]
    pub needs_test_version: bool,
    /// Report an unavailable tool as skipped rather than as an error.
    #[serde(default = "default_true")]
    pub skip_if_unavailable: bool,
    #[serde(default = "default_success_codes")]
    pub success_codes: Vec<i32>,
}

fn default_true() -> bool {
    true
}

fn default_success_codes() -> Vec<i32> {
    vec![0]
}

fn default_exclude_arg() -> Vec<String> {
    vec!["--exclude".to_string(), ENTRY_PLACEHOLDER.to_string()]
}
