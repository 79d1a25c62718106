//! Per-run suite context.
//!
//! Built once from the project root and the loaded [`Config`], then shared
//! read-only by every selector and check of the run.

use crate::config::Config;
use crate::error::{IoOperation, LiveCheckError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SuiteContext {
    project_root: PathBuf,
    suite_dir: PathBuf,
    changed_files_dir: PathBuf,
    report_dir: PathBuf,
    full_scan: bool,
    config: Config,
}

impl SuiteContext {
    /// Resolve the configured locations against `project_root`.
    ///
    /// The root is canonicalized when it exists so that paths built from it
    /// compare equal to canonicalized file paths.
    pub fn new(project_root: impl AsRef<Path>, config: Config) -> Self {
        let root = project_root.as_ref();
        let project_root = root
            .canonicalize()
            .or_else(|_| std::path::absolute(root))
            .unwrap_or_else(|_| root.to_path_buf());

        let suite_dir = project_root.join(&config.suite_dir);
        let changed_files_dir = config
            .changed_files_dir
            .as_ref()
            .map_or_else(|| suite_dir.clone(), |dir| project_root.join(dir));
        let report_dir = project_root.join(&config.report_dir);

        Self {
            full_scan: config.full_scan,
            project_root,
            suite_dir,
            changed_files_dir,
            report_dir,
            config,
        }
    }

    /// Override the configured scan mode.
    pub fn with_full_scan(mut self, full_scan: bool) -> Self {
        self.full_scan = full_scan;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn suite_dir(&self) -> &Path {
        &self.suite_dir
    }

    pub fn changed_files_dir(&self) -> &Path {
        &self.changed_files_dir
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn is_full_scan(&self) -> bool {
        self.full_scan
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.config.manifest)
    }

    pub fn report_file(&self, name: &str) -> PathBuf {
        self.report_dir.join(name)
    }

    /// Create the report directory if it does not exist yet.
    pub fn ensure_report_dir(&self) -> Result<()> {
        if self.report_dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.report_dir)
            .map_err(|e| LiveCheckError::io(&self.report_dir, IoOperation::Create, e))
    }
}
