//! Changed-file discovery.
//!
//! Changed files come from pre-generated `changed_files*` lists when any
//! exist under `<lists base>/_files/`, and from a live `git diff` otherwise.

use super::file_list::FileList;
use super::glob;
use super::lists::ListFileLoader;
use crate::context::SuiteContext;
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Which changes to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Modified, staged and added files.
    Changed,
    /// Only files newly added to the index.
    Added,
}

impl ChangeKind {
    /// Name pattern of the pre-generated list files for this kind.
    pub fn list_pattern(self) -> &'static str {
        match self {
            Self::Changed => "changed_files*",
            Self::Added => "changed_files*.added.*",
        }
    }
}

/// Errors from the version-control backend.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("Git command not found: {0}")]
    Unavailable(#[source] std::io::Error),

    #[error("git {args} failed: {stderr}")]
    CommandFailed { args: String, stderr: String },
}

/// Source of live change information.
pub trait VcsDiff {
    /// Paths differing from the last commit, unstaged and staged.
    fn changed_files(&self) -> std::result::Result<Vec<String>, VcsError>;

    /// Paths staged with status "added".
    fn added_files(&self) -> std::result::Result<Vec<String>, VcsError>;
}

/// [`VcsDiff`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitDiff {
    workdir: PathBuf,
}

impl GitDiff {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn diff(&self, args: &[&str]) -> std::result::Result<Vec<String>, VcsError> {
        let output = Command::new("git")
            .arg("diff")
            .arg("-z")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(VcsError::Unavailable)?;

        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                args: format!("diff {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(split_name_list(&output.stdout))
    }
}

/// Split `-z` output. Paths are NUL-terminated and never quoted.
fn split_name_list(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|&b| b == b'\0')
        .filter(|name| !name.is_empty())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}

impl VcsDiff for GitDiff {
    fn changed_files(&self) -> std::result::Result<Vec<String>, VcsError> {
        let mut files = self.diff(&["--name-only"])?;
        files.extend(self.diff(&["--cached", "--name-only"])?);
        Ok(files)
    }

    fn added_files(&self) -> std::result::Result<Vec<String>, VcsError> {
        self.diff(&["--cached", "--name-only", "--diff-filter=A"])
    }
}

/// Where the change set for one call comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    /// Pre-generated list files, in discovery order.
    ListFiles(Vec<PathBuf>),
    /// No list files exist; ask version control.
    LiveDiff,
}

/// Resolves the set of changed files for a run.
pub struct ChangeSetResolver<'a, D: VcsDiff> {
    context: &'a SuiteContext,
    vcs: D,
}

impl<'a, D: VcsDiff> ChangeSetResolver<'a, D> {
    pub fn new(context: &'a SuiteContext, vcs: D) -> Self {
        Self { context, vcs }
    }

    /// Pick the change source for `kind`.
    pub fn source(&self, kind: ChangeKind) -> Result<ChangeSource> {
        let pattern = self
            .context
            .changed_files_dir()
            .join("_files")
            .join(kind.list_pattern());
        let list_files: Vec<PathBuf> = glob::expand(&pattern)?
            .into_iter()
            .filter(|p| p.is_file())
            .collect();

        if list_files.is_empty() {
            Ok(ChangeSource::LiveDiff)
        } else {
            Ok(ChangeSource::ListFiles(list_files))
        }
    }

    /// Absolute, deduplicated paths of changed files.
    ///
    /// A failing version-control backend yields an empty list.
    pub fn resolve(&self, kind: ChangeKind) -> Result<FileList> {
        let relative = match self.source(kind)? {
            ChangeSource::ListFiles(list_files) => {
                debug!(?kind, lists = list_files.len(), "Reading changed-file lists");
                let mut lines = Vec::new();
                for list_file in &list_files {
                    lines.extend(ListFileLoader::read_lines(list_file)?);
                }
                lines
            }
            ChangeSource::LiveDiff => {
                debug!(?kind, "No changed-file lists, falling back to git diff");
                let result = match kind {
                    ChangeKind::Changed => self.vcs.changed_files(),
                    ChangeKind::Added => self.vcs.added_files(),
                };
                result.unwrap_or_else(|e| {
                    warn!(error = %e, "Version control unavailable, treating change set as empty");
                    Vec::new()
                })
            }
        };

        let files = absolutize(self.context.project_root(), relative);
        info!(?kind, count = files.len(), "Resolved change set");
        Ok(files)
    }
}

/// Entries are always relative to `root`, even with a leading `/`.
fn absolutize(root: &Path, relative: Vec<String>) -> FileList {
    relative
        .iter()
        .map(|file| root.join(file.trim().trim_start_matches('/')))
        .collect()
}
