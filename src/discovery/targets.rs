//! Target set composition.
//!
//! Three selections:
//! - incremental: changed files intersected with the whitelist
//! - full scan: everything the whitelist names
//! - added: newly added files minus a blacklist

use super::changes::{ChangeKind, ChangeSetResolver, VcsDiff};
use super::file_list::FileList;
use super::filter::{FileFilter, filter};
use super::lists::ListFileLoader;
use crate::context::SuiteContext;
use crate::error::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Whether a check runs on changes or on the whole whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    #[default]
    Incremental,
    Full,
}

impl ScanMode {
    pub fn from_full_scan(full_scan: bool) -> Self {
        if full_scan { Self::Full } else { Self::Incremental }
    }
}

/// Builds the ordered list of files a check runs against.
pub struct TargetSetBuilder<'a, D: VcsDiff> {
    context: &'a SuiteContext,
    changes: ChangeSetResolver<'a, D>,
}

impl<'a, D: VcsDiff> TargetSetBuilder<'a, D> {
    pub fn new(context: &'a SuiteContext, vcs: D) -> Self {
        Self {
            context,
            changes: ChangeSetResolver::new(context, vcs),
        }
    }

    /// Select by mode: [`Self::build_full`] or [`Self::build_incremental`].
    pub fn build(&self, mode: ScanMode, file_types: &[String], whitelist: &str) -> Result<FileList> {
        match mode {
            ScanMode::Full => self.build_full(whitelist),
            ScanMode::Incremental => self.build_incremental(file_types, whitelist),
        }
    }

    /// Changed files of the given types inside whitelisted locations.
    ///
    /// Returns immediately, without touching the whitelist, when nothing changed.
    pub fn build_incremental(&self, file_types: &[String], whitelist: &str) -> Result<FileList> {
        let changed = self.changes.resolve(ChangeKind::Changed)?;
        if changed.is_empty() {
            debug!("No changed files, nothing to select");
            return Ok(FileList::new());
        }

        let whitelisted = self.whitelisted_paths(whitelist)?;
        if whitelisted.is_empty() {
            debug!(whitelist, "Whitelist resolved to nothing");
            return Ok(FileList::new());
        }

        let targets = FileFilter::new(file_types.iter().cloned(), &whitelisted).apply(&changed);
        info!(count = targets.len(), "Selected incremental targets");
        Ok(targets)
    }

    /// Every whitelisted location, without change or type filtering.
    pub fn build_full(&self, whitelist: &str) -> Result<FileList> {
        let targets: FileList = self
            .whitelisted_paths(whitelist)?
            .into_iter()
            .filter_map(|path| path.canonicalize().ok())
            .collect();
        info!(count = targets.len(), "Selected full-scan targets");
        Ok(targets)
    }

    /// Newly added files of the given types, minus the blacklist.
    ///
    /// Blacklist entries remove exact paths only.
    pub fn build_added(&self, file_types: &[String], blacklist: Option<&str>) -> Result<FileList> {
        let added = self.changes.resolve(ChangeKind::Added)?;
        if added.is_empty() {
            return Ok(FileList::new());
        }

        let candidates = filter(&added, file_types.iter().cloned(), Vec::<PathBuf>::new());

        let specs = match blacklist {
            Some(location) => {
                ListFileLoader::load(self.context.suite_dir(), location)?.into_specs_or_empty()
            }
            None => Vec::new(),
        };
        let excluded: FileList = ListFileLoader::resolve(self.context.project_root(), &specs)?
            .into_iter()
            .filter_map(|path| path.canonicalize().ok())
            .collect();

        let targets = candidates.without(&excluded);
        info!(
            count = targets.len(),
            excluded = candidates.len() - targets.len(),
            "Selected added targets"
        );
        Ok(targets)
    }

    fn whitelisted_paths(&self, whitelist: &str) -> Result<Vec<PathBuf>> {
        let specs = ListFileLoader::load(self.context.suite_dir(), whitelist)?.into_specs_or_empty();
        ListFileLoader::resolve(self.context.project_root(), &specs)
    }
}
