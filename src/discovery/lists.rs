//! Whitelist and blacklist list files.
//!
//! A list file holds one path, directory or glob per line. A list location
//! is itself a glob, so several files can contribute to one list.

use super::file_list::FileList;
use super::glob;
use crate::error::{IoOperation, LiveCheckError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// One raw entry of a list file, exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListSpec(String);

impl ListSpec {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lines starting with `#` document the list and never match anything.
    pub fn is_comment(&self) -> bool {
        self.0.trim_start().starts_with('#')
    }
}

impl std::fmt::Display for ListSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of looking up a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Loaded(Vec<ListSpec>),
    /// No list file matched the location.
    NotFound,
}

impl ListOutcome {
    /// Treat a missing list as an empty one.
    pub fn into_specs_or_empty(self) -> Vec<ListSpec> {
        match self {
            Self::Loaded(specs) => specs,
            Self::NotFound => Vec::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Loads list files and resolves their entries.
pub struct ListFileLoader;

impl ListFileLoader {
    /// Load every list file matching `location` under `base`.
    ///
    /// `location` may start with a `/`; it is always taken relative to `base`.
    /// Entries are concatenated in file-discovery order and deduplicated.
    pub fn load(base: &Path, location: &str) -> Result<ListOutcome> {
        let pattern = base.join(location.trim_start_matches('/'));
        let list_files = glob::expand(&pattern)?;
        let list_files: Vec<PathBuf> = list_files.into_iter().filter(|p| p.is_file()).collect();

        if list_files.is_empty() {
            debug!(pattern = %pattern.display(), "No list file found");
            return Ok(ListOutcome::NotFound);
        }

        let mut specs: Vec<ListSpec> = Vec::new();
        let mut seen: HashSet<ListSpec> = HashSet::new();
        for list_file in &list_files {
            for line in Self::read_lines(list_file)? {
                let spec = ListSpec::new(line);
                if seen.insert(spec.clone()) {
                    specs.push(spec);
                }
            }
        }

        debug!(
            pattern = %pattern.display(),
            files = list_files.len(),
            entries = specs.len(),
            "Loaded list"
        );
        Ok(ListOutcome::Loaded(specs))
    }

    /// Read the non-blank lines of a file with their terminators stripped.
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)
            .map_err(|e| LiveCheckError::io(path, IoOperation::Read, e))?;

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Resolve entries to concrete paths relative to `root`.
    ///
    /// Entries that match nothing contribute nothing. Comment lines are skipped.
    pub fn resolve(root: &Path, specs: &[ListSpec]) -> Result<Vec<PathBuf>> {
        let mut resolved = FileList::new();

        for spec in specs.iter().filter(|s| !s.is_comment()) {
            let matches = glob::expand(&root.join(spec.as_str().trim_start_matches('/')))?;
            if matches.is_empty() {
                trace!(spec = %spec, "List entry matched nothing");
            }
            for path in matches {
                resolved.push(path);
            }
        }

        Ok(resolved.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn specs(lines: &[&str]) -> Vec<ListSpec> {
        lines.iter().map(|l| ListSpec::new(*l)).collect()
    }

    #[test]
    fn test_load_single_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("_files/whitelist")).unwrap();
        fs::write(
            dir.path().join("_files/whitelist/common.txt"),
            "app/code\n\nlib/internal\r\n\n",
        )
        .unwrap();

        let outcome = ListFileLoader::load(dir.path(), "/_files/whitelist/common.txt").unwrap();
        assert_eq!(
            outcome,
            ListOutcome::Loaded(specs(&["app/code", "lib/internal"]))
        );
    }

    #[test]
    fn test_load_merges_and_deduplicates_in_discovery_order() {
        let dir = TempDir::new().unwrap();
        let lists = dir.path().join("_files/blacklist");
        fs::create_dir_all(&lists).unwrap();
        fs::write(lists.join("a.txt"), "one\ntwo\n").unwrap();
        fs::write(lists.join("b.txt"), "two\nthree\n").unwrap();

        let outcome = ListFileLoader::load(dir.path(), "_files/blacklist/*.txt").unwrap();
        assert_eq!(outcome, ListOutcome::Loaded(specs(&["one", "two", "three"])));
    }

    #[test]
    fn test_load_missing_list_is_not_found() {
        let dir = TempDir::new().unwrap();

        let outcome = ListFileLoader::load(dir.path(), "_files/whitelist/common.txt").unwrap();
        assert!(outcome.is_not_found());
        assert!(outcome.into_specs_or_empty().is_empty());
    }

    #[test]
    fn test_load_empty_list_is_loaded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.txt"), "\n\n").unwrap();

        let outcome = ListFileLoader::load(dir.path(), "empty.txt").unwrap();
        assert_eq!(outcome, ListOutcome::Loaded(Vec::new()));
    }

    #[test]
    fn test_load_ignores_directories_matching_location() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("lists.d")).unwrap();

        let outcome = ListFileLoader::load(dir.path(), "lists.*").unwrap();
        assert!(outcome.is_not_found());
    }

    #[test]
    fn test_resolve_globs_relative_to_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app/code/Vendor/One")).unwrap();
        fs::create_dir_all(dir.path().join("app/code/Vendor/Two")).unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();

        let resolved = ListFileLoader::resolve(
            dir.path(),
            &specs(&["# modules", "app/code/Vendor/*", "lib", "missing/dir"]),
        )
        .unwrap();

        assert_eq!(
            resolved,
            vec![
                dir.path().join("app/code/Vendor/One"),
                dir.path().join("app/code/Vendor/Two"),
                dir.path().join("lib"),
            ]
        );
    }

    #[test]
    fn test_resolve_deduplicates_overlapping_entries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();

        let resolved = ListFileLoader::resolve(dir.path(), &specs(&["lib", "li*"])).unwrap();
        assert_eq!(resolved, vec![dir.path().join("lib")]);
    }

    #[test]
    fn test_resolve_brace_alternatives_across_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app/code")).unwrap();
        fs::create_dir_all(dir.path().join("lib/internal")).unwrap();

        let resolved =
            ListFileLoader::resolve(dir.path(), &specs(&["{app,lib/internal}"])).unwrap();

        assert_eq!(
            resolved,
            vec![dir.path().join("app"), dir.path().join("lib/internal")]
        );
    }

    #[test]
    fn test_comment_detection() {
        assert!(ListSpec::new("# note").is_comment());
        assert!(ListSpec::new("   #indented").is_comment());
        assert!(!ListSpec::new("app/#weird").is_comment());
    }
}
