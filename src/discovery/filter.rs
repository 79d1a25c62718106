//! Type and directory filtering of candidate files.

use super::file_list::FileList;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Narrows a [`FileList`] by extension and containing directory.
///
/// Files that do not exist are always dropped. The result holds canonical
/// paths in the order of the input.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    allowed_types: HashSet<String>,
    /// `None` disables the directory check.
    allowed_dirs: Option<Vec<String>>,
}

impl FileFilter {
    /// Build a filter. An empty `types` or `dirs` set allows everything for
    /// that check.
    pub fn new<T, D>(types: T, dirs: D) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        D: IntoIterator,
        D::Item: AsRef<Path>,
    {
        let allowed_types = types.into_iter().map(Into::into).collect();
        let dirs: Vec<PathBuf> = dirs.into_iter().map(|d| d.as_ref().to_path_buf()).collect();

        let allowed_dirs = if dirs.is_empty() {
            None
        } else {
            Some(canonical_dirs(&dirs))
        };

        Self {
            allowed_types,
            allowed_dirs,
        }
    }

    /// Canonical allowed directories, in matching order.
    pub fn allowed_dirs(&self) -> Option<&[String]> {
        self.allowed_dirs.as_deref()
    }

    fn has_allowed_type(&self, file: &Path) -> bool {
        if self.allowed_types.is_empty() {
            return true;
        }
        file.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.allowed_types.contains(ext))
    }

    // Plain string prefix: `/a/b` also contains `/a/bc/file`.
    fn is_in_allowed_dir(&self, file: &Path) -> bool {
        let Some(dirs) = &self.allowed_dirs else {
            return true;
        };
        let file = file.to_string_lossy();
        dirs.iter().any(|dir| file.starts_with(dir.as_str()))
    }

    /// Keep the files that exist and pass both checks.
    pub fn apply(&self, files: &FileList) -> FileList {
        let filtered: FileList = files
            .iter()
            .filter_map(|file| match file.canonicalize() {
                Ok(canonical) => Some(canonical),
                Err(e) => {
                    trace!(file = %file.display(), error = %e, "Dropping unresolvable path");
                    None
                }
            })
            .filter(|file| self.has_allowed_type(file) && self.is_in_allowed_dir(file))
            .collect();

        debug!(input = files.len(), kept = filtered.len(), "Filtered files");
        filtered
    }
}

/// Filter `files` by `types` and `dirs`; see [`FileFilter`].
pub fn filter<T, D>(files: &FileList, types: T, dirs: D) -> FileList
where
    T: IntoIterator,
    T::Item: Into<String>,
    D: IntoIterator,
    D::Item: AsRef<Path>,
{
    FileFilter::new(types, dirs).apply(files)
}

// Ascending by string length; the sort is stable so equal lengths keep their
// list order.
fn canonical_dirs(dirs: &[PathBuf]) -> Vec<String> {
    let mut canonical: Vec<String> = dirs
        .iter()
        .filter_map(|dir| match dir.canonicalize() {
            Ok(path) => Some(path.to_string_lossy().into_owned()),
            Err(e) => {
                trace!(dir = %dir.display(), error = %e, "Skipping unresolvable directory");
                None
            }
        })
        .collect();
    canonical.sort_by_key(|dir| dir.len());
    canonical
}
