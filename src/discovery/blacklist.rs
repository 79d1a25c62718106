//! Pattern blacklists.
//!
//! Each list entry is a regular-expression fragment. All fragments are
//! combined into one case-insensitive alternation and every target path
//! containing a match is removed.

use super::file_list::FileList;
use super::lists::ListSpec;
use crate::error::Result;
use regex::{Regex, RegexBuilder};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct BlacklistPattern {
    regex: Option<Regex>,
}

impl BlacklistPattern {
    /// Combine entries into one pattern. No usable entries means no exclusions.
    pub fn from_specs(specs: &[ListSpec]) -> Result<Self> {
        let fragments: Vec<&str> = specs
            .iter()
            .filter(|spec| !spec.is_comment())
            .map(|spec| spec.as_str().trim())
            .filter(|fragment| !fragment.is_empty())
            .collect();

        if fragments.is_empty() {
            return Ok(Self::default());
        }

        let regex = RegexBuilder::new(&format!("({})", fragments.join("|")))
            .case_insensitive(true)
            .build()?;

        Ok(Self { regex: Some(regex) })
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    pub fn is_excluded(&self, path: &std::path::Path) -> bool {
        self.regex
            .as_ref()
            .is_some_and(|re| re.is_match(&path.to_string_lossy()))
    }

    /// Remove every excluded path.
    pub fn apply(&self, files: &FileList) -> FileList {
        if self.is_empty() {
            return files.clone();
        }
        let kept: FileList = files
            .iter()
            .filter(|path| !self.is_excluded(path))
            .cloned()
            .collect();
        debug!(input = files.len(), kept = kept.len(), "Applied blacklist pattern");
        kept
    }
}
