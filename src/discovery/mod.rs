//! Target file selection.
//!
//! This module handles:
//! - Changed-file discovery from list files or `git diff`
//! - Whitelist and blacklist list files
//! - Extension and directory filtering
//! - Composition of the final target list for a check

pub mod blacklist;
pub mod changes;
pub mod file_list;
pub mod filter;
pub mod glob;
pub mod lists;
pub mod targets;

pub use blacklist::BlacklistPattern;
pub use changes::{ChangeKind, ChangeSetResolver, ChangeSource, GitDiff, VcsDiff, VcsError};
pub use file_list::FileList;
pub use filter::{FileFilter, filter};
pub use lists::{ListFileLoader, ListOutcome, ListSpec};
pub use targets::{ScanMode, TargetSetBuilder};
