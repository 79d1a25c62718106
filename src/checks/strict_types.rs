//! Strict type declaration check for newly added files.

use crate::discovery::FileList;
use crate::error::{IoOperation, LiveCheckError, Result};
use std::fs;
use std::path::PathBuf;

pub const STRICT_TYPES_CHECK: &str = "strict-types";

/// File types the declaration is required in.
pub const STRICT_TYPES_FILE_TYPES: &[&str] = &["php"];

/// Files whose contents do not contain `marker`.
pub fn missing_declaration(files: &FileList, marker: &str) -> Result<Vec<PathBuf>> {
    let mut missing = Vec::new();
    for file in files {
        let content =
            fs::read(file).map_err(|e| LiveCheckError::io(file, IoOperation::Read, e))?;
        if !String::from_utf8_lossy(&content).contains(marker) {
            missing.push(file.clone());
        }
    }
    Ok(missing)
}

pub fn failure_message(missing: &[PathBuf]) -> String {
    let mut message = String::from("Following files are missing strict type declaration:");
    for file in missing {
        message.push('\n');
        message.push_str(&file.display().to_string());
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detects_files_without_marker() {
        let dir = TempDir::new().unwrap();
        let strict = dir.path().join("Strict.php");
        let loose = dir.path().join("Loose.php");
        fs::write(&strict, "<?php\ndeclare(strict_types=1);\n\nclass Strict {}\n").unwrap();
        fs::write(&loose, "<?php\n\nclass Loose {}\n").unwrap();

        let files: FileList = [strict, loose.clone()].into_iter().collect();
        let missing = missing_declaration(&files, "strict_types=1").unwrap();

        assert_eq!(missing, vec![loose]);
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let dir = TempDir::new().unwrap();
        let files: FileList = [dir.path().join("vanished.php")].into_iter().collect();

        assert!(matches!(
            missing_declaration(&files, "strict_types=1"),
            Err(LiveCheckError::Io { .. })
        ));
    }

    #[test]
    fn test_failure_message_lists_files() {
        let message = failure_message(&[PathBuf::from("/p/A.php"), PathBuf::from("/p/B.php")]);
        assert_eq!(
            message,
            "Following files are missing strict type declaration:\n/p/A.php\n/p/B.php"
        );
    }
}
