//! Target runtime versions from a dependency manifest.
//!
//! A constraint such as `^7.4||^8.1` is reduced to the lowest and highest
//! `major.minor` it allows. Wildcard segments sort last.

use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const ALTERNATIVE_SEPARATOR: &str = "||";
const WILDCARD_SENTINEL: &str = "999";

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Failed to read manifest {path}: {source}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    ParseManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No supported '{runtime}' versions declared in {manifest}")]
    MissingConstraint { manifest: PathBuf, runtime: String },
}

/// Lowest and, when several alternatives exist, highest target version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRange {
    pub min: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl VersionRange {
    /// Parse a raw constraint. Returns `None` when it names no version.
    pub fn parse(constraint: &str) -> Option<Self> {
        let mut versions: Vec<String> = constraint
            .split(ALTERNATIVE_SEPARATOR)
            .map(normalize_alternative)
            .filter(|v| !v.is_empty())
            .collect();

        if versions.is_empty() {
            return None;
        }

        versions.sort_by(|a, b| compare_versions(a, b));

        let min = major_minor(&versions[0]);
        let max = (versions.len() > 1).then(|| major_minor(&versions[versions.len() - 1]));
        Some(Self { min, max })
    }

    /// Read `require.<runtime>` from a JSON manifest such as `composer.json`.
    ///
    /// A missing or empty constraint is an error: without it the
    /// compatibility check has nothing to check against.
    pub fn from_manifest(path: &Path, runtime: &str) -> Result<Self, VersionError> {
        let content = fs::read_to_string(path).map_err(|e| VersionError::ReadManifest {
            path: path.to_path_buf(),
            source: e,
        })?;
        let manifest: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| VersionError::ParseManifest {
                path: path.to_path_buf(),
                source: e,
            })?;

        let missing = || VersionError::MissingConstraint {
            manifest: path.to_path_buf(),
            runtime: runtime.to_string(),
        };

        let constraint = manifest
            .get("require")
            .and_then(|require| require.get(runtime))
            .and_then(|value| value.as_str())
            .ok_or_else(missing)?;

        let range = Self::parse(constraint).ok_or_else(missing)?;
        debug!(constraint, ?range, "Resolved target versions");
        Ok(range)
    }

    /// `min-max` for a range, `min` for a single version.
    pub fn test_version(&self) -> String {
        match &self.max {
            Some(max) => format!("{}-{}", self.min, max),
            None => self.min.clone(),
        }
    }
}

impl std::fmt::Display for VersionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.test_version())
    }
}

fn normalize_alternative(alternative: &str) -> String {
    alternative
        .trim()
        .trim_start_matches(['^', '~'])
        .trim()
        .replace('*', WILDCARD_SENTINEL)
}

/// Dot-separated numeric comparison. Non-numeric segments count as 0,
/// segments too large for `u64` saturate, and a version that is a prefix of
/// another sorts first.
fn compare_versions(a: &str, b: &str) -> Ordering {
    fn segments(version: &str) -> Vec<u64> {
        version
            .split('.')
            .map(|segment| {
                let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    0
                } else {
                    // only overflow can fail on a non-empty digit run
                    digits.parse().unwrap_or(u64::MAX)
                }
            })
            .collect()
    }
    segments(a).cmp(&segments(b))
}

fn major_minor(version: &str) -> String {
    let mut parts = version.split('.');
    let major = parts.next().unwrap_or("0");
    let minor = parts.next().filter(|m| !m.is_empty()).unwrap_or("0");
    format!("{major}.{minor}")
}
