//! Filesystem glob expansion.
//!
//! Patterns follow shell glob rules: `*` and `?` never cross a `/`, `**`
//! matches any number of directories, `[...]` and `{a,b}` are supported.
//! Both files and directories are returned, in file-name order.

use crate::error::{LiveCheckError, Result};
use globset::GlobBuilder;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Whether a string contains glob metacharacters.
pub fn is_glob(text: &str) -> bool {
    text.contains(GLOB_META)
}

/// Expand a glob pattern against the filesystem.
///
/// A pattern without metacharacters resolves to itself when it exists. A
/// pattern that matches nothing yields an empty vector; only a malformed
/// pattern is an error.
pub fn expand(pattern: &Path) -> Result<Vec<PathBuf>> {
    let mut root = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();

    for component in pattern.components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !is_glob(&text) {
            root.push(component);
        } else {
            rest.push(text.into_owned());
        }
    }

    if rest.is_empty() {
        return Ok(if root.exists() { vec![root] } else { Vec::new() });
    }

    let relative_pattern = rest.join("/");
    let matcher = GlobBuilder::new(&relative_pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| LiveCheckError::InvalidGlob {
            pattern: pattern.display().to_string(),
            source,
        })?
        .compile_matcher();

    let walk_root = if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root.clone()
    };
    if !walk_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(&walk_root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    // The component count is the match depth unless a segment can span
    // several directories.
    if !rest.iter().any(|part| part.contains("**")) && !brace_spans_separator(&relative_pattern) {
        walker = walker.min_depth(rest.len()).max_depth(rest.len());
    }

    let matches = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let relative = e.path().strip_prefix(&walk_root).ok()?.to_path_buf();
            matcher.is_match(&relative).then(|| root.join(relative))
        })
        .collect();

    Ok(matches)
}

/// Whether a `{...}` group contains a `/`, as in `{app,lib/internal}`.
fn brace_spans_separator(pattern: &str) -> bool {
    let mut depth = 0usize;
    for c in pattern.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '/' if depth > 0 => return true,
            _ => {}
        }
    }
    false
}
