//! Configuration loading functions.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::error::ConfigError;
use super::types::{Config, ENTRY_PLACEHOLDER};

/// Project-level config file names, in search order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".livecheck.yaml",
    ".livecheck.yml",
    ".livecheck.json",
    ".livecheck.toml",
];

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let config: Config = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.display().to_string(),
                source: e,
            })?,
            "json" => serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
                path: path.display().to_string(),
                source: e,
            })?,
            "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseToml {
                path: path.display().to_string(),
                source: e,
            })?,
            _ => {
                return Err(ConfigError::UnsupportedFormat(
                    path.display().to_string(),
                    ext,
                ));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the project directory or global config.
    ///
    /// Search order:
    /// 1. `.livecheck.yaml` / `.yml` / `.json` / `.toml` in project root
    /// 2. `~/.config/livecheck/config.yaml`
    /// 3. Default configuration
    ///
    /// A config file that exists but cannot be parsed is an error.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        for filename in CONFIG_FILE_NAMES {
            let path = project_root.join(filename);
            if path.exists() {
                debug!(path = %path.display(), "Loading project config");
                return Self::from_file(&path);
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let global_config = config_dir.join("livecheck").join("config.yaml");
            if global_config.exists() {
                debug!(path = %global_config.display(), "Loading global config");
                return Self::from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Reject check definitions that cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for check in &self.checks {
            let invalid = |reason: &str| ConfigError::InvalidCheck {
                name: check.name.clone(),
                reason: reason.to_string(),
            };
            if check.name.trim().is_empty() {
                return Err(invalid("name must not be empty"));
            }
            if check.command.trim().is_empty() {
                return Err(invalid("command must not be empty"));
            }
            if !names.insert(check.name.as_str()) {
                return Err(invalid("defined more than once"));
            }
            if check.success_codes.is_empty() {
                return Err(invalid("success_codes must not be empty"));
            }
            if check.forward_excludes.is_some()
                && !check.exclude_arg.iter().any(|a| a.contains(ENTRY_PLACEHOLDER))
            {
                return Err(invalid("exclude_arg must contain {entry}"));
            }
        }
        Ok(())
    }
}
