//! Configuration layer for livecheck.
//!
//! ## Layers
//! - `types`: Configuration type definitions
//! - `loading`: File loading and validation

mod error;
mod loading;
mod types;

pub use error::ConfigError;
pub use loading::CONFIG_FILE_NAMES;
pub use types::{CheckConfig, CheckScope, Config, ENTRY_PLACEHOLDER};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.suite_dir, "dev/tests/static");
        assert_eq!(config.report_dir, "dev/tests/static/report");
        assert_eq!(config.whitelist, "_files/whitelist/common.txt");
        assert_eq!(config.strict_types_marker, "strict_types=1");
        assert_eq!(config.runtime, "php");
        assert!(!config.full_scan);
        assert!(config.checks.is_empty());
    }

    #[test]
    fn test_load_yaml_with_checks() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".livecheck.yaml"),
            r#"
full_scan: true
checks:
  - name: phpcs
    command: vendor/bin/phpcs
    args: ["--standard=Magento2", "--report-file={report}"]
    report: phpcs_report.txt
    file_types: [php, phtml]
  - name: compatibility
    command: vendor/bin/phpcs
    args: ["--runtime-set", "testVersion", "{test_version}"]
    needs_test_version: true
    skip_if_unavailable: false
  - name: cpd
    command: vendor/bin/phpcpd
    scope: project
    success_codes: [0, 2]
"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(config.full_scan);
        assert_eq!(config.suite_dir, "dev/tests/static");
        assert_eq!(config.checks.len(), 3);

        let phpcs = config.check("phpcs").unwrap();
        assert_eq!(phpcs.scope, CheckScope::Whitelist);
        assert_eq!(phpcs.file_types, vec!["php", "phtml"]);
        assert!(phpcs.skip_if_unavailable);
        assert_eq!(phpcs.success_codes, vec![0]);

        let compatibility = config.check("compatibility").unwrap();
        assert!(compatibility.needs_test_version);
        assert!(!compatibility.skip_if_unavailable);

        let cpd = config.check("cpd").unwrap();
        assert_eq!(cpd.scope, CheckScope::Project);
        assert_eq!(cpd.success_codes, vec![0, 2]);
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("suite.json");
        fs::write(&json, r#"{"suite_dir": "tests/static", "runtime": "php-64bit"}"#).unwrap();
        let config = Config::from_file(&json).unwrap();
        assert_eq!(config.suite_dir, "tests/static");
        assert_eq!(config.runtime, "php-64bit");

        let toml_path = dir.path().join("suite.toml");
        fs::write(
            &toml_path,
            "report_dir = \"build/reports\"\n\n[[checks]]\nname = \"stan\"\ncommand = \"phpstan\"\nscope = \"added\"\n",
        )
        .unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert_eq!(config.report_dir, "build/reports");
        assert_eq!(config.checks[0].scope, CheckScope::Added);
    }

    #[test]
    fn test_project_config_search_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".livecheck.toml"), "runtime = \"from-toml\"\n").unwrap();
        fs::write(dir.path().join(".livecheck.yml"), "runtime: from-yml\n").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.runtime, "from-yml");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".livecheck.yaml"), "checks: [not, a, check]\n").unwrap();

        assert!(matches!(
            Config::load(dir.path()),
            Err(ConfigError::ParseYaml { .. })
        ));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("suite.ini");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::UnsupportedFormat(_, ext)) if ext == "ini"
        ));
    }

    #[test]
    fn test_duplicate_check_names_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("suite.yaml");
        fs::write(
            &path,
            "checks:\n  - {name: a, command: x}\n  - {name: a, command: y}\n",
        )
        .unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("defined more than once"));
    }

    #[test]
    fn test_forward_excludes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("suite.yaml");
        fs::write(
            &path,
            "checks:\n  - name: cpd\n    command: vendor/bin/phpcpd\n    scope: project\n    forward_excludes: _files/phpcpd/blacklist/*.txt\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        let cpd = config.check("cpd").unwrap();
        assert_eq!(cpd.scope, CheckScope::Project);
        assert_eq!(cpd.forward_excludes.as_deref(), Some("_files/phpcpd/blacklist/*.txt"));
        assert_eq!(cpd.exclude_arg, vec!["--exclude", "{entry}"]);
    }

    #[test]
    fn test_exclude_arg_without_entry_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("suite.yaml");
        fs::write(
            &path,
            "checks:\n  - name: cpd\n    command: phpcpd\n    forward_excludes: cpd.txt\n    exclude_arg: [--exclude]\n",
        )
        .unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("exclude_arg must contain {entry}"));
    }

    #[test]
    fn test_empty_command_rejected() {
        let config = Config {
            checks: vec![CheckConfig {
                name: "blank".to_string(),
                command: " ".to_string(),
                args: Vec::new(),
                report: None,
                scope: CheckScope::Whitelist,
                file_types: Vec::new(),
                whitelist: None,
                exclude_list: None,
                exclude_patterns: None,
                forward_excludes: None,
                exclude_arg: vec!["--exclude".to_string(), "{entry}".to_string()],
                needs_test_version: false,
                skip_if_unavailable: true,
                success_codes: vec![0],
            }],
            ..Config::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCheck { .. })
        ));
    }
}
