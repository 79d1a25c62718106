#[cfg(test)]
pub mod fixtures {
    use crate::config::Config;
    use crate::context::SuiteContext;
    use crate::discovery::{VcsDiff, VcsError};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A throw-away project tree using the default suite layout.
    pub struct ProjectFixture {
        dir: TempDir,
        root: PathBuf,
        config: Config,
    }

    impl ProjectFixture {
        pub fn new() -> Self {
            Self::with_config(Config::default())
        }

        pub fn with_config(config: Config) -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path().canonicalize().unwrap();
            Self { dir, root, config }
        }

        /// Canonical project root.
        pub fn root(&self) -> PathBuf {
            self.root.clone()
        }

        pub fn context(&self) -> SuiteContext {
            SuiteContext::new(self.dir.path(), self.config.clone())
        }

        pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
            let path = self.root.join(relative);
            write(&path, content);
            path
        }

        /// Write a list file relative to the suite directory.
        pub fn write_suite_list(&self, relative: &str, lines: &[&str]) -> PathBuf {
            let path = self.root.join(&self.config.suite_dir).join(relative);
            write(&path, &join_lines(lines));
            path
        }

        /// Write a `changed_files*` list into the changed-files `_files` folder.
        pub fn write_changed_list(&self, name: &str, lines: &[&str]) -> PathBuf {
            let base = self
                .config
                .changed_files_dir
                .as_deref()
                .unwrap_or(&self.config.suite_dir);
            let path = self.root.join(base).join("_files").join(name);
            write(&path, &join_lines(lines));
            path
        }
    }

    fn join_lines(lines: &[&str]) -> String {
        let mut content = lines.join("\n");
        content.push('\n');
        content
    }

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// [`VcsDiff`] answering from fixed lists.
    pub struct ScriptedDiff {
        changed: Option<Vec<String>>,
        added: Option<Vec<String>>,
    }

    impl ScriptedDiff {
        pub fn new(changed: &[&str], added: &[&str]) -> Self {
            Self {
                changed: Some(changed.iter().map(|s| s.to_string()).collect()),
                added: Some(added.iter().map(|s| s.to_string()).collect()),
            }
        }

        /// Behaves like a machine without git.
        pub fn failing() -> Self {
            Self {
                changed: None,
                added: None,
            }
        }
    }

    fn answer(files: &Option<Vec<String>>) -> Result<Vec<String>, VcsError> {
        files.clone().ok_or_else(|| {
            VcsError::Unavailable(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "git not installed",
            ))
        })
    }

    impl VcsDiff for ScriptedDiff {
        fn changed_files(&self) -> Result<Vec<String>, VcsError> {
            answer(&self.changed)
        }

        fn added_files(&self) -> Result<Vec<String>, VcsError> {
            answer(&self.added)
        }
    }
}
