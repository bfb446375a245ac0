//! Directory scanning and project record construction.
//!
//! The scanner lists the immediate subdirectories of a root directory and
//! builds one [`ProjectRecord`] per subdirectory, strictly one after another
//! in listing order. Only failures on the root itself are reported; everything
//! that goes wrong inside a subdirectory is absorbed by the probes.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{classifier, manifest, probe, project::ProjectRecord};

/// Directory scanner for sibling project directories.
#[derive(Debug, Default)]
pub struct Scanner {
    /// When `true`, suppresses the progress spinner (used by `--json` mode).
    quiet: bool,
}

impl Scanner {
    /// Create a new scanner that shows a progress spinner on stderr.
    #[must_use]
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Enable or disable quiet mode (suppresses progress spinner).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Scan every immediate subdirectory of `root`.
    ///
    /// Non-directory entries are ignored. The returned records are ordered by
    /// most recent modification first; records with equal times (including
    /// those with no files at all) keep their directory-listing order.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` itself cannot be listed, e.g. because of
    /// missing permissions or because it is not a directory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::path::Path;
    /// # use scan_projects::scanner::Scanner;
    /// let projects = Scanner::new().scan_directory(Path::new("/path/to/projects"))?;
    /// println!("Found {} projects", projects.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ProjectRecord>> {
        let directories = Self::list_subdirectories(root)?;
        info!(
            "Scanning {} subdirectories of {}",
            directories.len(),
            root.display()
        );

        let progress = self.progress_bar(directories.len());

        let mut projects = Vec::with_capacity(directories.len());
        for (index, dir) in directories.iter().enumerate() {
            progress.set_message(format!("Scanning... {}/{}", index + 1, directories.len()));
            projects.push(build_record(dir));
        }

        progress.finish_and_clear();

        projects.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        info!("Scan complete: {} projects", projects.len());
        Ok(projects)
    }

    /// List the immediate subdirectories of `root` in listing order.
    fn list_subdirectories(root: &Path) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                bail!("Permission denied accessing {}", root.display())
            }
            Err(e) => bail!("Failed to read directory {}: {e}", root.display()),
        };

        let mut directories = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_dir() {
                        directories.push(path);
                    }
                }
                Err(e) => debug!("Skipping unreadable entry in {}: {e}", root.display()),
            }
        }

        Ok(directories)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Scanning... 0/{len}"));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Build the record for a single project directory.
///
/// Every probe is attempted exactly once; none of them can fail.
#[must_use]
pub fn build_record(dir: &Path) -> ProjectRecord {
    let name = dir
        .file_name()
        .map_or_else(|| dir.display().to_string(), |n| n.to_string_lossy().into_owned());

    ProjectRecord {
        name,
        path: dir.to_path_buf(),
        last_modified: probe::latest_modification_time(dir),
        is_git: probe::is_version_controlled(dir),
        python_version: manifest::read_python_version(dir),
        environment: classifier::build_environment_info(dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Marker;
    use filetime::{FileTime, set_file_mtime};
    use tempfile::TempDir;

    fn quiet_scanner() -> Scanner {
        Scanner::new().with_quiet(true)
    }

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_files_at_root_are_not_projects() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("README.md"), "hello");
        create_file(&tmp.path().join("notes.txt"), "hi");
        fs::create_dir(tmp.path().join("only-dir")).unwrap();

        let projects = quiet_scanner().scan_directory(tmp.path()).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "only-dir");
    }

    #[test]
    fn test_empty_root() {
        let tmp = TempDir::new().unwrap();
        let projects = quiet_scanner().scan_directory(tmp.path()).unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(quiet_scanner().scan_directory(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn test_file_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        create_file(&file, "x");

        assert!(quiet_scanner().scan_directory(&file).is_err());
    }

    #[test]
    fn test_sorted_by_most_recent_first() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();

        for (name, mtime) in [("old", 1_000_000), ("newest", 3_000_000), ("middle", 2_000_000)] {
            let file = base.join(name).join("main.py");
            create_file(&file, "print()");
            set_file_mtime(&file, FileTime::from_unix_time(mtime, 0)).unwrap();
        }
        fs::create_dir(base.join("empty")).unwrap();

        let projects = quiet_scanner().scan_directory(base).unwrap();
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["newest", "middle", "old", "empty"]);
        assert!(projects[3].last_modified.is_none());
    }

    #[test]
    fn test_build_record_collects_everything() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("svc");
        create_file(
            &dir.join("pyproject.toml"),
            "[project]\nrequires-python = \">=3.12\"\n",
        );
        create_file(&dir.join("uv.lock"), "");
        fs::create_dir_all(dir.join(".venv")).unwrap();

        let record = build_record(&dir);
        assert_eq!(record.name, "svc");
        assert_eq!(record.path, dir);
        assert_eq!(record.python_version.as_deref(), Some(">=3.12"));
        assert!(record.last_modified.is_some());
        assert!(record.environment.has(Marker::UvLock));
        assert!(record.environment.has(Marker::VirtualEnv));
        assert_eq!(record.label_strings(), vec!["UV Python"]);
    }

    #[test]
    fn test_scan_directory_with_spaces_and_unicode() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("my project").join("package.json"), "{}");
        create_file(&tmp.path().join("プロジェクト").join("pyproject.toml"), "");

        let projects = quiet_scanner().scan_directory(tmp.path()).unwrap();
        let mut names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["my project", "プロジェクト"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_does_not_abort_scan() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        create_file(&locked.join("secret").join("file.txt"), "x");
        fs::set_permissions(locked.join("secret"), fs::Permissions::from_mode(0o000)).unwrap();
        create_file(&tmp.path().join("open").join("file.txt"), "y");

        let projects = quiet_scanner().scan_directory(tmp.path()).unwrap();
        assert_eq!(projects.len(), 2);

        fs::set_permissions(locked.join("secret"), fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_scan_is_repeatable() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("a").join("package.json"), r#"{"name":"a"}"#);
        create_file(&tmp.path().join("b").join("pyproject.toml"), "[tool.poetry]\n");

        let first = quiet_scanner().scan_directory(tmp.path()).unwrap();
        let second = quiet_scanner().scan_directory(tmp.path()).unwrap();

        let summarize = |projects: &[ProjectRecord]| -> Vec<(String, Vec<String>)> {
            let mut rows: Vec<_> = projects
                .iter()
                .map(|p| (p.name.clone(), p.label_strings()))
                .collect();
            rows.sort();
            rows
        };
        assert_eq!(summarize(&first), summarize(&second));
    }
}
