//! Filesystem probes for a single project directory.
//!
//! Each function here answers one yes/no or value question about a directory:
//! whether a marker exists, whether the directory is a git working tree, and
//! when anything beneath it was last touched. Probes never fail; unreadable
//! entries and missing tools are reported as "absent" and logged at debug level.

use std::{
    fs,
    path::Path,
    process::{Command, Stdio},
    time::SystemTime,
};

use chrono::{DateTime, Local};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Name of the version control executable queried by [`is_version_controlled`].
pub const GIT_PROGRAM: &str = "git";

/// Return the most recent modification time of any file under `path`.
///
/// Walks the whole subtree without following symlinked directories. Entries
/// that cannot be read (permission denied, vanished files, broken symlinks)
/// are skipped and do not influence the result.
///
/// # Returns
///
/// - `Some(DateTime)` with the newest file modification time
/// - `None` if the subtree contains no readable files
#[must_use]
pub fn latest_modification_time(path: &Path) -> Option<DateTime<Local>> {
    let mut latest: Option<SystemTime> = None;

    for entry in WalkDir::new(path) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {e}", path.display());
                continue;
            }
        };

        if let Some(modified) = file_modification_time(&entry) {
            latest = Some(latest.map_or(modified, |current| current.max(modified)));
        }
    }

    latest.map(DateTime::<Local>::from)
}

/// Modification time of a file entry, following symlinks that point at files.
fn file_modification_time(entry: &DirEntry) -> Option<SystemTime> {
    let file_type = entry.file_type();

    let metadata = if file_type.is_file() {
        entry.metadata().ok()?
    } else if file_type.is_symlink() {
        // Broken links and links to directories don't count as files.
        let target = fs::metadata(entry.path()).ok()?;
        if !target.is_file() {
            return None;
        }
        target
    } else {
        return None;
    };

    metadata.modified().ok()
}

/// Check whether `path` lies inside a git working tree.
///
/// Runs `git rev-parse --is-inside-work-tree` from `path`. A missing `git`
/// executable or a non-zero exit status both mean "not version controlled".
#[must_use]
pub fn is_version_controlled(path: &Path) -> bool {
    is_working_tree_with(GIT_PROGRAM, path)
}

/// Same as [`is_version_controlled`] but with an explicit executable name.
#[must_use]
pub fn is_working_tree_with(program: &str, path: &Path) -> bool {
    let status = Command::new(program)
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) => status.success(),
        Err(e) => {
            debug!("Could not run {program} in {}: {e}", path.display());
            false
        }
    }
}

/// Check whether `path` exists (file, directory, or anything else).
#[must_use]
pub fn path_exists(path: &Path) -> bool {
    let exists = path.exists();
    trace!("probe {} -> {exists}", path.display());
    exists
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{FileTime, set_file_mtime};
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_latest_modification_time_empty_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(latest_modification_time(tmp.path()).is_none());
    }

    #[test]
    fn test_latest_modification_time_only_subdirs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a").join("b")).unwrap();

        assert!(latest_modification_time(tmp.path()).is_none());
    }

    #[test]
    fn test_latest_modification_time_picks_newest_nested_file() {
        let tmp = TempDir::new().unwrap();
        let old = tmp.path().join("old.txt");
        let new = tmp.path().join("deep").join("nested").join("new.txt");
        create_file(&old, "old");
        create_file(&new, "new");

        set_file_mtime(&old, FileTime::from_unix_time(1_000_000, 0)).unwrap();
        set_file_mtime(&new, FileTime::from_unix_time(2_000_000, 0)).unwrap();

        let latest = latest_modification_time(tmp.path()).unwrap();
        let expected: DateTime<Local> = (UNIX_EPOCH + Duration::from_secs(2_000_000)).into();
        assert_eq!(latest, expected);
    }

    #[test]
    fn test_latest_modification_time_nonexistent_path() {
        let tmp = TempDir::new().unwrap();
        assert!(latest_modification_time(&tmp.path().join("missing")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_latest_modification_time_ignores_broken_symlink() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(tmp.path().join("nowhere"), tmp.path().join("link")).unwrap();

        assert!(latest_modification_time(tmp.path()).is_none());
    }

    #[test]
    fn test_missing_vcs_executable_is_not_a_working_tree() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_working_tree_with(
            "definitely-not-an-installed-vcs-binary",
            tmp.path()
        ));
    }

    #[test]
    fn test_git_working_tree_detection() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        fs::create_dir_all(&repo).unwrap();

        let Ok(init) = Command::new(GIT_PROGRAM)
            .args(["init", "--quiet"])
            .current_dir(&repo)
            .status()
        else {
            return; // git not installed
        };
        if !init.success() {
            return;
        }

        assert!(is_version_controlled(&repo));
    }

    #[test]
    fn test_path_exists() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("uv.lock"), "");
        fs::create_dir(tmp.path().join(".venv")).unwrap();

        assert!(path_exists(&tmp.path().join("uv.lock")));
        assert!(path_exists(&tmp.path().join(".venv")));
        assert!(!path_exists(&tmp.path().join("poetry.lock")));
    }
}
