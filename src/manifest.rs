//! Shallow readers for `pyproject.toml` and `package.json`.
//!
//! These readers extract only the handful of fields the report needs. A
//! missing file, an unreadable file, or malformed content all yield the
//! "absent" answer; the failure is logged at debug level and never surfaced.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::Path,
};

use serde::Deserialize;
use tracing::debug;

use crate::project::{ModuleType, PackageInfo};

/// Key whose value is the supported Python version range.
pub const PYTHON_VERSION_KEY: &str = "requires-python";

/// Substring in `pyproject.toml` that marks a Poetry-managed project.
pub const POETRY_MARKER: &str = "tool.poetry";

/// Dependency name that marks a TypeScript project.
pub const TYPESCRIPT_DEPENDENCY: &str = "typescript";

/// Read the `requires-python` constraint from the `pyproject.toml` in `dir`.
///
/// The file is scanned line by line; the first line mentioning the key wins
/// and its value is everything after the first `=`, with surrounding
/// whitespace and quotes removed.
///
/// # Returns
///
/// - `Some(String)` with the constraint (e.g. `">=3.10"`)
/// - `None` if the file is missing, unreadable, or has no such line
#[must_use]
pub fn read_python_version(dir: &Path) -> Option<String> {
    let pyproject = dir.join("pyproject.toml");
    if !pyproject.exists() {
        return None;
    }

    let file = match File::open(&pyproject) {
        Ok(file) => file,
        Err(e) => {
            debug!("Error reading {}: {e}", pyproject.display());
            return None;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!("Error reading {}: {e}", pyproject.display());
                return None;
            }
        };

        if line.contains(PYTHON_VERSION_KEY) {
            return parse_assignment_value(&line);
        }
    }

    None
}

/// Extract the value of a `key = "value"` line. An empty value is absent.
fn parse_assignment_value(line: &str) -> Option<String> {
    let (_, value) = line.split_once('=')?;
    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');

    (!value.is_empty()).then(|| value.to_string())
}

/// Check whether the `pyproject.toml` in `dir` configures Poetry.
#[must_use]
pub fn uses_poetry(dir: &Path) -> bool {
    let pyproject = dir.join("pyproject.toml");
    if !pyproject.exists() {
        return false;
    }

    match fs::read_to_string(&pyproject) {
        Ok(content) => content.contains(POETRY_MARKER),
        Err(e) => {
            debug!("Error reading {}: {e}", pyproject.display());
            false
        }
    }
}

/// The subset of `package.json` we care about.
///
/// Fields with an unexpected JSON type make the whole manifest invalid.
#[derive(Deserialize, Default)]
#[serde(default)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    #[serde(rename = "type")]
    module_type: Option<String>,
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

impl From<PackageJson> for PackageInfo {
    fn from(package: PackageJson) -> Self {
        let has_typescript = package.dependencies.contains_key(TYPESCRIPT_DEPENDENCY)
            || package.dev_dependencies.contains_key(TYPESCRIPT_DEPENDENCY);

        Self {
            module_type: ModuleType::from_field(package.module_type.as_deref()),
            name: package.name,
            version: package.version,
            has_typescript,
        }
    }
}

/// Parse the `package.json` in `dir`.
///
/// # Returns
///
/// - `Some(PackageInfo)` if the file exists and is a valid JSON object
/// - `None` if the file is missing, unreadable, or malformed
#[must_use]
pub fn read_package_json(dir: &Path) -> Option<PackageInfo> {
    let package_json = dir.join("package.json");
    if !package_json.exists() {
        return None;
    }

    let content = match fs::read_to_string(&package_json) {
        Ok(content) => content,
        Err(e) => {
            debug!("Error reading {}: {e}", package_json.display());
            return None;
        }
    };

    match parse_package_json(&content) {
        Ok(info) => Some(info),
        Err(e) => {
            debug!("Error parsing {}: {e}", package_json.display());
            None
        }
    }
}

/// Parse `package.json` content into [`PackageInfo`].
fn parse_package_json(content: &str) -> serde_json::Result<PackageInfo> {
    serde_json::from_str::<PackageJson>(content).map(PackageInfo::from)
}
