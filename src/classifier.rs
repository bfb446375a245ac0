//! Project classification.
//!
//! [`build_environment_info`] probes a directory for every known marker and
//! reads its manifests; [`classify`] turns the result into type labels.
//!
//! Python and Node.js are classified independently, so a directory with both
//! `pyproject.toml` and `package.json` carries two labels:
//!
//! | Condition | Label |
//! |---|---|
//! | `pyproject.toml` or `.venv/`, with `uv.lock` | `UV Python` |
//! | ... otherwise, with `tool.poetry` in `pyproject.toml` | `Poetry Python` |
//! | ... otherwise | `Python` |
//! | `package.json` | `<TypeScript\|JavaScript> (<yarn\|pnpm\|npm>)` |
//! | none of the above | `Unknown` |

use std::path::Path;

use tracing::trace;

use crate::{
    manifest, probe,
    project::{
        EnvironmentInfo, Marker, Markers, NodeLanguage, PackageManager, ProjectLabel,
        PythonFlavor,
    },
};

/// Probe `dir` for every marker and parse its manifests.
#[must_use]
pub fn build_environment_info(dir: &Path) -> EnvironmentInfo {
    let mut markers: Markers = Marker::FILES
        .iter()
        .filter(|(_, file)| probe::path_exists(&dir.join(file)))
        .map(|(marker, _)| *marker)
        .collect();

    if manifest::uses_poetry(dir) {
        markers.insert(Marker::PoetryConfig);
    }

    let package = if markers.contains(Marker::PackageJson) {
        manifest::read_package_json(dir)
    } else {
        None
    };

    trace!("{}: {markers:?}", dir.display());

    EnvironmentInfo { markers, package }
}

/// Derive the ordered list of type labels for an environment.
///
/// The Python label (if any) comes first, then the Node.js label (if any).
/// When neither applies the result is `[ProjectLabel::Unknown]`.
#[must_use]
pub fn classify(env: &EnvironmentInfo) -> Vec<ProjectLabel> {
    let labels: Vec<ProjectLabel> = [python_label(env), node_label(env)]
        .into_iter()
        .flatten()
        .collect();

    if labels.is_empty() {
        vec![ProjectLabel::Unknown]
    } else {
        labels
    }
}

fn python_label(env: &EnvironmentInfo) -> Option<ProjectLabel> {
    if !env.has(Marker::PyProject) && !env.has(Marker::VirtualEnv) {
        return None;
    }

    let flavor = if env.has(Marker::UvLock) {
        PythonFlavor::Uv
    } else if env.has(Marker::PoetryConfig) {
        PythonFlavor::Poetry
    } else {
        PythonFlavor::Plain
    };

    Some(ProjectLabel::Python(flavor))
}

fn node_label(env: &EnvironmentInfo) -> Option<ProjectLabel> {
    if !env.has(Marker::PackageJson) {
        return None;
    }

    let language = if env.has_typescript() {
        NodeLanguage::TypeScript
    } else {
        NodeLanguage::JavaScript
    };

    // yarn.lock wins over pnpm-lock.yaml; npm is the fallback.
    let manager = if env.has(Marker::YarnLock) {
        PackageManager::Yarn
    } else if env.has(Marker::PnpmLock) {
        PackageManager::Pnpm
    } else {
        PackageManager::Npm
    };

    Some(ProjectLabel::Node { language, manager })
}
