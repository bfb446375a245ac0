//! Detected ecosystem markers and package metadata for one project directory.

use std::collections::BTreeSet;

use serde::Serialize;

/// A single ecosystem marker found in a project directory.
///
/// Most markers are presence-only files or directories at the project root;
/// [`Marker::PoetryConfig`] is derived from the contents of `pyproject.toml`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// `pyproject.toml`
    PyProject,

    /// `uv.lock`
    UvLock,

    /// `poetry.lock`
    PoetryLock,

    /// `.venv/`
    VirtualEnv,

    /// `pyproject.toml` contains a `tool.poetry` section
    PoetryConfig,

    /// `package.json`
    PackageJson,

    /// `node_modules/`
    NodeModules,

    /// `package-lock.json`
    NpmLock,

    /// `yarn.lock`
    YarnLock,

    /// `pnpm-lock.yaml`
    PnpmLock,
}

impl Marker {
    /// Every presence-only marker together with the root-relative path that reveals it.
    pub const FILES: [(Self, &'static str); 9] = [
        (Self::PyProject, "pyproject.toml"),
        (Self::UvLock, "uv.lock"),
        (Self::PoetryLock, "poetry.lock"),
        (Self::VirtualEnv, ".venv"),
        (Self::PackageJson, "package.json"),
        (Self::NodeModules, "node_modules"),
        (Self::NpmLock, "package-lock.json"),
        (Self::YarnLock, "yarn.lock"),
        (Self::PnpmLock, "pnpm-lock.yaml"),
    ];
}

/// The set of markers detected in a directory.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Markers(BTreeSet<Marker>);

impl Markers {
    /// Build a set from any iterator of markers.
    pub fn new(markers: impl IntoIterator<Item = Marker>) -> Self {
        Self(markers.into_iter().collect())
    }

    /// Add a marker to the set.
    pub fn insert(&mut self, marker: Marker) {
        self.0.insert(marker);
    }

    #[must_use]
    pub fn contains(&self, marker: Marker) -> bool {
        self.0.contains(&marker)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the markers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Marker> for Markers {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// JavaScript module system declared by the `type` field of `package.json`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    /// `"type": "module"` (ECMAScript modules)
    Module,

    /// Anything else, including a missing `type` field
    #[default]
    CommonJs,
}

impl ModuleType {
    /// Interpret the raw `type` field; only the exact value `"module"` selects ESM.
    #[must_use]
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            Some("module") => Self::Module,
            _ => Self::CommonJs,
        }
    }
}

/// Metadata extracted from a successfully parsed `package.json`.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct PackageInfo {
    /// Value of the `name` field, if declared
    pub name: Option<String>,

    /// Value of the `version` field, if declared
    pub version: Option<String>,

    /// Module system from the `type` field
    pub module_type: ModuleType,

    /// Whether `typescript` is listed in `dependencies` or `devDependencies`
    pub has_typescript: bool,
}

/// Everything detected about a project's development environment.
///
/// `package` is `Some` only when `package.json` exists and parsed as valid JSON.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct EnvironmentInfo {
    pub markers: Markers,
    pub package: Option<PackageInfo>,
}

impl EnvironmentInfo {
    #[must_use]
    pub fn has(&self, marker: Marker) -> bool {
        self.markers.contains(marker)
    }

    /// Whether the parsed package manifest declares a TypeScript dependency.
    #[must_use]
    pub fn has_typescript(&self) -> bool {
        self.package.as_ref().is_some_and(|p| p.has_typescript)
    }

    /// Whether the parsed package manifest declares ES modules.
    #[must_use]
    pub fn is_esm(&self) -> bool {
        self.package
            .as_ref()
            .is_some_and(|p| p.module_type == ModuleType::Module)
    }
}
