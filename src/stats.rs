//! Aggregate statistics over the reported projects.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use serde::Serialize;

use crate::project::{Marker, ProjectRecord};

const RULE_WIDTH: usize = 70;

/// Counts of projects per lockfile-identified package manager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PackageManagerCounts {
    /// Projects with `package-lock.json`
    pub npm: usize,

    /// Projects with `yarn.lock`
    pub yarn: usize,

    /// Projects with `pnpm-lock.yaml`
    pub pnpm: usize,
}

/// Summary of a set of projects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStatistics {
    pub total: usize,
    pub git_repos: usize,

    /// Number of projects per declared `requires-python` constraint, keyed in
    /// lexical order
    pub python_versions: BTreeMap<String, usize>,

    /// Projects with `uv.lock`
    pub uv_managed: usize,

    /// Projects whose `pyproject.toml` configures Poetry
    pub poetry_managed: usize,

    /// Projects with `package.json`
    pub node_projects: usize,

    /// Projects declaring a TypeScript dependency
    pub typescript_projects: usize,

    pub package_managers: PackageManagerCounts,
}

impl ProjectStatistics {
    /// Compute statistics from a slice of projects.
    #[must_use]
    pub fn from_projects(projects: &[ProjectRecord]) -> Self {
        let count = |pred: fn(&ProjectRecord) -> bool| projects.iter().filter(|p| pred(p)).count();
        let count_marker =
            |marker: Marker| projects.iter().filter(|p| p.environment.has(marker)).count();

        let mut python_versions = BTreeMap::new();
        for version in projects.iter().filter_map(|p| p.python_version.as_deref()) {
            if !version.is_empty() {
                *python_versions.entry(version.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            total: projects.len(),
            git_repos: count(|p| p.is_git),
            python_versions,
            uv_managed: count_marker(Marker::UvLock),
            poetry_managed: count_marker(Marker::PoetryConfig),
            node_projects: count_marker(Marker::PackageJson),
            typescript_projects: count(|p| p.environment.has_typescript()),
            package_managers: PackageManagerCounts {
                npm: count_marker(Marker::NpmLock),
                yarn: count_marker(Marker::YarnLock),
                pnpm: count_marker(Marker::PnpmLock),
            },
        }
    }
}

impl Display for ProjectStatistics {
    /// Render the statistics block printed after the project listing.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Project Statistics:")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(f, "Total projects: {}", self.total)?;
        writeln!(f, "Git repositories: {}", self.git_repos)?;

        writeln!(f, "\nPython Projects:")?;
        writeln!(f, "  UV-managed: {}", self.uv_managed)?;
        writeln!(f, "  Poetry-managed: {}", self.poetry_managed)?;

        writeln!(f, "\nNode.js Projects:")?;
        writeln!(f, "  Total Node.js projects: {}", self.node_projects)?;
        writeln!(f, "  TypeScript projects: {}", self.typescript_projects)?;
        writeln!(f, "  Package Managers:")?;
        writeln!(f, "    npm: {}", self.package_managers.npm)?;
        writeln!(f, "    yarn: {}", self.package_managers.yarn)?;
        writeln!(f, "    pnpm: {}", self.package_managers.pnpm)?;

        if !self.python_versions.is_empty() {
            writeln!(f, "\nPython versions used:")?;
            for (version, count) in &self.python_versions {
                writeln!(f, "  Python {version}: {count} projects")?;
            }
        }

        Ok(())
    }
}
