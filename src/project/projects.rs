//! Collection management and text rendering for project records.
//!
//! This module provides the `Projects` struct which wraps the filtered,
//! sorted records and renders them as the human-readable report.

use chrono::{DateTime, Local};
use colored::Colorize;

use crate::stats::ProjectStatistics;
use crate::utils::format_time_ago;

use super::{Marker, ProjectRecord};

const RULE_WIDTH: usize = 70;

/// A collection of project records with reporting operations.
#[derive(Debug, Default)]
pub struct Projects(Vec<ProjectRecord>);

impl From<Vec<ProjectRecord>> for Projects {
    fn from(projects: Vec<ProjectRecord>) -> Self {
        Self(projects)
    }
}

impl Projects {
    /// Get the number of projects in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a slice of the underlying project collection.
    #[must_use]
    pub fn as_slice(&self) -> &[ProjectRecord] {
        &self.0
    }

    /// Compute aggregate statistics over the collection.
    #[must_use]
    pub fn statistics(&self) -> ProjectStatistics {
        ProjectStatistics::from_projects(&self.0)
    }

    /// Render the full text report: the project listing followed by statistics.
    ///
    /// An empty collection renders as `No projects found.` with no statistics.
    ///
    /// # Output Format
    ///
    /// ```text
    /// Recent Projects:
    /// ----------------------------------------------------------------------
    /// api [Git] [UV Python]
    /// Environment: [pyproject.toml, uv.lock, .venv] [Python >=3.12]
    /// Last modified: 2 hours ago
    /// Path: /home/me/Projects/api
    /// ----------------------------------------------------------------------
    ///
    /// Project Statistics:
    /// ...
    /// ```
    #[must_use]
    pub fn render(&self, now: DateTime<Local>) -> String {
        if self.is_empty() {
            return "No projects found.\n".to_string();
        }

        let rule = "-".repeat(RULE_WIDTH);
        let mut out = format!("{}\n{rule}\n", "Recent Projects:".bold());

        for project in &self.0 {
            out.push_str(&render_project(project, now));
            out.push_str(&rule);
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.statistics().to_string());
        out
    }
}

/// Render one project block (without the trailing separator rule).
#[must_use]
pub fn render_project(project: &ProjectRecord, now: DateTime<Local>) -> String {
    let git_status = if project.is_git {
        "[Git]".green()
    } else {
        "[No Git]".dimmed()
    };
    let types = format!("[{}]", project.label_strings().join(", ")).cyan();

    let markers = environment_markers(project);
    let env_str = if markers.is_empty() {
        "[No Package Manager]".to_string()
    } else {
        format!("[{}]", markers.join(", "))
    };
    let python_ver = project
        .python_version
        .as_deref()
        .filter(|v| !v.is_empty())
        .map_or_else(String::new, |v| format!(" [Python {v}]"));

    format!(
        "{} {git_status} {types}\nEnvironment: {env_str}{python_ver}\nLast modified: {}\nPath: {}\n",
        project.name.bold(),
        format_time_ago(project.last_modified, now),
        project.path.display(),
    )
}

/// The environment markers shown on the `Environment:` line, in display order.
fn environment_markers(project: &ProjectRecord) -> Vec<&'static str> {
    let env = &project.environment;

    let mut markers = Vec::new();
    if env.has(Marker::PyProject) {
        markers.push("pyproject.toml");
    }
    if env.has(Marker::UvLock) {
        markers.push("uv.lock");
    }
    if env.has(Marker::VirtualEnv) {
        markers.push(".venv");
    }
    if env.is_esm() {
        markers.push("ESM");
    }
    if env.has_typescript() {
        markers.push("TypeScript");
    }
    markers
}
