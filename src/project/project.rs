//! Core project data structures and types.
//!
//! This module defines the per-directory record produced by the scanner and
//! the human-readable type labels derived from its environment.

use std::{
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

use chrono::{DateTime, Local};
use serde::Serialize;

use super::EnvironmentInfo;

/// How a Python project manages its dependencies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PythonFlavor {
    /// `uv.lock` present
    Uv,

    /// `pyproject.toml` configures Poetry
    Poetry,

    /// Neither of the above
    Plain,
}

/// Language of a Node.js project.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeLanguage {
    JavaScript,
    TypeScript,
}

/// Package manager of a Node.js project, chosen from its lockfile.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl Display for PackageManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        };
        f.write_str(name)
    }
}

/// One ecosystem classification attached to a project.
///
/// A directory can carry a Python label and a Node.js label at the same time;
/// [`ProjectLabel::Unknown`] only appears on its own.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectLabel {
    Python(PythonFlavor),
    Node {
        language: NodeLanguage,
        manager: PackageManager,
    },
    Unknown,
}

impl Display for ProjectLabel {
    /// Render the label as shown in reports.
    ///
    /// # Examples
    ///
    /// - `UV Python`, `Poetry Python`, `Python`
    /// - `TypeScript (pnpm)`, `JavaScript (npm)`
    /// - `Unknown`
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Python(PythonFlavor::Uv) => f.write_str("UV Python"),
            Self::Python(PythonFlavor::Poetry) => f.write_str("Poetry Python"),
            Self::Python(PythonFlavor::Plain) => f.write_str("Python"),
            Self::Node { language, manager } => {
                let language = match language {
                    NodeLanguage::JavaScript => "JavaScript",
                    NodeLanguage::TypeScript => "TypeScript",
                };
                write!(f, "{language} ({manager})")
            }
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Everything known about one immediate subdirectory of the scan root.
///
/// Serialized through [`crate::output::JsonProjectEntry`].
#[derive(Clone, Debug)]
pub struct ProjectRecord {
    /// Base name of the directory
    pub name: String,

    /// Path to the directory, joined onto the scan root as given
    pub path: PathBuf,

    /// Newest file modification time in the subtree; `None` if no readable files
    pub last_modified: Option<DateTime<Local>>,

    /// Whether the directory is inside a git working tree
    pub is_git: bool,

    /// `requires-python` constraint from `pyproject.toml`, if declared
    pub python_version: Option<String>,

    /// Detected markers and package metadata
    pub environment: EnvironmentInfo,
}

impl ProjectRecord {
    /// Derive the type labels for this project. Never empty.
    #[must_use]
    pub fn labels(&self) -> Vec<ProjectLabel> {
        crate::classifier::classify(&self.environment)
    }

    /// The labels rendered as strings, in classification order.
    #[must_use]
    pub fn label_strings(&self) -> Vec<String> {
        self.labels().iter().map(ToString::to_string).collect()
    }
}

impl Display for ProjectRecord {
    /// Format the project as `name (path)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}
