//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, the report is serialized to stdout as a
//! single JSON object, replacing all human-readable output.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::project::{Marker, PackageInfo, ProjectRecord};
use crate::stats::ProjectStatistics;
use crate::utils::format_time_ago;

/// Top-level JSON output emitted when `--json` is active.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// The directory that was scanned.
    pub root: String,

    /// Projects that survived filtering, in report order.
    pub projects: Vec<JsonProjectEntry>,

    /// Statistics over the reported projects.
    pub summary: ProjectStatistics,
}

/// A single project entry in the JSON output.
#[derive(Debug, Serialize)]
pub struct JsonProjectEntry {
    pub name: String,
    pub path: String,

    /// RFC 3339 timestamp of the newest file, or `null` when there is none.
    pub last_modified: Option<String>,

    /// Seconds since the epoch, `0` when the project contains no files.
    pub last_modified_epoch: i64,

    /// Relative time as shown in the text report (e.g. `"3 days ago"`).
    pub last_modified_ago: String,

    pub is_git: bool,
    pub python_version: Option<String>,

    /// Rendered type labels (e.g. `["UV Python", "TypeScript (pnpm)"]`).
    pub types: Vec<String>,

    pub markers: Vec<Marker>,
    pub package: Option<PackageInfo>,
}

impl JsonOutput {
    /// Build the JSON report for the scanned root and its selected projects.
    #[must_use]
    pub fn from_projects(root: &str, projects: &[ProjectRecord], now: DateTime<Local>) -> Self {
        Self {
            root: root.to_string(),
            projects: projects
                .iter()
                .map(|p| JsonProjectEntry::from_project(p, now))
                .collect(),
            summary: ProjectStatistics::from_projects(projects),
        }
    }
}

impl JsonProjectEntry {
    /// Convert a `ProjectRecord` into a `JsonProjectEntry`.
    #[must_use]
    pub fn from_project(project: &ProjectRecord, now: DateTime<Local>) -> Self {
        Self {
            name: project.name.clone(),
            path: project.path.display().to_string(),
            last_modified: project.last_modified.map(|t| t.to_rfc3339()),
            last_modified_epoch: project.last_modified.map_or(0, |t| t.timestamp()),
            last_modified_ago: format_time_ago(project.last_modified, now),
            is_git: project.is_git,
            python_version: project.python_version.clone(),
            types: project.label_strings(),
            markers: project.environment.markers.iter().collect(),
            package: project.environment.package.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{EnvironmentInfo, Markers, ModuleType};
    use chrono::{Duration, TimeZone};
    use std::path::PathBuf;

    fn create_test_record() -> ProjectRecord {
        ProjectRecord {
            name: "web".to_string(),
            path: PathBuf::from("/projects/web"),
            last_modified: None,
            is_git: true,
            python_version: None,
            environment: EnvironmentInfo {
                markers: Markers::new([Marker::PackageJson, Marker::YarnLock]),
                package: Some(PackageInfo {
                    name: Some("web".to_string()),
                    version: Some("1.0.0".to_string()),
                    module_type: ModuleType::Module,
                    has_typescript: true,
                }),
            },
        }
    }

    #[test]
    fn test_entry_without_timestamp() {
        let entry = JsonProjectEntry::from_project(&create_test_record(), Local::now());
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["name"], "web");
        assert_eq!(value["path"], "/projects/web");
        assert!(value["last_modified"].is_null());
        assert_eq!(value["last_modified_epoch"], 0);
        assert_eq!(value["last_modified_ago"], "Never modified");
        assert_eq!(value["is_git"], true);
        assert!(value["python_version"].is_null());
        assert_eq!(value["types"], serde_json::json!(["TypeScript (yarn)"]));
        assert_eq!(value["markers"], serde_json::json!(["package_json", "yarn_lock"]));
        assert_eq!(value["package"]["module_type"], "module");
        assert_eq!(value["package"]["has_typescript"], true);
    }

    #[test]
    fn test_entry_with_timestamp() {
        let modified = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut record = create_test_record();
        record.last_modified = Some(modified);

        let entry = JsonProjectEntry::from_project(&record, modified + Duration::days(3));
        assert_eq!(entry.last_modified_epoch, 1_700_000_000);
        assert_eq!(entry.last_modified.as_deref(), Some(modified.to_rfc3339().as_str()));
        assert_eq!(entry.last_modified_ago, "3 days ago");
    }

    #[test]
    fn test_output_shape() {
        let output = JsonOutput::from_projects("/projects", &[create_test_record()], Local::now());
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["root"], "/projects");
        assert_eq!(value["projects"].as_array().unwrap().len(), 1);
        assert_eq!(value["summary"]["total"], 1);
        assert_eq!(value["summary"]["node_projects"], 1);
        assert_eq!(value["summary"]["package_managers"]["yarn"], 1);
    }

    #[test]
    fn test_empty_output() {
        let output = JsonOutput::from_projects("/projects", &[], Local::now());
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["projects"], serde_json::json!([]));
        assert_eq!(value["summary"]["total"], 0);
    }
}
