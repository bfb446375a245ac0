//! Project records and their collection.
//!
//! ## Main Parts
//!
//! - [`ProjectRecord`] - One scanned subdirectory with its probe results
//! - [`EnvironmentInfo`] - Detected [`Markers`] plus optional [`PackageInfo`]
//! - [`ProjectLabel`] - Human-readable ecosystem classification
//! - [`Projects`] - The filtered collection that gets reported

pub mod environment;
#[allow(clippy::module_inception)]
// This is acceptable as it is the main module for project records
pub mod project;
pub mod projects;

pub use environment::{EnvironmentInfo, Marker, Markers, ModuleType, PackageInfo};
pub use project::{NodeLanguage, PackageManager, ProjectLabel, ProjectRecord, PythonFlavor};
pub use projects::Projects;
