//! Filtering configuration for project selection.
//!
//! This module defines the filter flags, sorting criteria and result cap used
//! to decide which scanned projects appear in the report and in what order.

use clap::ValueEnum;

/// Configuration for project filtering criteria.
///
/// Every enabled flag must hold for a project to be kept (logical AND).
/// With no flag enabled, every project is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FilterOptions {
    /// Keep only projects with a `uv.lock`
    pub uv_only: bool,

    /// Keep only projects whose `pyproject.toml` configures Poetry
    pub poetry_only: bool,

    /// Keep only projects with a `package.json`
    pub node_only: bool,

    /// Keep only projects that declare a TypeScript dependency
    pub typescript_only: bool,

    /// Keep only projects inside a git working tree
    pub git_only: bool,

    /// Keep at most this many projects, after sorting
    pub limit: Option<usize>,
}

/// Enumeration of supported sorting criteria for project output.
///
/// - `Date`: most recently modified first (the scan order)
/// - `Name`: alphabetical, case-insensitive
/// - `Python`: by `requires-python` constraint, projects without one first, then by name
/// - `Type`: by rendered type labels
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum SortCriteria {
    /// Sort by last modification time (newest first)
    #[default]
    Date,

    /// Sort by project name alphabetically
    Name,

    /// Sort by Python version constraint, then name
    Python,

    /// Sort by project type labels
    Type,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_options_default_keeps_everything() {
        let opts = FilterOptions::default();

        assert!(!opts.uv_only);
        assert!(!opts.poetry_only);
        assert!(!opts.node_only);
        assert!(!opts.typescript_only);
        assert!(!opts.git_only);
        assert!(opts.limit.is_none());
    }

    #[test]
    fn test_sort_criteria_default() {
        assert_eq!(SortCriteria::default(), SortCriteria::Date);
    }

    #[test]
    fn test_sort_criteria_from_str() {
        assert_eq!(
            SortCriteria::from_str("python", true).unwrap(),
            SortCriteria::Python
        );
        assert_eq!(SortCriteria::from_str("TYPE", true).unwrap(), SortCriteria::Type);
        assert!(SortCriteria::from_str("size", true).is_err());
    }
}
