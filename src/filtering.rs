//! Project filtering, sorting and truncation.
//!
//! The report pipeline is: filter (all enabled predicates must hold), then
//! sort, then cap the number of records.

use crate::config::{FilterOptions, SortCriteria};
use crate::project::{Marker, ProjectRecord};

/// Keep only the projects that satisfy every enabled filter flag.
///
/// The relative order of the surviving projects is preserved.
///
/// # Examples
///
/// ```no_run
/// # use scan_projects::{filtering::filter_projects, config::FilterOptions, project::ProjectRecord};
/// # fn example(projects: Vec<ProjectRecord>) {
/// let filter_opts = FilterOptions {
///     git_only: true,
///     ..FilterOptions::default()
/// };
/// let git_projects = filter_projects(projects, &filter_opts);
/// # }
/// ```
#[must_use]
pub fn filter_projects(
    projects: Vec<ProjectRecord>,
    filter_opts: &FilterOptions,
) -> Vec<ProjectRecord> {
    projects
        .into_iter()
        .filter(|project| matches_filters(project, filter_opts))
        .collect()
}

/// Check a single project against all enabled filter flags.
fn matches_filters(project: &ProjectRecord, opts: &FilterOptions) -> bool {
    let env = &project.environment;

    (!opts.uv_only || env.has(Marker::UvLock))
        && (!opts.poetry_only || env.has(Marker::PoetryConfig))
        && (!opts.node_only || env.has(Marker::PackageJson))
        && (!opts.typescript_only || env.has_typescript())
        && (!opts.git_only || project.is_git)
}

/// Sort projects in place according to the given criterion.
///
/// `Date` leaves the list untouched, since the scanner already returns it
/// newest first. All sorts are stable.
pub fn sort_projects(projects: &mut [ProjectRecord], criteria: SortCriteria) {
    match criteria {
        SortCriteria::Date => {}
        SortCriteria::Name => {
            projects.sort_by_cached_key(|p| p.name.to_lowercase());
        }
        SortCriteria::Python => {
            projects.sort_by_cached_key(|p| {
                (
                    p.python_version.clone().unwrap_or_default(),
                    p.name.to_lowercase(),
                )
            });
        }
        SortCriteria::Type => {
            projects.sort_by_cached_key(type_sort_key);
        }
    }
}

/// The label list as one string, e.g. `['Python', 'JavaScript (npm)']`.
///
/// Comparing whole strings puts a list before any of its own prefixes,
/// since `,` sorts before `]`.
fn type_sort_key(project: &ProjectRecord) -> String {
    format!("['{}']", project.label_strings().join("', '"))
}

/// Truncate the list to at most `limit` projects. `None` keeps everything.
pub fn apply_limit(projects: &mut Vec<ProjectRecord>, limit: Option<usize>) {
    if let Some(limit) = limit {
        projects.truncate(limit);
    }
}

/// Run the whole filter, sort and limit pipeline.
#[must_use]
pub fn select_projects(
    projects: Vec<ProjectRecord>,
    filter_opts: &FilterOptions,
    criteria: SortCriteria,
) -> Vec<ProjectRecord> {
    let mut selected = filter_projects(projects, filter_opts);
    sort_projects(&mut selected, criteria);
    apply_limit(&mut selected, filter_opts.limit);
    selected
}
