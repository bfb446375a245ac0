//! # scan-projects
//!
//! Inventory of the project directories that live side by side under one
//! root (typically `~/Projects`).
//!
//! Every immediate subdirectory of the root is treated as a project. For each
//! one the scanner records when it was last touched, whether it sits inside a
//! git working tree, which Python and Node.js tooling it uses, and which
//! `requires-python` constraint it declares. The records can then be filtered,
//! sorted, capped and reported either as text or as a single JSON document.
//!
//! ## Pipeline
//!
//! 1. [`scanner::Scanner`] lists the subdirectories and builds a
//!    [`project::ProjectRecord`] for each, newest first.
//! 2. [`filtering::select_projects`] applies the filter flags, the sort
//!    criterion and the limit.
//! 3. [`project::Projects`] renders the text report, or
//!    [`output::JsonOutput`] the JSON one, both ending in
//!    [`stats::ProjectStatistics`].

pub mod classifier;
pub mod config;
pub mod filtering;
pub mod manifest;
pub mod output;
pub mod probe;
pub mod project;
pub mod scanner;
pub mod stats;
pub mod utils;

pub use config::{FileConfig, FilterOptions, SortCriteria};
