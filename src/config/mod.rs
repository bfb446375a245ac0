//! Configuration for scanning, filtering and sorting.
//!
//! Options come from two layers: the optional config file ([`FileConfig`])
//! and command-line arguments, which take priority.

pub mod file;
pub mod filter;

pub use file::FileConfig;
pub use filter::{FilterOptions, SortCriteria};
