//! Utility functions and helpers.
//!
//! This module contains formatting helpers shared by the text and JSON reports.

pub mod time;

pub use time::format_time_ago;
