//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments and options using the
//! [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use scan_projects::config::file::{FileConfig, expand_tilde};
use scan_projects::config::{FilterOptions, SortCriteria};

/// Command-line arguments for selecting which projects are reported.
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
struct FilteringArgs {
    /// Only show the N most relevant projects (after sorting)
    ///
    /// A value of 0 reports no projects at all.
    #[arg(short = 'l', long)]
    limit: Option<usize>,

    /// Only show projects managed with uv (have a `uv.lock`)
    #[arg(long)]
    uv_only: bool,

    /// Only show projects whose `pyproject.toml` configures Poetry
    #[arg(long)]
    poetry_only: bool,

    /// Only show Node.js projects (have a `package.json`)
    #[arg(long)]
    node_only: bool,

    /// Only show projects that depend on TypeScript
    #[arg(long)]
    typescript_only: bool,

    /// Only show projects inside a git working tree
    #[arg(long)]
    git_only: bool,

    /// Sort projects by the given criterion
    ///
    /// Supported values: date (newest first), name (alphabetical),
    /// python (by `requires-python`), type (by project labels).
    #[arg(short = 's', long, value_enum)]
    sort: Option<SortCriteria>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser, Debug)]
#[command(name = "scan-projects")]
#[command(
    about = "Inventory the project directories under a root: recency, git status, Python and Node.js tooling"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory whose immediate subdirectories are scanned as projects
    ///
    /// Defaults to the current directory when neither this argument nor the
    /// config file provides one. A leading `~` is expanded.
    dir: Option<PathBuf>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, all human-readable output (colors, progress spinner)
    /// is suppressed and a single JSON document is printed to stdout.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Logs go to stderr. `RUST_LOG` takes precedence when set.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Filtering options
    #[command(flatten)]
    filtering: FilteringArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Number of times `-v` was given.
    #[must_use]
    pub const fn verbosity(&self) -> u8 {
        self.verbose
    }

    /// Resolve the directory to scan.
    ///
    /// Priority: CLI argument > config file `dir` > current working directory.
    /// Tilde expansion is applied to both sources.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        self.dir
            .as_ref()
            .or(config.dir.as_ref())
            .map_or_else(working_directory, |dir| expand_tilde(dir))
    }

    /// Extract filter options from CLI args and config file.
    ///
    /// Boolean flags are enabled when either the CLI flag or the config file
    /// enables them. The limit follows CLI > config > unlimited.
    #[must_use]
    pub fn filter_options(&self, config: &FileConfig) -> FilterOptions {
        let file = &config.filtering;

        FilterOptions {
            uv_only: self.filtering.uv_only || file.uv_only.unwrap_or(false),
            poetry_only: self.filtering.poetry_only || file.poetry_only.unwrap_or(false),
            node_only: self.filtering.node_only || file.node_only.unwrap_or(false),
            typescript_only: self.filtering.typescript_only
                || file.typescript_only.unwrap_or(false),
            git_only: self.filtering.git_only || file.git_only.unwrap_or(false),
            limit: self.filtering.limit.or(file.limit),
        }
    }

    /// Resolve the sort criterion.
    ///
    /// Priority: CLI argument > config file > `date`. An unrecognised value
    /// in the config file falls back to the default.
    #[must_use]
    pub fn sort_criteria(&self, config: &FileConfig) -> SortCriteria {
        self.filtering
            .sort
            .or_else(|| {
                config
                    .filtering
                    .sort
                    .as_ref()
                    .and_then(|s| SortCriteria::from_str(s, true).ok())
            })
            .unwrap_or_default()
    }
}

/// The process working directory, or `.` if it cannot be determined.
fn working_directory() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
