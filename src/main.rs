//! # scan-projects
//!
//! A CLI tool that inventories the project directories living under one root
//! and reports how recently each was touched and what tooling it uses.
//!
//! ## Features
//!
//! - Newest-first listing by the latest file modification inside each project
//! - Git working tree detection
//! - Python (uv, Poetry, virtualenv) and Node.js (npm, yarn, pnpm, TypeScript) classification
//! - Filters, sorting and a result cap
//! - Text or JSON output
//! - Persistent configuration via `~/.config/scan-projects/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Scan the current directory
//! scan-projects
//!
//! # The ten most recent uv projects under ~/Projects
//! scan-projects ~/Projects --uv-only --limit 10
//!
//! # Machine-readable output
//! scan-projects ~/Projects --json
//! ```

mod cli;

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::Path,
    process::exit,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use scan_projects::{
    config::FileConfig,
    filtering::select_projects,
    output::JsonOutput,
    probe::path_exists,
    project::{ProjectRecord, Projects},
    scanner::Scanner,
};
use tracing_subscriber::{EnvFilter, fmt};

/// Entry point for the scan-projects application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, scans the root, filters and sorts the records, then
/// prints either the text report or the JSON document.
///
/// # Errors
///
/// Returns errors from the `config` subcommand or from JSON serialization.
/// Problems with the root directory are reported without failing.
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbosity());

    if let Some(Commands::Config { command }) = &args.subcommand {
        return run_config_command(command);
    }

    let json_mode = args.json();
    let file_config = file_config_or_default(json_mode);

    let dir = args.directory(&file_config);
    let filter_options = args.filter_options(&file_config);
    let sort_criteria = args.sort_criteria(&file_config);
    tracing::debug!("Filter options: {filter_options:?}, sort: {sort_criteria:?}");

    if !path_exists(&dir) {
        eprintln!("Error: Directory {} does not exist", dir.display());
        return Ok(());
    }

    if !json_mode {
        println!("\nScanning directory: {}\n", dir.display());
    }

    let scanner = Scanner::new().with_quiet(json_mode);
    let projects = scanner.scan_directory(&dir).unwrap_or_else(|e| {
        eprintln!("{} {e}", "Error:".red());
        Vec::new()
    });

    let selected = select_projects(projects, &filter_options, sort_criteria);
    let now = Local::now();

    if json_mode {
        print_json(&dir, &selected, now)
    } else {
        let projects: Projects = selected.into();
        print!("{}", projects.render(now));
        Ok(())
    }
}

// ── Helper functions ────────────────────────────────────────────────────

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the level one step
/// from `warn`.
fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Print the JSON report for the selected projects.
fn print_json(dir: &Path, projects: &[ProjectRecord], now: DateTime<Local>) -> Result<()> {
    let output = JsonOutput::from_projects(&dir.display().to_string(), projects, now);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Commented `config.toml` written by `config init`. Every key is optional.
const CONFIG_TEMPLATE: &str = r#"# scan-projects configuration
# Every key is optional; uncomment the ones you want to pin.

# Directory to scan when none is given on the command line
# (the current working directory otherwise)
# dir = "~/Projects"

[filtering]
# date | name | python | type
# sort = "date"

# Report at most this many projects
# limit = 20

# Filters combine: a project must pass every enabled one
# uv_only = false
# poetry_only = false
# node_only = false
# typescript_only = false
# git_only = false
"#;

fn run_config_command(cmd: &ConfigCommand) -> Result<()> {
    let path = FileConfig::config_path()
        .context("No platform config directory, so there is no config.toml location")?;

    match cmd {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => show_config(&path)?,
        ConfigCommand::Init => init_config(&path)?,
    }
    Ok(())
}

/// Print where the config lives and the value every key resolves to.
fn show_config(path: &Path) -> Result<()> {
    let config = if path.exists() {
        println!("# {}", path.display());
        FileConfig::load_from(path)?
    } else {
        println!("# {} does not exist, built-in defaults apply", path.display());
        FileConfig::default()
    };

    println!("{}", effective_settings(&config));
    Ok(())
}

/// Render the resolved settings as TOML, tagging keys the file leaves unset.
fn effective_settings(config: &FileConfig) -> String {
    let filtering = &config.filtering;
    let flag = |value: Option<bool>| (value.unwrap_or(false).to_string(), value.is_none());

    let dir = config.dir.as_ref().map_or_else(
        || ("\"<current directory>\"".to_string(), true),
        |dir| (format!("{:?}", dir.display().to_string()), false),
    );
    let sort = filtering.sort.as_ref().map_or_else(
        || ("\"date\"".to_string(), true),
        |sort| (format!("{sort:?}"), false),
    );
    let limit = filtering.limit.map_or_else(
        || ("\"<unlimited>\"".to_string(), true),
        |limit| (limit.to_string(), false),
    );

    let top = [("dir", dir)];
    let filters = [
        ("sort", sort),
        ("limit", limit),
        ("uv_only", flag(filtering.uv_only)),
        ("poetry_only", flag(filtering.poetry_only)),
        ("node_only", flag(filtering.node_only)),
        ("typescript_only", flag(filtering.typescript_only)),
        ("git_only", flag(filtering.git_only)),
    ];

    let line = |(key, (value, unset)): &(&str, (String, bool))| {
        let origin = if *unset { "  # default" } else { "" };
        format!("{key:<15} = {value}{origin}")
    };

    let mut lines: Vec<String> = top.iter().map(line).collect();
    lines.push(String::new());
    lines.push("[filtering]".to_string());
    lines.extend(filters.iter().map(line));
    lines.join("\n")
}

/// Write [`CONFIG_TEMPLATE`] to `path`, leaving an existing file alone.
fn init_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(CONFIG_TEMPLATE.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Created {}", path.display());
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            println!("{} already exists, not overwriting it", path.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", path.display()));
        }
    }
    Ok(())
}

/// The config file's settings, or the defaults if it cannot be used.
///
/// A broken file is reported as a warning on stderr (unless `quiet`) and
/// never stops the scan.
fn file_config_or_default(quiet: bool) -> FileConfig {
    FileConfig::load().unwrap_or_else(|e| {
        if !quiet {
            eprintln!("{} {e:#}", "Warning: ignoring config file:".yellow());
        }
        FileConfig::default()
    })
}
