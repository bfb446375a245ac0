//! Configuration file support for persistent settings.
//!
//! Settings are loaded from `~/.config/scan-projects/config.toml` (or the
//! platform-specific equivalent) and act as defaults that CLI arguments can
//! override: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! dir = "~/Projects"
//!
//! [filtering]
//! sort = "name"
//! limit = 20
//! uv_only = false
//! poetry_only = false
//! node_only = false
//! typescript_only = false
//! git_only = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Name of the directory holding the config file inside the platform config dir.
const APP_DIR: &str = "scan-projects";

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so that unset values can fall through to the
/// CLI defaults.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default directory to scan
    pub dir: Option<PathBuf>,

    /// Filtering and sorting options
    #[serde(default)]
    pub filtering: FileFilterConfig,
}

/// Filtering options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileFilterConfig {
    /// Sort criterion (`"date"`, `"name"`, `"python"`, `"type"`)
    pub sort: Option<String>,

    /// Maximum number of projects to report
    pub limit: Option<usize>,

    pub uv_only: Option<bool>,
    pub poetry_only: Option<bool>,
    pub node_only: Option<bool>,
    pub typescript_only: Option<bool>,
    pub git_only: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use scan_projects::config::file::expand_tilde;
/// let absolute = PathBuf::from("/absolute/path");
/// assert_eq!(expand_tilde(&absolute), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// `None` if the platform config directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML
    /// or unexpected fields.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }
}
