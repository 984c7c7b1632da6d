//! Root configuration type and file loading.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::feed::FeedConfig;
use super::grid::GridConfig;

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Legacy configuration file names in home directory.
const LEGACY_CONFIG_FILE_NAMES: &[&str] = &[".pinboard.jsonc", ".pinboard.json"];

/// Application directory name under the config roots.
const APP_DIR: &str = "pinboard";

/// Root configuration for Pinboard.
///
/// Every section is optional; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PinboardConfig {
    /// Column geometry of the masonry grid.
    pub grid: GridConfig,

    /// Pagination and resize handling.
    pub feed: FeedConfig,
}

/// Errors that can occur when loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/pinboard/config.jsonc \
                or ~/.pinboard.jsonc"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/pinboard/` if set
/// 2. `~/.config/pinboard/`
/// 3. The platform config directory (`~/Library/Application Support/pinboard/` on macOS)
/// 4. `~/.pinboard.jsonc` or `~/.pinboard.json` (legacy/simple location)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        push_dir(&PathBuf::from(xdg_config).join(APP_DIR), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(&home.join(".config").join(APP_DIR), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(&config_dir.join(APP_DIR), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Adds the config file names under `dir`, skipping duplicates.
///
/// `XDG_CONFIG_HOME` is often `~/.config` itself.
fn push_dir(dir: &Path, paths: &mut Vec<PathBuf>) {
    for filename in CONFIG_FILE_NAMES {
        let path = dir.join(filename);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(PinboardConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from an explicit path.
///
/// A leading `~` is expanded to the home directory. The file supports
/// JSONC: `//` and `/* */` comments are stripped before parsing.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, and the
/// other variants for I/O or parsing failures.
pub fn load_config_from_path(path: &Path) -> Result<(PinboardConfig, PathBuf), ConfigError> {
    let path = expand_path(path);
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(&path)?;
    let reader = json_comments::StripComments::new(file);
    let config: PinboardConfig = serde_json::from_reader(reader)?;
    tracing::debug!(path = %path.display(), "config: loaded");
    Ok((config, path))
}

/// Expands a leading `~` in `path`.
fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw.trim()).as_ref()),
        None => path.to_path_buf(),
    }
}
