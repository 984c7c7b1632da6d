//! Configuration module for Pinboard.
//!
//! This module provides configuration types, loading functionality, and file watching
//! so geometry changes reach the next layout without a restart.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod template;
pub mod types;
mod watcher;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{
    ConfigError, FeedConfig, GridConfig, PinboardConfig, config_paths,
    load_config as load_config_default, load_config_from_path,
};
pub use watcher::{ConfigWatcher, watch_config_file};

/// Global configuration instance, loaded once at startup.
static CONFIG: OnceLock<PinboardConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `init()` or `get_config()` to take effect.
///
/// # Returns
///
/// `true` if the path was set successfully, `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Loads the configuration from disk.
///
/// Returns the loaded configuration, or the defaults if loading fails.
fn load_or_default() -> PinboardConfig {
    let result = CUSTOM_CONFIG_PATH
        .get()
        .map_or_else(load_config_default, |path| load_config_from_path(path));

    match result {
        Ok((config, path)) => {
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("config: no configuration file, using defaults");
            PinboardConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "config: failed to load configuration, using defaults");
            PinboardConfig::default()
        }
    }
}

/// Initializes and returns the global configuration instance.
///
/// This function is idempotent - calling it multiple times will return
/// the same configuration instance.
pub fn init() -> &'static PinboardConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the global configuration instance, initializing it if necessary.
pub fn get_config() -> &'static PinboardConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_reexported() {
        let config = PinboardConfig::default();
        assert_eq!(config.grid, GridConfig::default());
        assert_eq!(config.feed, FeedConfig::default());
    }

    #[test]
    fn test_config_error() {
        let err = ConfigError::NotFound;
        let msg = err.to_string();
        assert!(msg.contains("No configuration file found"));
    }
}
