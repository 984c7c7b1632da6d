//! Configuration file watcher for hot-reloading.
//!
//! Watches the configuration file and hands the reloaded configuration to a
//! callback, so new grid geometry applies to the next layout.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::{PinboardConfig, load_config_from_path};
use crate::constants::timing::CONFIG_DEBOUNCE_MS;

/// Keeps a config watch alive. Dropping it stops watching.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ConfigWatcher {
    /// The watched configuration file.
    #[must_use]
    pub fn path(&self) -> &Path { &self.path }
}

/// Starts watching `config_path` for changes.
///
/// Events are debounced: `on_change` runs once the file has been quiet for
/// the debounce window (editors often write to a temp file, then rename).
/// Files that fail to parse are logged and skipped.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created or the file's parent
/// directory cannot be watched.
pub fn watch_config_file<F>(config_path: &Path, on_change: F) -> Result<ConfigWatcher, notify::Error>
where
    F: Fn(PinboardConfig) + Send + 'static,
{
    let config_path = config_path.to_path_buf();
    let config_filename =
        config_path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();

    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher: RecommendedWatcher = notify::recommended_watcher(tx)?;

    // Watch the parent directory to catch file replacements
    let watch_path = config_path.parent().unwrap_or(&config_path);
    watcher.watch(watch_path, RecursiveMode::NonRecursive)?;

    let path = config_path.clone();
    std::thread::spawn(move || {
        let debounce = Duration::from_millis(CONFIG_DEBOUNCE_MS);
        let mut pending_since: Option<Instant> = None;

        loop {
            let received = match pending_since {
                Some(since) => rx.recv_timeout(debounce.saturating_sub(since.elapsed())),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(Ok(event)) => {
                    let affects_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().is_some_and(|name| name == config_filename));
                    if affects_config {
                        pending_since = Some(Instant::now());
                    }
                }
                Ok(Err(err)) => {
                    tracing::warn!("config: watch error: {err}");
                }
                Err(RecvTimeoutError::Timeout) => {
                    pending_since = None;
                    match load_config_from_path(&path) {
                        Ok((config, _)) => {
                            tracing::info!(path = %path.display(), "config: reloaded");
                            on_change(config);
                        }
                        Err(err) => {
                            tracing::warn!(path = %path.display(), "config: reload skipped: {err}");
                        }
                    }
                }
                // Watcher dropped
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    });

    Ok(ConfigWatcher { _watcher: watcher, path: config_path })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_config_debounce_duration_is_reasonable() {
        const { assert!(CONFIG_DEBOUNCE_MS >= 100) };
        const { assert!(CONFIG_DEBOUNCE_MS <= 1000) };
    }

    #[test]
    fn test_watch_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("config.jsonc");
        assert!(watch_config_file(&path, |_| {}).is_err());
    }

    #[test]
    fn test_change_is_reported_with_new_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        fs::write(&path, "{}").unwrap();

        let (tx, rx) = mpsc::channel();
        let watcher = watch_config_file(&path, move |config| {
            let _ = tx.send(config);
        })
        .unwrap();
        assert_eq!(watcher.path(), path);

        fs::write(&path, r#"{ "grid": { "columnWidth": 200 } }"#).unwrap();

        let config = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(config.grid.column_width, 200);
    }
}
