//! Error types for Pinboard.
//!
//! This module provides the unified error type returned by the CLI and by
//! the feed/grid plumbing. The layout engine itself never fails: malformed
//! geometry is absorbed locally and never reaches this type.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during application execution.
///
/// Serializes as `{ "kind": ..., "message": ... }` so it can be handed to a
/// frontend or printed as JSON by the CLI.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum PinboardError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// The host cannot deliver sentinel visibility notifications.
    ///
    /// Callers should fall back to a manual "load more" control.
    #[error("Visibility observation unavailable: {0}")]
    ObservationUnavailable(String),
    /// A feed page could not be fetched.
    #[error("Feed error: {0}")]
    FeedError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for PinboardError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for PinboardError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<crate::config::ConfigError> for PinboardError {
    fn from(err: crate::config::ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<crate::masonry::ObserveError> for PinboardError {
    fn from(err: crate::masonry::ObserveError) -> Self {
        Self::ObservationUnavailable(err.to_string())
    }
}

impl From<crate::feed::FeedError> for PinboardError {
    fn from(err: crate::feed::FeedError) -> Self { Self::FeedError(err.to_string()) }
}

impl From<String> for PinboardError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for PinboardError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}
