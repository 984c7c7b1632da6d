//! Configuration types for Pinboard.
//!
//! This module provides all configuration types organized by domain.
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod feed;
pub mod grid;
pub mod root;

pub use feed::FeedConfig;
pub use grid::GridConfig;
pub use root::{ConfigError, PinboardConfig, config_paths, load_config, load_config_from_path};
