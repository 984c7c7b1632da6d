//! Pin feed: items, pagination state and page sources.
//!
//! # Architecture
//!
//! - [`pin`] - The concrete tile type
//! - [`store`] - Read/write feed traits and the observable in-memory feed
//! - [`source`] - Page sources (placeholder generator, fallback chain)
//! - [`filter`] - Search query and topic filtering
//! - [`session`] - Async loop wiring a grid, a feed and a source together

pub mod filter;
pub mod pin;
pub mod session;
pub mod source;
pub mod store;

pub use filter::{Filtered, PinFilter};
pub use pin::{Pin, PinAuthor};
pub use session::{FeedSession, GridSnapshot, SessionStats};
pub use source::{PageSource, PlaceholderSource, WithFallback};
pub use store::{FeedStore, FeedView, ObservableFeed};
use thiserror::Error;

/// Errors raised by page sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The source failed to produce the page.
    #[error("{0}")]
    Source(String),
    /// The source returned data that could not be decoded.
    #[error("malformed page: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self { Self::Malformed(err.to_string()) }
}
