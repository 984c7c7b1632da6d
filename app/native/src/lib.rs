//! Pinboard - a masonry feed layout engine with viewport-driven incremental
//! loading.
//!
//! The library is split into:
//!
//! - [`masonry`] - column geometry, the pure layout function, the viewport
//!   loader and the grid that ties them to a host
//! - [`feed`] - pins, the observable feed store, page sources and the session
//!   loop that fetches pages on demand
//! - [`config`] - JSONC configuration, loading and hot reload
//! - [`cli`] - the `pinboard` command-line front end

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod masonry;
pub mod schema;
