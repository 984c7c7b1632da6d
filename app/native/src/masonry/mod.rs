//! Masonry layout engine with incremental loading.
//!
//! - [`engine`] places variable-aspect-ratio tiles into balanced columns
//!   (greedy shortest-column packing). Pure and synchronous.
//! - [`loader`] turns sentinel visibility into "load more" signals,
//!   guarded by `has_more` and `loading`.
//! - [`resize`] collapses bursts of container width reports.
//! - [`host`] is the boundary to whatever renders the grid.
//! - [`grid`] owns one layout, loader and coalescer for a feed.

pub mod engine;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod item;
pub mod loader;
pub mod resize;

pub use engine::{ColumnHeights, Layout, compute_layout};
pub use geometry::GridGeometry;
pub use grid::MasonryGrid;
pub use host::{ChannelHost, ObserveError, Subscription, ViewportEvent, ViewportHost};
pub use item::{PlacedItem, Tile, TileFrame};
pub use loader::{Callback, Footer, LoadMoreRequest, LoadSink, ViewportLoader};
pub use resize::ResizeCoalescer;
