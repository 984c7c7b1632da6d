//! Internal constants for masonry layout and feed tuning.
//!
//! This module centralizes the geometry defaults and timing values used by
//! the layout engine, the viewport loader and the feed.
//!
//! # Organization
//!
//! Constants are grouped by functionality:
//! - `geometry` - Default column geometry in pixels
//! - `feed` - Pagination defaults
//! - `timing` - Resize coalescing and config debouncing

/// Default column geometry, in pixels.
pub mod geometry {
    /// Width of a single column (and therefore of every card).
    pub const COLUMN_WIDTH: u32 = 280;

    /// Smallest accepted column width.
    pub const MIN_COLUMN_WIDTH: u32 = 1;

    /// Space between adjacent columns and between stacked cards.
    pub const GAP: u32 = 16;

    /// Horizontal padding on each side of the container.
    pub const PADDING: u32 = 16;

    /// Fixed height added to every card for its caption/footer area.
    pub const CHROME: u32 = 120;

    /// Inline capacity for per-column running heights.
    ///
    /// Column counts stay in single digits for any realistic viewport, so
    /// column heights live on the stack in the common case.
    pub const COLUMNS_INLINE_CAP: usize = 8;
}

/// Pagination defaults.
pub mod feed {
    /// Number of items requested per page.
    pub const PAGE_SIZE: usize = 20;

    /// Index of the first page.
    pub const FIRST_PAGE: u32 = 1;

    /// Minimum placeholder width (inclusive).
    pub const PLACEHOLDER_MIN_WIDTH: i64 = 300;

    /// Range added on top of the minimum placeholder width.
    pub const PLACEHOLDER_WIDTH_SPAN: i64 = 200;

    /// Minimum placeholder height (inclusive).
    pub const PLACEHOLDER_MIN_HEIGHT: i64 = 200;

    /// Range added on top of the minimum placeholder height.
    pub const PLACEHOLDER_HEIGHT_SPAN: i64 = 400;
}

/// Timing constants for event handling and debouncing.
pub mod timing {
    /// Resize coalescing window (ms).
    ///
    /// Resize notifications closer together than this are collapsed; the
    /// last width of a burst is applied on flush. One frame at 60Hz.
    pub const RESIZE_COALESCE_MS: u64 = 16;

    /// Debounce for configuration file change notifications (ms).
    ///
    /// Some editors trigger multiple events per save (write to temp, rename).
    pub const CONFIG_DEBOUNCE_MS: u64 = 200;
}
