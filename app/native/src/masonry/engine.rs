//! Masonry layout - greedy shortest-column packing.
//!
//! Items are placed in input order. Each item goes to the column with the
//! smallest running height, the first such column on ties. The card's top
//! is the column's height before placement; afterwards the column grows by
//! the card height plus one gap.
//!
//! ```text
//! +------+ +------+ +------+
//! |  1   | |  2   | |  3   |
//! |      | |      | +------+
//! +------+ |      | +------+
//! +------+ |      | |  4   |
//! |  5   | +------+ +------+
//! +------+
//! ```
//!
//! The computation is a pure function of the item sequence, the container
//! width and the geometry. It runs in `O(items × columns)`.

use smallvec::{SmallVec, smallvec};

use super::geometry::GridGeometry;
use super::item::{PlacedItem, Tile, TileFrame};
use crate::constants::geometry::COLUMNS_INLINE_CAP;

/// Running column heights, inline for single-digit column counts.
pub type ColumnHeights = SmallVec<[u32; COLUMNS_INLINE_CAP]>;

/// Result of a layout calculation.
#[derive(Debug, Clone)]
pub struct Layout<'a, T: ?Sized> {
    placed: Vec<PlacedItem<'a, T>>,
    column_heights: ColumnHeights,
    container_width: u32,
    geometry: GridGeometry,
}

impl<'a, T: Tile + ?Sized> Layout<'a, T> {
    /// Placements in input order.
    #[must_use]
    pub fn placed(&self) -> &[PlacedItem<'a, T>] { &self.placed }

    /// Number of placed items.
    #[must_use]
    pub fn len(&self) -> usize { self.placed.len() }

    /// Whether nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.placed.is_empty() }

    /// Number of columns, always at least one.
    #[must_use]
    pub fn column_count(&self) -> usize { self.column_heights.len() }

    /// Running height of every column after the last placement.
    ///
    /// Includes the trailing gap below the last card of each column.
    #[must_use]
    pub fn column_heights(&self) -> &[u32] { &self.column_heights }

    /// Height of the tallest column, used to size the scroll container.
    #[must_use]
    pub fn total_height(&self) -> u32 { self.column_heights.iter().copied().max().unwrap_or(0) }

    /// Width of the centred grid content.
    #[must_use]
    pub fn content_width(&self) -> u32 {
        self.geometry.content_width(self.container_width, self.column_count())
    }

    /// Left offset of a column.
    #[must_use]
    pub fn left_of(&self, column: usize) -> u32 { self.geometry.left_of(column) }

    /// Geometry the layout was computed with.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry { &self.geometry }

    /// Container width the layout was computed for.
    #[must_use]
    pub const fn container_width(&self) -> u32 { self.container_width }

    /// Owned frames for the renderer.
    #[must_use]
    pub fn frames(&self) -> Vec<TileFrame<T::Id>> {
        self.placed
            .iter()
            .map(|placed| TileFrame {
                id: placed.item.id(),
                column: placed.column,
                left: self.left_of(placed.column),
                top: placed.top,
                width: self.geometry.card_width(),
                height: placed.height,
            })
            .collect()
    }
}

/// Computes the masonry layout for `items` in a container `container_width`
/// pixels wide.
///
/// # Arguments
///
/// * `items` - Items to place, in order
/// * `container_width` - Measured width of the container
/// * `geometry` - Column width, gap, padding and chrome
///
/// # Returns
///
/// A [`Layout`] borrowing the items. Empty input yields an empty layout that
/// still carries the column count for `container_width`.
#[must_use]
pub fn compute_layout<'a, T, I>(
    items: I,
    container_width: u32,
    geometry: &GridGeometry,
) -> Layout<'a, T>
where
    T: Tile + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let column_count = geometry.column_count(container_width);
    let mut column_heights: ColumnHeights = smallvec![0; column_count];

    let items = items.into_iter();
    let mut placed = Vec::with_capacity(items.size_hint().0);

    for item in items {
        let column = shortest_column(&column_heights);
        let top = column_heights[column];
        let height = geometry.card_height(item.width(), item.height());

        placed.push(PlacedItem { item, column, top, height });
        column_heights[column] = top.saturating_add(height).saturating_add(geometry.gap);
    }

    Layout {
        placed,
        column_heights,
        container_width,
        geometry: *geometry,
    }
}

/// Index of the column with the smallest height, first one on ties.
fn shortest_column(heights: &[u32]) -> usize {
    let mut best = 0;
    for (index, &height) in heights.iter().enumerate().skip(1) {
        if height < heights[best] {
            best = index;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
