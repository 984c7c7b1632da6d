//! Item and placement types for the layout engine.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Anything that can be placed on the masonry grid.
///
/// Only the identifier and the intrinsic dimensions are read; the rest of
/// the payload is opaque to the engine. Dimensions come from third-party
/// metadata and may be zero or negative.
pub trait Tile {
    /// Stable identifier type.
    type Id: Clone + Eq + Hash + Debug;

    /// Identifier, stable across recomputation.
    fn id(&self) -> Self::Id;

    /// Intrinsic width.
    fn width(&self) -> i64;

    /// Intrinsic height.
    fn height(&self) -> i64;
}

impl<T: Tile + ?Sized> Tile for &T {
    type Id = T::Id;

    fn id(&self) -> Self::Id { (**self).id() }

    fn width(&self) -> i64 { (**self).width() }

    fn height(&self) -> i64 { (**self).height() }
}

/// An item assigned to a column and a vertical offset.
///
/// Borrows the source item; the engine never copies or mutates payloads.
#[derive(Debug)]
pub struct PlacedItem<'a, T: ?Sized> {
    /// The source item.
    pub item: &'a T,
    /// Column index, `0..column_count`.
    pub column: usize,
    /// Offset from the top of the column.
    pub top: u32,
    /// Render height including chrome.
    pub height: u32,
}

impl<T: ?Sized> Clone for PlacedItem<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T: ?Sized> Copy for PlacedItem<'_, T> {}

impl<T: ?Sized> PlacedItem<'_, T> {
    /// Bottom edge of the card.
    #[must_use]
    pub const fn bottom(&self) -> u32 { self.top.saturating_add(self.height) }
}

/// Owned, renderer-facing placement of a tile.
///
/// Absolute-position hints relative to the grid content box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileFrame<Id> {
    /// Identifier of the placed item.
    pub id: Id,
    /// Column index.
    pub column: usize,
    /// Left offset.
    pub left: u32,
    /// Top offset.
    pub top: u32,
    /// Card width (the column width).
    pub width: u32,
    /// Card height including chrome.
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Square(u32);

    impl Tile for Square {
        type Id = u32;

        fn id(&self) -> u32 { self.0 }

        fn width(&self) -> i64 { 10 }

        fn height(&self) -> i64 { 10 }
    }

    #[test]
    fn test_tile_impl_for_reference() {
        let square = Square(7);
        let by_ref = &square;
        assert_eq!(Tile::id(&by_ref), 7);
        assert_eq!(Tile::width(&by_ref), 10);
    }

    #[test]
    fn test_placed_item_bottom() {
        let square = Square(1);
        let placed = PlacedItem {
            item: &square,
            column: 0,
            top: 100,
            height: 50,
        };
        assert_eq!(placed.bottom(), 150);
    }

    #[test]
    fn test_tile_frame_serializes() {
        let frame = TileFrame {
            id: "a".to_string(),
            column: 1,
            left: 296,
            top: 0,
            width: 280,
            height: 400,
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["left"], 296);
        assert_eq!(json["id"], "a");
    }
}
