//! Column geometry for masonry layout calculations.
//!
//! Geometry defines the fixed column width, the gap between columns and
//! between stacked cards, the horizontal padding of the container and the
//! chrome height added to every card. All values are pixels.

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::constants::geometry::{CHROME, COLUMN_WIDTH, GAP, MIN_COLUMN_WIDTH, PADDING};

/// Geometry values for layout calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Width of every column and card.
    pub column_width: u32,
    /// Gap between columns and between cards in the same column.
    pub gap: u32,
    /// Padding on the left and on the right of the container.
    pub padding: u32,
    /// Fixed caption/footer height added to every card.
    pub chrome: u32,
}

impl Default for GridGeometry {
    fn default() -> Self { Self::new(COLUMN_WIDTH, GAP, PADDING, CHROME) }
}

impl GridGeometry {
    /// Create geometry from explicit values.
    ///
    /// A zero column width is raised to [`MIN_COLUMN_WIDTH`].
    #[must_use]
    pub const fn new(column_width: u32, gap: u32, padding: u32, chrome: u32) -> Self {
        let column_width =
            if column_width < MIN_COLUMN_WIDTH { MIN_COLUMN_WIDTH } else { column_width };
        Self { column_width, gap, padding, chrome }
    }

    /// Geometry derived from the `grid` configuration section.
    #[must_use]
    pub const fn from_config(config: &GridConfig) -> Self {
        Self::new(config.column_width, config.gap, config.padding, config.chrome)
    }

    /// Width of every card. Never zero, even for deserialized geometry.
    #[must_use]
    pub const fn card_width(&self) -> u32 {
        if self.column_width < MIN_COLUMN_WIDTH { MIN_COLUMN_WIDTH } else { self.column_width }
    }

    /// Horizontal distance between the left edges of adjacent columns.
    #[must_use]
    pub const fn stride(&self) -> u32 { self.card_width().saturating_add(self.gap) }

    /// Number of columns that fit in `container_width`.
    ///
    /// `floor((width - 2 * padding + gap) / (column_width + gap))`, never
    /// less than one.
    #[must_use]
    pub fn column_count(&self, container_width: u32) -> usize {
        let stride = i64::from(self.stride());
        let usable = i64::from(container_width) - 2 * i64::from(self.padding) + i64::from(self.gap);
        let count = usable.div_euclid(stride).max(1);
        usize::try_from(count).unwrap_or(1)
    }

    /// Render height of a card with the given intrinsic dimensions.
    ///
    /// Non-positive dimensions are treated as a square image.
    #[must_use]
    pub fn card_height(&self, width: i64, height: i64) -> u32 {
        let card_width = self.card_width();
        let image_height = if width <= 0 || height <= 0 {
            card_width
        } else {
            let scaled = u128::from(card_width) * u128::from(height.unsigned_abs())
                / u128::from(width.unsigned_abs());
            u32::try_from(scaled).unwrap_or(u32::MAX)
        };

        image_height.saturating_add(self.chrome)
    }

    /// Left offset of a column relative to the grid's content box.
    #[must_use]
    pub fn left_of(&self, column: usize) -> u32 {
        u32::try_from(column).map_or(u32::MAX, |c| c.saturating_mul(self.stride()))
    }

    /// Width of the centred grid content for `column_count` columns.
    ///
    /// Never wider than the padded container, never negative.
    #[must_use]
    pub fn content_width(&self, container_width: u32, column_count: usize) -> u32 {
        let available = container_width.saturating_sub(self.padding.saturating_mul(2));
        let columns = u32::try_from(column_count).unwrap_or(u32::MAX);
        let packed = columns.saturating_mul(self.stride()).saturating_sub(self.gap);
        available.min(packed)
    }
}

// ============================================================================
// Tests
// ============================================================================
