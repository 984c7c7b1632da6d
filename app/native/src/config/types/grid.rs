//! Grid geometry configuration types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::geometry::{CHROME, COLUMN_WIDTH, GAP, PADDING};

/// Column geometry of the masonry grid, in pixels.
///
/// Changes apply on the next layout computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Width of every column and card.
    /// Default: 280
    #[schemars(range(min = 1))]
    pub column_width: u32,

    /// Gap between columns and between stacked cards.
    /// Default: 16
    pub gap: u32,

    /// Horizontal padding on each side of the container.
    /// Default: 16
    pub padding: u32,

    /// Fixed caption/footer height added to every card.
    /// Default: 120
    pub chrome: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            column_width: COLUMN_WIDTH,
            gap: GAP,
            padding: PADDING,
            chrome: CHROME,
        }
    }
}
