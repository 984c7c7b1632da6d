//! The pin, the feed's concrete tile type.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::masonry::Tile;

/// Public profile of the pin's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinAuthor {
    /// Unique handle.
    pub username: String,
    /// Display name, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar image URL, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// An image pin.
///
/// Field names follow the photo API mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// Stable identifier.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// Intrinsic image width. Not validated.
    pub width: i64,
    /// Intrinsic image height. Not validated.
    pub height: i64,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at: u64,
    #[serde(default, rename = "user", skip_serializing_if = "Option::is_none")]
    pub author: Option<PinAuthor>,
}

impl Pin {
    /// Creates a user pin with a fresh time-ordered id.
    #[must_use]
    pub fn new(image_url: impl Into<String>, width: i64, height: i64, user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: None,
            description: None,
            image_url: image_url.into(),
            source_url: None,
            alt_text: None,
            width,
            height,
            user_id: user_id.into(),
            board_id: None,
            created_at: now_millis(),
            author: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Title for display, `"Untitled"` when missing.
    #[must_use]
    pub fn display_title(&self) -> &str { self.title.as_deref().unwrap_or("Untitled") }
}

impl Tile for Pin {
    type Id = String;

    fn id(&self) -> String { self.id.clone() }

    fn width(&self) -> i64 { self.width }

    fn height(&self) -> i64 { self.height }
}

/// Current time in milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
