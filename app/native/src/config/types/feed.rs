//! Feed and loading configuration types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::feed::PAGE_SIZE;
use crate::constants::timing::RESIZE_COALESCE_MS;

/// Pagination and resize handling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedConfig {
    /// Number of pins requested per page.
    /// Default: 20
    pub page_size: usize,

    /// Stop after this many pages. `null` for no limit.
    /// Default: null
    pub max_pages: Option<u32>,

    /// Window in milliseconds within which resize notifications are
    /// collapsed. `0` applies every width change immediately.
    /// Default: 16
    pub resize_coalesce_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_pages: None,
            resize_coalesce_ms: RESIZE_COALESCE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_config_default() {
        let config = FeedConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.max_pages, None);
        assert_eq!(config.resize_coalesce_ms, 16);
    }

    #[test]
    fn test_feed_config_deserializes() {
        let json = r#"{ "pageSize": 30, "maxPages": 5, "resizeCoalesceMs": 0 }"#;
        let config: FeedConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.page_size, 30);
        assert_eq!(config.max_pages, Some(5));
        assert_eq!(config.resize_coalesce_ms, 0);
    }
}
