//! JSON Schema for the configuration file.

use crate::config::PinboardConfig;

/// Identifier embedded as the schema's `$id`.
const SCHEMA_ID: &str = "https://raw.githubusercontent.com/pinboard-rs/pinboard/main/pinboard.schema.json";

/// Generates a JSON Schema for the Pinboard configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(PinboardConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Generates a pretty-printed JSON Schema string for the configuration.
#[must_use]
pub fn generate_schema_json() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(&generate_schema_json()).unwrap();

        assert!(parsed["$id"].as_str().unwrap().ends_with("pinboard.schema.json"));
        assert_eq!(parsed["title"], "PinboardConfig");
        assert!(parsed["properties"]["grid"].is_object());
        assert!(parsed["properties"]["feed"].is_object());
    }

    #[test]
    fn test_schema_describes_grid_fields() {
        let parsed: serde_json::Value = serde_json::from_str(&generate_schema_json()).unwrap();
        let grid = &parsed["$defs"]["GridConfig"];
        assert!(grid["properties"]["columnWidth"].is_object());
        assert!(grid["properties"]["chrome"].is_object());
    }
}
