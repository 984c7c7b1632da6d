//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// Pinboard Configuration File
// ===========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.

{
  // ============================================================================
  // Grid Geometry
  // ============================================================================
  // All values are pixels. Changes apply to the next layout.
  // "grid": {
  //   // Width of every column and card
  //   "columnWidth": 280,
  //
  //   // Space between columns and between stacked cards
  //   "gap": 16,
  //
  //   // Horizontal padding on each side of the container
  //   "padding": 16,
  //
  //   // Caption/footer height added below every image
  //   "chrome": 120
  // },

  // ============================================================================
  // Feed
  // ============================================================================
  // "feed": {
  //   // Pins requested per page
  //   "pageSize": 20,
  //
  //   // Stop after this many pages (null = no limit)
  //   "maxPages": null,
  //
  //   // Resize notifications closer together than this are collapsed (ms)
  //   "resizeCoalesceMs": 16
  // }
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinboardConfig;

    #[test]
    fn test_generate_config_template_contains_all_sections() {
        let template = generate_config_template();
        assert!(template.contains("\"grid\""));
        assert!(template.contains("columnWidth"));
        assert!(template.contains("\"feed\""));
        assert!(template.contains("resizeCoalesceMs"));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let template = generate_config_template();
        let stripped = json_comments::StripComments::new(template.as_bytes());
        let config: PinboardConfig = serde_json::from_reader(stripped).unwrap();
        assert_eq!(config, PinboardConfig::default());
    }

    #[test]
    fn test_create_config_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.jsonc");
        create_config_file(&path).unwrap();
        assert!(path.exists());
    }
}
