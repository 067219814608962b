//! TOML configuration for the CLI.
//!
//! ```toml
//! [discovery]
//! ignored_files = ["RRSStoryboard.m", "*Constants.m"]
//!
//! [migration]
//! default_language = "en"
//! language_remap = { "zh-rCN" = "zh-Hans", "zh-rTW" = "zh-Hant", "in" = "id" }
//! ```

use std::path::Path;

use serde::Deserialize;
use stringport::MigrationOptions;

/// Where to look for Android tables and Objective-C sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Resource directory below the Android root.
    pub resource_dir: String,
    /// File that must exist at the Android root.
    pub manifest_file: String,
    /// Only directories starting with this are searched for tables.
    pub table_dir_prefix: String,
    /// Only files starting with this are read as tables.
    pub table_file_prefix: String,
    /// Extension of source files to rewrite.
    pub source_extension: String,
    /// Source file names (glob patterns) never rewritten.
    pub ignored_files: Vec<String>,
    /// Directory names skipped with their whole subtree.
    pub ignored_dirs: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            resource_dir: "res".to_string(),
            manifest_file: "AndroidManifest.xml".to_string(),
            table_dir_prefix: "values".to_string(),
            table_file_prefix: "strings".to_string(),
            source_extension: "m".to_string(),
            ignored_files: vec![
                "RRSStoryboard.m".to_string(),
                "MobeamConstants.m".to_string(),
            ],
            ignored_dirs: vec!["external".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    pub migration: MigrationOptions,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid config: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config '{}': {}", path.display(), e))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.migration.default_language, "en");
        assert_eq!(config.discovery.ignored_dirs, vec!["external"]);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [discovery]
            ignored_files = ["*Constants.m"]

            [migration]
            default_language = "de"
            localize_function = "L10n"
            language_remap = { "in" = "id" }
            "#,
        )
        .unwrap();
        assert_eq!(config.discovery.ignored_files, vec!["*Constants.m"]);
        assert_eq!(config.discovery.source_extension, "m");
        assert_eq!(config.migration.default_language, "de");
        assert_eq!(config.migration.localize_function, "L10n");
        assert_eq!(config.migration.language_remap.apply("in"), "id");
        assert_eq!(config.migration.language_remap.apply("zh-rCN"), "zh-rCN");
        assert_eq!(config.migration.ignored_line_markers, vec!["DDLog", "NSLog"]);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_toml_str("[migration]\ndefault_language = 3").unwrap_err();
        assert!(err.starts_with("Invalid config"));
    }
}
