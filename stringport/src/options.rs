//! Options controlling how strings are indexed, matched and exported.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Error;

/// Android resource qualifiers that name a language differently on iOS.
///
/// Lookups are case-insensitive on the Android side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LanguageRemap(BTreeMap<String, String>);

impl Default for LanguageRemap {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert("zh-rCN".to_string(), "zh-Hans".to_string());
        map.insert("zh-rTW".to_string(), "zh-Hant".to_string());
        LanguageRemap(map)
    }
}

impl LanguageRemap {
    /// A remap table with no entries; every code passes through unchanged.
    pub fn empty() -> Self {
        LanguageRemap(BTreeMap::new())
    }

    /// Adds or replaces a mapping.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.0.insert(from.into(), to.into());
    }

    /// Maps `code` through the table, or returns it unchanged.
    pub fn apply<'a>(&'a self, code: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|(from, _)| from.eq_ignore_ascii_case(code))
            .map(|(_, to)| to.as_str())
            .unwrap_or(code)
    }
}

/// Migration behavior options.
///
/// Every field has a default matching an Android -> iOS migration of an
/// Objective-C code base, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MigrationOptions {
    /// Language of unsuffixed `values` directories; authoritative for keys.
    pub default_language: String,
    /// Android qualifier -> iOS language code.
    pub language_remap: LanguageRemap,
    /// Name of the runtime lookup function written into rewritten sources.
    pub localize_function: String,
    /// Lines containing any of these are never rewritten (logging calls).
    pub ignored_line_markers: Vec<String>,
    /// Lines starting with this (after trimming) are never rewritten.
    pub line_comment_marker: String,
    /// Declarations containing these cannot be wrapped in a runtime call.
    pub storage_qualifiers: Vec<String>,
    /// Trailing comment prefix flagging back-filled entries.
    pub translate_marker: String,
    /// Directory under the destination root holding the `.lproj` folders.
    pub destination_dir: String,
    /// File name of each destination table.
    pub table_file_name: String,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            language_remap: LanguageRemap::default(),
            localize_function: "NSLocalizedString".to_string(),
            ignored_line_markers: vec!["DDLog".to_string(), "NSLog".to_string()],
            line_comment_marker: "//".to_string(),
            storage_qualifiers: vec!["const".to_string(), "static".to_string()],
            translate_marker: "TRANSLATE TO ".to_string(),
            destination_dir: "resources".to_string(),
            table_file_name: "Localizable.strings".to_string(),
        }
    }
}

impl MigrationOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default language.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Replaces the language remap table.
    pub fn with_language_remap(mut self, remap: LanguageRemap) -> Self {
        self.language_remap = remap;
        self
    }

    /// Sets the runtime lookup function name.
    pub fn with_localize_function(mut self, name: impl Into<String>) -> Self {
        self.localize_function = name.into();
        self
    }

    /// Sets the destination directory under the destination root.
    pub fn with_destination_dir(mut self, dir: impl Into<String>) -> Self {
        self.destination_dir = dir.into();
        self
    }

    /// Rejects options that would make matching or exporting meaningless.
    pub fn validate(&self) -> Result<(), Error> {
        if self.default_language.trim().is_empty() {
            return Err(Error::config("default language must not be empty"));
        }
        if self.localize_function.trim().is_empty() {
            return Err(Error::config("localize function must not be empty"));
        }
        if self.translate_marker.trim().is_empty() {
            return Err(Error::config("translate marker must not be empty"));
        }
        if self.table_file_name.trim().is_empty() {
            return Err(Error::config("table file name must not be empty"));
        }
        Ok(())
    }
}
