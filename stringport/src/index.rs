//! In-memory index of every Android string table, keyed by iOS language code.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    normalize::is_questionable,
    options::{LanguageRemap, MigrationOptions},
    scanner::parse_table_line,
};

/// Strings of one language, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: IndexMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// First key, in insertion order, whose value is exactly `text`.
    pub fn find_key_for_value(&self, text: &str) -> Option<&str> {
        self.iter().find(|(_, value)| *value == text).map(|(k, _)| k)
    }
}

/// Non-fatal findings reported to the user for manual follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A translation contains the doubled escaped-quote artifact.
    QuestionableTranslation { language: String, value: String },
    /// A literal matches a key but sits in a `static`/`const` declaration.
    UnrewritableLiteral {
        key: String,
        file: String,
        line: String,
    },
}

/// Summary of one indexed table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLoad {
    pub language: String,
    pub pairs: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Language code -> [`StringTable`].
///
/// Languages iterate in sorted order; the default language decides which
/// literals are matched and which keys every other language must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringIndex {
    default_language: String,
    remap: LanguageRemap,
    tables: BTreeMap<String, StringTable>,
}

impl StringIndex {
    pub fn new(options: &MigrationOptions) -> Self {
        Self {
            default_language: options.default_language.clone(),
            remap: options.language_remap.clone(),
            tables: BTreeMap::new(),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Language of a `values[-qualifier]` directory name.
    ///
    /// Everything after the first `-` is the qualifier; a name without one
    /// (or starting with one) belongs to the default language.
    pub fn language_for_dir(&self, dir_name: &str) -> String {
        match dir_name.find('-') {
            Some(pos) if pos > 0 => self.remap.apply(&dir_name[pos + 1..]).to_string(),
            _ => self.default_language.clone(),
        }
    }

    /// Indexes one table file, deriving its language from the parent directory.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<TableLoad, Error> {
        let path = path.as_ref();
        let dir_name = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let language = self.language_for_dir(dir_name);
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        self.load_reader(&language, BufReader::new(file))
            .map_err(|e| Error::io(path, e))
    }

    /// Indexes table lines from any reader under `language`.
    ///
    /// A key repeated within the input keeps its last value.
    pub fn load_reader<R: BufRead>(
        &mut self,
        language: &str,
        reader: R,
    ) -> std::io::Result<TableLoad> {
        if !looks_like_language(language) {
            tracing::debug!(language, "resource qualifier is not a BCP 47 language code");
        }

        let table = self.tables.entry(language.to_string()).or_default();
        let mut pairs = 0;
        let mut diagnostics = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let Some((key, value)) = parse_table_line(&line) else {
                continue;
            };
            if is_questionable(value) {
                tracing::debug!(language, value, "questionable translation");
                diagnostics.push(Diagnostic::QuestionableTranslation {
                    language: language.to_string(),
                    value: value.to_string(),
                });
            }
            table.insert(key, value);
            pairs += 1;
        }

        Ok(TableLoad {
            language: language.to_string(),
            pairs,
            diagnostics,
        })
    }

    /// Adds a single string, creating the language table if needed.
    pub fn insert(&mut self, language: &str, key: impl Into<String>, value: impl Into<String>) {
        self.tables
            .entry(language.to_string())
            .or_default()
            .insert(key, value);
    }

    pub fn table(&self, language: &str) -> Option<&StringTable> {
        self.tables.get(language)
    }

    pub fn default_table(&self) -> Option<&StringTable> {
        self.table(&self.default_language)
    }

    /// All languages with their tables, sorted by language code.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &StringTable)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of strings per language, omitting empty tables.
    pub fn language_counts(&self) -> BTreeMap<String, usize> {
        self.languages()
            .filter(|(_, table)| !table.is_empty())
            .map(|(lang, table)| (lang.to_string(), table.len()))
            .collect()
    }

    /// Key of the first default-language string equal to `text`.
    pub fn find_key_for_value(&self, text: &str) -> Option<&str> {
        self.default_table()?.find_key_for_value(text)
    }

    /// Default-language keys `language` has no string for, in default order.
    pub fn missing_keys(&self, language: &str) -> Vec<&str> {
        let Some(default) = self.default_table() else {
            return Vec::new();
        };
        let other = self.table(language);
        default
            .keys()
            .filter(|key| !other.is_some_and(|t| t.contains_key(key)))
            .collect()
    }
}

// Android writes regions as `-rXX`; accept that spelling for the check.
fn looks_like_language(code: &str) -> bool {
    code.replace("-r", "-").parse::<LanguageIdentifier>().is_ok()
}
