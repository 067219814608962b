//! Idempotent updates of iOS `Localizable.strings` tables.
//!
//! Each merge is a full read-modify-write of one table file. Entries written
//! from the default language on behalf of a missing translation carry a
//! trailing `// TRANSLATE TO <lang>` comment; those are the only entries a
//! later merge may replace.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    error::Error,
    normalize::normalize_value,
    options::MigrationOptions,
    persist::{read_text_bom_aware, replace_file},
};

/// What a merge did to the destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOutcome {
    /// The key was not present and has been appended.
    Added,
    /// A placeholder entry was replaced by a real translation.
    Upgraded,
    /// The key was already present; the file was not written.
    Unchanged,
}

/// Key of a `.strings` line: the text between its first two quotes.
pub fn entry_key(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let end = start + line[start..].find('"')?;
    Some(&line[start..end])
}

/// Formats one destination entry.
pub fn format_entry(
    key: &str,
    value: &str,
    needs_translation: Option<(&str, &str)>,
) -> String {
    let mut line = format!("\"{}\" = \"{}\";", key, normalize_value(value));
    if let Some((marker, language)) = needs_translation {
        line.push_str(&format!(" // {}{}", marker, language));
    }
    line
}

/// Merges one entry into the text of a table.
///
/// The new text is `None` when the table must stay as it is.
pub fn merge_into(
    existing: &str,
    entry: &DestinationEntry<'_>,
    translate_marker: &str,
) -> (MergeOutcome, Option<String>) {
    let mut out = String::with_capacity(existing.len() + 64);
    let mut upgraded = false;
    for line in existing.lines() {
        if entry_key(line) == Some(entry.key) {
            if entry.authoritative && line.contains(translate_marker) {
                upgraded = true;
                continue;
            }
            return (MergeOutcome::Unchanged, None);
        }
        out.push_str(line);
        out.push('\n');
    }

    let flag = (!entry.authoritative).then_some((translate_marker, entry.language));
    out.push_str(&format_entry(entry.key, entry.value, flag));
    out.push('\n');

    let outcome = if upgraded {
        MergeOutcome::Upgraded
    } else {
        MergeOutcome::Added
    };
    (outcome, Some(out))
}

/// One entry to be written into a language's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationEntry<'a> {
    pub language: &'a str,
    pub key: &'a str,
    /// Raw (Android) value; normalized on write.
    pub value: &'a str,
    /// `false` for default-language text standing in for a translation.
    pub authoritative: bool,
}

/// Writes entries into `<root>/<destination_dir>/<lang>.lproj/<table_file_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMerger {
    root: PathBuf,
    destination_dir: String,
    table_file_name: String,
    translate_marker: String,
}

impl TableMerger {
    pub fn new<P: AsRef<Path>>(root: P, options: &MigrationOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            destination_dir: options.destination_dir.clone(),
            table_file_name: options.table_file_name.clone(),
            translate_marker: options.translate_marker.clone(),
        }
    }

    /// Path of the table file for `language`.
    pub fn table_path(&self, language: &str) -> PathBuf {
        self.root
            .join(&self.destination_dir)
            .join(format!("{}.lproj", language))
            .join(&self.table_file_name)
    }

    /// Adds `key` to the `language` table unless it is already there.
    ///
    /// An existing placeholder entry is replaced when `authoritative` is set;
    /// an existing authoritative entry is never touched.
    pub fn merge(
        &self,
        language: &str,
        key: &str,
        value: &str,
        authoritative: bool,
    ) -> Result<MergeOutcome, Error> {
        let path = self.table_path(language);
        let existing = self.ensure_table(&path)?;
        let entry = DestinationEntry {
            language,
            key,
            value,
            authoritative,
        };
        let (outcome, contents) = merge_into(&existing, &entry, &self.translate_marker);
        if let Some(contents) = contents {
            replace_file(&path, &contents)?;
            tracing::debug!(language, key, ?outcome, "merged entry");
        }
        Ok(outcome)
    }

    // Creates the `.lproj` directory and an empty table when missing.
    fn ensure_table(&self, path: &Path) -> Result<String, Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        if !path.exists() {
            fs::write(path, "").map_err(|e| Error::io(path, e))?;
            return Ok(String::new());
        }
        read_text_bom_aware(path)
    }
}
