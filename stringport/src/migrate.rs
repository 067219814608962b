//! End-to-end migration: index, rewrite, export, back-fill.
//!
//! A [`Migration`] owns the [`StringIndex`] and the [`TableMerger`]. Table
//! files must all be indexed before the first source file is rewritten.
//! Failures are isolated per file: the error is logged, counted in the
//! report and the next file is processed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    error::Error,
    index::{Diagnostic, StringIndex},
    merger::{MergeOutcome, TableMerger},
    options::MigrationOptions,
    persist::{read_utf8, replace_file},
    rewrite::RewriteEngine,
};

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Counters and findings of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Strings indexed per language.
    pub languages: BTreeMap<String, usize>,
    pub tables_indexed: usize,
    pub files_scanned: usize,
    pub files_rewritten: usize,
    /// Literals replaced by a lookup call.
    pub localized: usize,
    pub entries_added: usize,
    pub entries_upgraded: usize,
    pub entries_unchanged: usize,
    /// Default-language entries written in place of a missing translation.
    pub backfilled: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl MigrationReport {
    fn record_merge(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Added => self.entries_added += 1,
            MergeOutcome::Upgraded => self.entries_upgraded += 1,
            MergeOutcome::Unchanged => self.entries_unchanged += 1,
        }
    }

    fn record_failure(&mut self, path: &Path, error: &Error) {
        tracing::error!(path = %path.display(), %error, "skipping file");
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            error: error.to_string(),
        });
    }
}

/// Outcome of one rewritten source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRewrite {
    pub localized: usize,
    pub changed: bool,
}

/// Drives a migration into one destination project.
pub struct Migration {
    options: MigrationOptions,
    index: StringIndex,
    merger: TableMerger,
    report: MigrationReport,
}

impl Migration {
    /// Prepares a migration writing tables under `destination_root`.
    pub fn new<P: AsRef<Path>>(
        destination_root: P,
        options: MigrationOptions,
    ) -> Result<Self, Error> {
        options.validate()?;
        Ok(Self {
            index: StringIndex::new(&options),
            merger: TableMerger::new(destination_root, &options),
            report: MigrationReport::default(),
            options,
        })
    }

    pub fn index(&self) -> &StringIndex {
        &self.index
    }

    pub fn merger(&self) -> &TableMerger {
        &self.merger
    }

    pub fn report(&self) -> &MigrationReport {
        &self.report
    }

    pub fn into_report(self) -> MigrationReport {
        self.report
    }

    /// Indexes every table file; a failing file is reported and skipped.
    pub fn index_tables<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            let path = path.as_ref();
            match self.index.load_file(path) {
                Ok(load) => {
                    tracing::debug!(
                        path = %path.display(),
                        language = %load.language,
                        pairs = load.pairs,
                        "indexed table"
                    );
                    self.report.tables_indexed += 1;
                    self.report.diagnostics.extend(load.diagnostics);
                }
                Err(e) => self.report.record_failure(path, &e),
            }
        }
        self.report.languages = self.index.language_counts();
        tracing::info!(
            tables = self.report.tables_indexed,
            languages = self.report.languages.len(),
            "indexed string tables"
        );
    }

    /// Rewrites every source file; a failing file is reported and skipped.
    pub fn rewrite_sources<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            let path = path.as_ref();
            if let Err(e) = self.rewrite_source_file(path) {
                self.report.record_failure(path, &e);
            }
        }
    }

    /// Rewrites one source file and exports every key it now references.
    ///
    /// The file is only written when at least one literal was replaced.
    pub fn rewrite_source_file(&mut self, path: &Path) -> Result<FileRewrite, Error> {
        let text = read_utf8(path)?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let rewrite = RewriteEngine::new(&self.index, &self.options).rewrite(&text, &label);
        self.report.files_scanned += 1;
        self.report.diagnostics.extend(rewrite.diagnostics);

        for literal in &rewrite.localized {
            self.propagate_key(&literal.key);
        }

        let changed = match rewrite.content {
            Some(content) => {
                replace_file(path, &content)?;
                self.report.files_rewritten += 1;
                self.report.localized += rewrite.localized.len();
                tracing::info!(
                    path = %path.display(),
                    localized = rewrite.localized.len(),
                    "rewrote source file"
                );
                true
            }
            None => false,
        };

        Ok(FileRewrite {
            localized: rewrite.localized.len(),
            changed,
        })
    }

    /// Writes `key` into the table of every language that translates it.
    ///
    /// A table that cannot be updated is reported and skipped; the other
    /// languages still receive the key.
    pub fn propagate_key(&mut self, key: &str) {
        for (language, table) in self.index.languages() {
            let Some(value) = table.get(key) else {
                continue;
            };
            match self.merger.merge(language, key, value, true) {
                Ok(outcome) => self.report.record_merge(outcome),
                Err(e) => {
                    let path = self.merger.table_path(language);
                    self.report.record_failure(&path, &e);
                }
            }
        }
    }

    /// Exports every default-language key, then back-fills every other
    /// language with default-language text for the keys it lacks.
    pub fn finish(&mut self) {
        let Some(default) = self.index.default_table() else {
            tracing::warn!(
                language = self.index.default_language(),
                "no default-language strings indexed; nothing to export"
            );
            return;
        };

        let keys: Vec<String> = default.keys().map(str::to_string).collect();
        for key in &keys {
            self.propagate_key(key);
        }

        let index = &self.index;
        let merger = &self.merger;
        let report = &mut self.report;
        for (language, _) in index.languages() {
            if language == index.default_language() {
                continue;
            }
            for key in index.missing_keys(language) {
                let Some(value) = index.default_table().and_then(|t| t.get(key)) else {
                    continue;
                };
                match merger.merge(language, key, value, false) {
                    Ok(outcome) => {
                        if outcome != MergeOutcome::Unchanged {
                            report.backfilled += 1;
                        }
                        report.record_merge(outcome);
                    }
                    Err(e) => {
                        let path = merger.table_path(language);
                        report.record_failure(&path, &e);
                    }
                }
            }
        }
        tracing::info!(
            added = report.entries_added,
            upgraded = report.entries_upgraded,
            backfilled = report.backfilled,
            "exported string tables"
        );
    }

    /// Runs all phases over already-discovered files.
    pub fn run<T, S>(&mut self, tables: T, sources: S) -> &MigrationReport
    where
        T: IntoIterator,
        T::Item: AsRef<Path>,
        S: IntoIterator,
        S::Item: AsRef<Path>,
    {
        self.index_tables(tables);
        self.rewrite_sources(sources);
        self.finish();
        &self.report
    }
}
