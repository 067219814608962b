use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::config::DiscoveryConfig;

// Plain recursive walk: no .gitignore handling, hidden files included,
// entries sorted by name so every run visits files in the same order.
fn walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    builder
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// Android string tables: `strings*` files inside `values*` directories of
/// `<android_root>/<resource_dir>`.
pub fn find_table_files(android_root: &Path, config: &DiscoveryConfig) -> Vec<PathBuf> {
    let res_dir = android_root.join(&config.resource_dir);
    let dir_prefix = config.table_dir_prefix.clone();
    let mut builder = walker(&res_dir);
    let root = res_dir.clone();
    builder.filter_entry(move |entry| {
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        !is_dir || entry.path() == root || file_name(entry.path()).starts_with(&dir_prefix)
    });

    let mut tables = Vec::new();
    for dent in builder.build() {
        let dent = match dent {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable resource entry");
                continue;
            }
        };
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        // tables sit inside a values* directory, never directly in res/
        if dent.path().parent() == Some(res_dir.as_path()) {
            continue;
        }
        if file_name(dent.path()).starts_with(&config.table_file_prefix) {
            tables.push(dent.into_path());
        }
    }
    tables
}

/// Compiles the ignored source file name patterns.
pub fn ignored_file_set(patterns: &[String]) -> Result<GlobSet, String> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob =
            Glob::new(pat).map_err(|e| format!("Invalid ignored file pattern '{}': {}", pat, e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| format!("Failed to build ignored file patterns: {}", e))
}

/// Objective-C sources under `ios_root`, skipping ignored directories and
/// file names matching `ignored_files`.
pub fn find_source_files(
    ios_root: &Path,
    config: &DiscoveryConfig,
    ignored_files: &GlobSet,
) -> Vec<PathBuf> {
    let ignored_dirs = config.ignored_dirs.clone();
    let mut builder = walker(ios_root);
    builder.filter_entry(move |entry| {
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        !(is_dir && entry.depth() > 0 && ignored_dirs.iter().any(|d| d == file_name(entry.path())))
    });

    let mut sources = Vec::new();
    for dent in builder.build() {
        let dent = match dent {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable source entry");
                continue;
            }
        };
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = dent.path();
        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == config.source_extension);
        if !has_extension {
            continue;
        }
        if ignored_files.is_match(file_name(path)) {
            tracing::debug!(path = %path.display(), "ignored source file");
            continue;
        }
        sources.push(dent.into_path());
    }
    sources
}
