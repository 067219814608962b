use std::path::Path;

use stringport::{Diagnostic, Migration, MigrationReport};

use crate::config::Config;
use crate::discover::{find_source_files, find_table_files, ignored_file_set};
use crate::validation::{
    validate_android_root, validate_ios_root, validate_language_code, validate_output_path,
};

#[derive(Debug, Clone)]
pub struct MigrateOptions {
    pub android_root: String,
    pub ios_root: String,
    pub config: Option<String>,
    pub default_language: Option<String>,
    pub report_json: Option<String>,
}

fn load_config(opts: &MigrateOptions) -> Result<Config, String> {
    let mut config = match &opts.config {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::default(),
    };
    if let Some(lang) = &opts.default_language {
        validate_language_code(lang)?;
        config.migration.default_language = lang.clone();
    }
    Ok(config)
}

fn print_diagnostics(report: &MigrationReport) {
    for diagnostic in &report.diagnostics {
        match diagnostic {
            Diagnostic::QuestionableTranslation { language, value } => {
                println!("questionable translation ({}): {}", language, value);
            }
            Diagnostic::UnrewritableLiteral { key, file, line } => {
                println!(
                    "can't localize static! key: {}, file: {}, line: {}",
                    key,
                    file,
                    line.trim()
                );
            }
        }
    }
}

fn print_summary(report: &MigrationReport) {
    println!("Files scanned: {}", report.files_scanned);
    println!("Files rewritten: {}", report.files_rewritten);
    println!("Entries added: {}", report.entries_added);
    println!("Entries upgraded: {}", report.entries_upgraded);
    println!("Entries back-filled: {}", report.backfilled);
    println!("Diagnostics: {}", report.diagnostics.len());
    if !report.failures.is_empty() {
        println!("Files skipped after errors: {}", report.failures.len());
        for failure in &report.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }
    }
}

fn write_report(path: &str, report: &MigrationReport) -> Result<(), String> {
    let text = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text).map_err(|e| format!("Failed to write report JSON '{}': {}", path, e))
}

pub fn run_migrate_command(opts: MigrateOptions) -> Result<MigrationReport, String> {
    let config = load_config(&opts)?;
    let ignored_files = ignored_file_set(&config.discovery.ignored_files)?;
    validate_android_root(&opts.android_root, &config.discovery.manifest_file)?;
    validate_ios_root(&opts.ios_root)?;
    if let Some(report_path) = &opts.report_json {
        validate_output_path(report_path)?;
    }

    let android_root = Path::new(&opts.android_root);
    let ios_root = Path::new(&opts.ios_root);
    let mut migration =
        Migration::new(ios_root, config.migration.clone()).map_err(|e| e.to_string())?;

    println!("Indexing strings...");
    let tables = find_table_files(android_root, &config.discovery);
    migration.index_tables(&tables);
    for (language, count) in &migration.report().languages {
        println!("language:{}, strings:{}", language, count);
    }

    let sources = find_source_files(ios_root, &config.discovery, &ignored_files);
    migration.rewrite_sources(&sources);
    println!("Localized {} strings", migration.report().localized);

    migration.finish();
    let report = migration.into_report();

    print_diagnostics(&report);
    print_summary(&report);

    if let Some(report_path) = &opts.report_json {
        write_report(report_path, &report)?;
        println!("Report JSON written: {}", report_path);
    }

    Ok(report)
}
