#![forbid(unsafe_code)]
//! Port Android string resources to iOS and localize hardcoded literals.
//!
//! Android `res/values*/strings*.xml` tables are indexed per language, every
//! Objective-C `@"..."` literal whose text matches a default-language string
//! is rewritten to `NSLocalizedString(@"<key>", @"<text>")`, and every string
//! is exported to `resources/<lang>.lproj/Localizable.strings`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringport::{Migration, MigrationOptions};
//!
//! let mut migration = Migration::new("MyApp-iOS", MigrationOptions::default())?;
//! let report = migration.run(
//!     ["MyApp/res/values/strings.xml", "MyApp/res/values-es/strings.xml"],
//!     ["MyApp-iOS/Classes/HomeViewController.m"],
//! );
//! println!("Localized {} strings", report.localized);
//! # Ok::<(), stringport::Error>(())
//! ```
//!
//! # Guarantees
//!
//! - Rewriting is idempotent: literals already inside the lookup call are
//!   left alone.
//! - A destination table never holds a key twice, and a real translation is
//!   never replaced by default-language text.
//! - After [`Migration::finish`], every default-language key exists in every
//!   language's table.
//! - Files are replaced atomically or not at all.

pub mod error;
pub mod index;
pub mod merger;
pub mod migrate;
pub mod normalize;
pub mod options;
pub mod persist;
pub mod rewrite;
pub mod scanner;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    index::{Diagnostic, StringIndex, StringTable, TableLoad},
    merger::{MergeOutcome, TableMerger},
    migrate::{FileFailure, FileRewrite, Migration, MigrationReport},
    normalize::normalize_value,
    options::{LanguageRemap, MigrationOptions},
    rewrite::{LocalizedLiteral, Rewrite, RewriteEngine},
    scanner::{HeuristicScanner, Literal, LiteralKind, LiteralScanner, parse_table_line},
};
