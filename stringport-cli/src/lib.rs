//! CLI library for testing purposes

pub mod config;
pub mod discover;
pub mod logging;
pub mod migrate;
pub mod validation;

pub use config::{Config, DiscoveryConfig};
pub use migrate::{MigrateOptions, run_migrate_command};
