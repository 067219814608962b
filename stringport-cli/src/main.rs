use clap::Parser;
use stringport_cli::{MigrateOptions, logging, run_migrate_command};

const USAGE_HINT: &str = "\
- where <ANDROID_ROOT> is the path to an Android project (where AndroidManifest.xml exists)
- and <IOS_ROOT> is the root directory of the iOS project

eg: stringport ~/work/app-android/App ~/work/app-ios/App";

/// Convert Android strings into iOS localized strings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = USAGE_HINT)]
struct Args {
    /// Android project root (must contain AndroidManifest.xml)
    android_root: String,

    /// iOS project root; sources are rewritten in place and tables are
    /// written under resources/<lang>.lproj
    ios_root: String,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Language of the unsuffixed values directory
    #[arg(long)]
    default_language: Option<String>,

    /// Write a JSON report of the run to this path
    #[arg(long)]
    report_json: Option<String>,

    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let opts = MigrateOptions {
        android_root: args.android_root,
        ios_root: args.ios_root,
        config: args.config,
        default_language: args.default_language,
        report_json: args.report_json,
    };

    if let Err(e) = run_migrate_command(opts) {
        eprintln!("Error: {}", e);
        eprintln!();
        eprintln!("usage: stringport <ANDROID_ROOT> <IOS_ROOT>");
        eprintln!("{}", USAGE_HINT);
        std::process::exit(1);
    }
}
