//! LinkSift CLI
//!
//! Filters a new link list against a previously seen baseline file.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use linksift::{
    error::Result,
    models::Config,
    pipeline::{self, ConvertOptions},
    storage::LocalStorage,
};

/// LinkSift - link list diff and cleanup tool
#[derive(Parser, Debug)]
#[command(
    name = "linksift",
    version,
    about = "Removes already-seen links from a new link list"
)]
struct Cli {
    /// Path to data directory containing config and audit records
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter a new file against an old baseline file
    Convert {
        /// Path to the old (baseline) file
        #[arg(long)]
        old: PathBuf,

        /// Path to the new (candidate) file
        #[arg(long)]
        new: PathBuf,

        /// Output path (default: "<new stem>_updated.<ext>" next to the new file)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip writing an audit record
        #[arg(long)]
        no_audit: bool,
    },

    /// Validate configuration files
    Validate,

    /// Show data directory and audit state
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("LinkSift starting...");

    // Load configuration
    let config_path = cli.data_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    let storage = LocalStorage::new(&cli.data_dir);

    match cli.command {
        Command::Convert {
            old,
            new,
            output,
            no_audit,
        } => {
            let options = ConvertOptions {
                output,
                audit: !no_audit,
            };
            let outcome = pipeline::run_convert(&config, &storage, &old, &new, &options)?;

            log::info!("Update completed:");
            for line in outcome.report.summary().lines() {
                log::info!("  {}", line);
            }
            log::info!("Updated file: {}", outcome.updated_path.display());
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (normalizer and media settings)");

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Data directory: {}", cli.data_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() {
                    "exists"
                } else {
                    "not found (defaults in use)"
                }
            );

            let now = Utc::now();
            let records = storage.audit_records(&now)?;
            log::info!("Audit records this month: {}", records.len());
            if let Some(last) = records.last() {
                log::info!(
                    "Last conversion: {} ({} kept, {} removed)",
                    last.timestamp,
                    last.report.kept,
                    last.report.removed
                );
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
