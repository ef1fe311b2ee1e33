//! Binary entry point for restvault.
//!
//! This binary provides the CLI for detecting, normalizing, importing, and
//! listing REST client exports.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use restvault::config::{CONFIG_PATH_ENV, RestvaultConfig};
use restvault::observability::{self, LoggingConfig};

use commands::{ListArgs, cmd_config, cmd_detect, cmd_import, cmd_list, cmd_normalize};

/// Restvault - normalize and merge REST client exports.
#[derive(Parser)]
#[command(name = "restvault")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the detected format of an export.
    Detect {
        /// Export file, or `-` for stdin.
        file: PathBuf,
    },

    /// Print the canonical form of an export as JSON.
    Normalize {
        /// Export file, or `-` for stdin.
        file: PathBuf,

        /// Pretty-print the output.
        #[arg(long)]
        pretty: bool,
    },

    /// Import an export into the store.
    Import {
        /// Export file, or `-` for stdin.
        file: PathBuf,

        /// Validate and count without writing.
        #[arg(long)]
        dry_run: bool,

        /// Store backend: memory or sqlite.
        #[arg(long)]
        store: Option<String>,

        /// Print every written document of this kind to stderr.
        #[arg(long, value_name = "KIND")]
        watch: Option<String>,
    },

    /// List stored documents of one kind.
    List {
        /// Entity kind (requests, history, projects, ...).
        kind: String,

        /// Maximum number of documents.
        #[arg(short, long, default_value = "25")]
        limit: usize,

        /// Continuation token from a previous listing.
        #[arg(long)]
        page_token: Option<String>,

        /// Case-insensitive text filter.
        #[arg(short, long)]
        filter: Option<String>,

        /// Reverse the natural order.
        #[arg(long)]
        desc: bool,
    },

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    // a missing .env file is the common case
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let initialized = LoggingConfig::from_settings(&config.logging, cli.verbose)
        .and_then(observability::init);
    if let Err(e) = initialized {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(command: Commands, config: RestvaultConfig) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Detect { file } => cmd_detect(&file),

        Commands::Normalize { file, pretty } => cmd_normalize(&file, pretty),

        Commands::Import {
            file,
            dry_run,
            store,
            watch,
        } => cmd_import(&config, file, dry_run, store, watch).await,

        Commands::List {
            kind,
            limit,
            page_token,
            filter,
            desc,
        } => cmd_list(
            &config,
            ListArgs {
                kind,
                limit,
                page_token,
                filter,
                descending: desc,
            },
        ),

        Commands::Config { show } => cmd_config(&config, show),
    }
}

/// Loads configuration.
///
/// An explicit path wins over `RESTVAULT_CONFIG_PATH`, which wins over the
/// platform default. Environment overrides apply to all three.
fn load_config(path: Option<&str>) -> restvault::Result<RestvaultConfig> {
    let config = if let Some(config_path) = path {
        RestvaultConfig::load_from_file(Path::new(config_path))?
    } else if let Some(config_path) = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
    {
        RestvaultConfig::load_from_file(Path::new(&config_path))?
    } else {
        RestvaultConfig::load_default()
    };
    config.with_env_overrides()
}
