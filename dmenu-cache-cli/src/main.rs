//! dmenu-cache CLI
//!
//! Frequency-ranked term list for dmenu-style launchers.
//!
//! ```text
//! dmenu-cache show | dmenu | dmenu-cache update | ${SHELL:-sh} &
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dmenu_cache_core::{CacheConfig, CacheError};
use dmenu_cache_scanner::PathScanner;
use dmenu_cache_store::Cache;

mod commands;

/// dmenu-cache - rank launcher entries by how often you use them
#[derive(Parser)]
#[command(name = "dmenu-cache")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Cache file to use instead of $XDG_DATA_HOME/dmenu_cache/cache.json
    #[arg(long, global = true, env = "DMENU_CACHE_FILE", value_name = "PATH")]
    cache_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record each stdin line as a used term and echo it to stdout
    Update,

    /// Print every executable on PATH, most used first
    Show,

    /// Forget all usage history
    Reset,

    /// Print the cached counts as `term: count`
    Print,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the term list
    let filter = if cli.verbose {
        "dmenu_cache=debug,info"
    } else {
        "dmenu_cache=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", error_label(&e).red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.cache_file {
        Some(path) => CacheConfig::new(path),
        None => CacheConfig::from_env().context("Failed to locate cache file")?,
    };
    debug!(?config, "Resolved cache config");

    match cli.command {
        Commands::Update => cmd_update(config),
        Commands::Show => cmd_show(config),
        Commands::Reset => cmd_reset(config),
        Commands::Print => cmd_print(config),
    }
}

/// Picks the banner for a failed command from the underlying cache error.
fn error_label(err: &anyhow::Error) -> &'static str {
    match err.chain().find_map(|cause| cause.downcast_ref::<CacheError>()) {
        Some(e) if e.is_contract_violation() => "internal error:",
        Some(e) if e.is_storage_error() => "cache file error:",
        _ => "error:",
    }
}

/// Ingest used terms from stdin
fn cmd_update(config: CacheConfig) -> Result<()> {
    Cache::with_session(config, |cache| {
        commands::update(cache, io::stdin().lock(), &mut io::stdout().lock())
    })
    .context("Update failed")?;
    Ok(())
}

/// Show ranked terms from PATH
fn cmd_show(config: CacheConfig) -> Result<()> {
    let scanner = PathScanner::from_env();
    Cache::with_session(config, |cache| {
        commands::show(cache, &scanner, &mut io::stdout().lock())
    })
    .context("Show failed")
}

/// Wipe the cache
fn cmd_reset(config: CacheConfig) -> Result<()> {
    Cache::with_session(config, commands::reset).context("Reset failed")
}

/// Dump counts
fn cmd_print(config: CacheConfig) -> Result<()> {
    Cache::with_session(config, |cache| commands::print(cache, &mut io::stdout().lock()))
        .context("Print failed")
}
