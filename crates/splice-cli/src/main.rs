//! keysplice CLI
//!
//! Replaces key-anchored `key: { ... }` blocks in documents such as
//! localization dictionaries, one document at a time.

mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use splice_core::RunOptions;
use splice_fs::RobustnessConfig;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::ReplaceArgs;
use error::Result;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let robustness = RobustnessConfig {
        lock_timeout: Duration::from_millis(cli.lock_timeout_ms),
        enable_fsync: !cli.no_fsync,
    };

    execute_command(cli.command, robustness)
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug and the default is
/// warnings only. Logs go to stderr so `--json` output stays parseable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands, robustness: RobustnessConfig) -> Result<bool> {
    match cmd {
        Commands::Replace {
            key,
            files,
            replacement,
            replacement_file,
            block,
            match_line_endings,
            dry_run,
            parallel,
            json,
        } => commands::run_replace(
            ReplaceArgs {
                key,
                files,
                replacement,
                replacement_file,
                block,
                match_line_endings,
                json,
            },
            RunOptions {
                dry_run,
                parallel,
                robustness,
            },
        ),
        Commands::Apply {
            manifest,
            dry_run,
            parallel,
            json,
        } => commands::run_apply(
            &manifest,
            RunOptions {
                dry_run,
                parallel,
                robustness,
            },
            json,
        ),
        Commands::Locate {
            key,
            files,
            block,
            json,
        } => commands::run_locate(&key, &files, &block, json),
    }
}
