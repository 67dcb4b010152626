//! `keysplice replace`

use std::path::PathBuf;

use colored::Colorize;
use splice_core::{Job, RunOptions, run_batch};
use splice_fs::{NormalizedPath, io};

use crate::cli::BlockArgs;
use crate::error::{CliError, Result};
use crate::output;

/// Arguments of the replace command, gathered from the parsed CLI.
#[derive(Debug, Clone)]
pub struct ReplaceArgs {
    pub key: String,
    pub files: Vec<PathBuf>,
    pub replacement: Option<String>,
    pub replacement_file: Option<PathBuf>,
    pub block: BlockArgs,
    pub match_line_endings: bool,
    pub json: bool,
}

/// Replace `args.key`'s block in every listed file.
pub fn run_replace(args: ReplaceArgs, options: RunOptions) -> Result<bool> {
    let replacement = match (args.replacement, &args.replacement_file) {
        (Some(text), None) => text,
        (None, Some(file)) => io::read_document(&NormalizedPath::new(file))?,
        _ => {
            return Err(CliError::user(
                "pass exactly one of --with or --replacement-file",
            ));
        }
    };

    let block_options = args.block.options();
    let jobs: Vec<Job> = args
        .files
        .iter()
        .map(|file| Job {
            path: NormalizedPath::new(file),
            key: args.key.clone(),
            replacement: replacement.clone(),
            options: block_options,
            match_line_endings: args.match_line_endings,
        })
        .collect();

    if !args.json {
        println!(
            "{} Replacing '{}' in {} file(s)...",
            "=>".blue().bold(),
            args.key,
            jobs.len()
        );
    }

    let report = run_batch(&jobs, &options);

    if args.json {
        output::print_json(&report)?;
    } else {
        output::print_batch(&report);
    }
    Ok(report.is_success())
}
