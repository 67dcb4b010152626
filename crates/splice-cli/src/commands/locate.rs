//! `keysplice locate`

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;
use splice_core::{LocateReport, locate_in_document};
use splice_fs::NormalizedPath;

use crate::cli::BlockArgs;
use crate::error::Result;
use crate::output;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum LocateResult {
    Found(LocateReport),
    /// The document has no block for the key.
    Missing { path: String, error: String },
    /// The document could not be read or its block does not balance.
    Failed { path: String, error: String },
}

/// Report where `key`'s block sits in each file. Reads only.
pub fn run_locate(key: &str, files: &[PathBuf], block: &BlockArgs, json: bool) -> Result<bool> {
    let options = block.options();
    let mut all_found = true;

    let results: Vec<LocateResult> = files
        .iter()
        .map(|file| {
            let path = NormalizedPath::new(file);
            match locate_in_document(&path, key, &options) {
                Ok(found) => LocateResult::Found(found),
                Err(e) => {
                    all_found = false;
                    let (path, error) = (path.to_string(), e.to_string());
                    if e.is_key_not_found() {
                        LocateResult::Missing { path, error }
                    } else {
                        LocateResult::Failed { path, error }
                    }
                }
            }
        })
        .collect();

    if json {
        output::print_json(&results)?;
        return Ok(all_found);
    }

    for result in &results {
        match result {
            LocateResult::Found(found) => println!(
                "{} {}: '{}' at lines {}-{} (bytes {}, {} line endings)",
                "found".green().bold(),
                found.path.cyan(),
                found.key,
                found.line,
                found.end_line,
                found.span,
                found.line_ending
            ),
            LocateResult::Missing { path, error } => {
                println!("{} {}: {}", "missing".yellow().bold(), path.cyan(), error)
            }
            LocateResult::Failed { path, error } => {
                println!("{} {}: {}", "failed".red().bold(), path.cyan(), error)
            }
        }
    }
    Ok(all_found)
}
