//! `keysplice apply`

use std::path::Path;

use colored::Colorize;
use splice_core::{Manifest, RunOptions, run_batch};
use splice_fs::NormalizedPath;

use crate::error::Result;
use crate::output;

/// Run every edit in the manifest at `manifest_path`.
pub fn run_apply(manifest_path: &Path, options: RunOptions, json: bool) -> Result<bool> {
    let path = NormalizedPath::new(manifest_path);
    let manifest = Manifest::load(&path)?;
    let jobs = manifest.jobs(&path)?;

    if !json {
        println!(
            "{} Applying {} edit(s) from {}...",
            "=>".blue().bold(),
            manifest.edits.len(),
            path.as_str().cyan()
        );
    }

    let report = run_batch(&jobs, &options);

    if json {
        output::print_json(&report)?;
    } else {
        output::print_batch(&report);
    }
    Ok(report.is_success())
}
