//! Human and JSON rendering of reports

use colored::Colorize;
use serde::Serialize;
use splice_core::{BatchReport, DocumentReport, DocumentStatus, EditStatus};

use crate::error::Result;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print one line per document, one indented line per edit, and a summary.
pub fn print_batch(report: &BatchReport) {
    for document in &report.documents {
        print_document(document);
    }
    println!();

    let summary = report.summary();
    if report.is_success() {
        println!("{} {}", "OK".green().bold(), summary);
    } else {
        println!("{} {}", "INCOMPLETE".yellow().bold(), summary);
    }
}

fn print_document(document: &DocumentReport) {
    let label = match (document.status, document.dry_run) {
        (DocumentStatus::Updated, true) => "would update".cyan().bold(),
        (DocumentStatus::Updated, false) => "updated".green().bold(),
        (DocumentStatus::Unchanged, _) => "unchanged".dimmed(),
        (DocumentStatus::Skipped, _) => "skipped".yellow().bold(),
        (DocumentStatus::Failed, _) => "failed".red().bold(),
    };

    match &document.error {
        Some(error) => println!("{} {}: {}", label, document.path.cyan(), error),
        None => println!("{} {}", label, document.path.cyan()),
    }

    for edit in &document.edits {
        let detail = match &edit.status {
            EditStatus::Replaced { line, .. } => format!("replaced block at line {line}"),
            EditStatus::Unchanged { line, .. } => format!("already up to date at line {line}"),
            EditStatus::KeyNotFound => "key not found".yellow().to_string(),
            EditStatus::Failed { reason } => reason.red().to_string(),
        };
        println!("   {} key '{}': {}", "-".dimmed(), edit.key, detail);
    }

    if let Some(change) = &document.change {
        println!(
            "   {} +{} -{} lines",
            "~".dimmed(),
            change.lines_added,
            change.lines_removed
        );
        for line in change.unified.lines() {
            let rendered = if line.starts_with("+++") || line.starts_with("---") {
                line.bold()
            } else if line.starts_with('+') {
                line.green()
            } else if line.starts_with('-') {
                line.red()
            } else if line.starts_with("@@") {
                line.cyan()
            } else {
                line.normal()
            };
            println!("   {}", rendered);
        }
    }
}
