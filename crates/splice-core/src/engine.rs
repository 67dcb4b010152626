//! Per-document replace cycles and batch execution
//!
//! Each document goes through read -> locate -> balance -> splice -> write
//! on its own. Jobs are grouped by document so a document is read once,
//! receives its edits in manifest order and is written at most once. A
//! failure in one document never touches another.

use std::collections::HashMap;
use std::thread;

use splice_blocks::locator::{line_number, locate_key};
use splice_blocks::{BlockOptions, Document, find_block_end};
use splice_fs::checksum::compute_content_checksum;
use splice_fs::{LineEnding, NormalizedPath, RobustnessConfig, io};

use crate::diff::TextChange;
use crate::report::{
    BatchReport, DocumentReport, DocumentStatus, EditOutcome, EditStatus, LocateReport,
};
use crate::{Error, Result};

/// One block replacement in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub path: NormalizedPath,
    pub key: String,
    pub replacement: String,
    pub options: BlockOptions,
    pub match_line_endings: bool,
}

/// How a batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute everything and attach diffs, but write nothing.
    pub dry_run: bool,
    /// Process distinct documents on separate threads.
    pub parallel: bool,
    pub robustness: RobustnessConfig,
}

/// Group jobs by document, keeping first-appearance order for documents
/// and manifest order for the jobs of each document.
///
/// Paths are compared in canonical form, so `dir/en.ts` and `dir/./en.ts`
/// land in one group. Each group is reported under the first spelling
/// that named it.
pub fn plan(jobs: &[Job]) -> Vec<(NormalizedPath, Vec<&Job>)> {
    let mut groups: Vec<(NormalizedPath, Vec<&Job>)> = Vec::new();
    let mut index: HashMap<NormalizedPath, usize> = HashMap::new();

    for job in jobs {
        let key = job.path.canonical();
        match index.get(&key) {
            Some(&i) => groups[i].1.push(job),
            None => {
                index.insert(key, groups.len());
                groups.push((job.path.clone(), vec![job]));
            }
        }
    }
    groups
}

/// Run every job and report per document.
pub fn run_batch(jobs: &[Job], options: &RunOptions) -> BatchReport {
    let groups = plan(jobs);
    tracing::info!(
        documents = groups.len(),
        jobs = jobs.len(),
        dry_run = options.dry_run,
        parallel = options.parallel,
        "starting batch"
    );

    let documents = if options.parallel && groups.len() > 1 {
        thread::scope(|scope| {
            let handles: Vec<_> = groups
                .iter()
                .map(|(path, group)| {
                    let handle = scope.spawn(move || process_document(path, group, options));
                    (path, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(path, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        let reason = "worker thread panicked";
                        DocumentReport::failed(path.as_str(), options.dry_run, reason)
                    })
                })
                .collect()
        })
    } else {
        groups
            .iter()
            .map(|(path, group)| process_document(path, group, options))
            .collect()
    };

    let report = BatchReport::new(documents);
    tracing::info!(summary = %report.summary(), "batch finished");
    report
}

/// Apply `jobs`, all targeting `path`, and write the result once.
///
/// Nothing is written if any edit fails or if no edit changes the text.
pub fn process_document(
    path: &NormalizedPath,
    jobs: &[&Job],
    options: &RunOptions,
) -> DocumentReport {
    let original = match io::read_document(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "cannot read document");
            return DocumentReport::failed(path.as_str(), options.dry_run, e.to_string());
        }
    };

    let line_ending = LineEnding::detect(&original);
    let checksum_before = compute_content_checksum(&original);

    let mut document = Document::new(original.clone());
    let mut edits = Vec::with_capacity(jobs.len());
    for job in jobs {
        let (next, status) = apply_job(document, job, line_ending);
        if let EditStatus::KeyNotFound = status {
            tracing::warn!(path = %path, key = %job.key, "key not found, edit skipped");
        }
        document = next;
        edits.push(EditOutcome {
            key: job.key.clone(),
            status,
        });
    }

    let mut report = DocumentReport {
        path: path.to_string(),
        status: DocumentReport::status_from(&edits),
        dry_run: options.dry_run,
        edits,
        line_ending: Some(line_ending),
        checksum_before: Some(checksum_before.clone()),
        checksum_after: None,
        error: None,
        change: None,
    };

    if report.status != DocumentStatus::Updated {
        return report;
    }

    let updated = document.into_source();
    report.checksum_after = Some(compute_content_checksum(&updated));

    if options.dry_run {
        report.change = Some(TextChange::compute(path.as_str(), &original, &updated));
        return report;
    }

    if let Err(e) = persist(path, &checksum_before, &updated, options.robustness) {
        tracing::warn!(path = %path, error = %e, "write failed");
        report.status = DocumentStatus::Failed;
        report.checksum_after = None;
        report.error = Some(e.to_string());
    }
    report
}

/// Run one job against the current document text.
fn apply_job(document: Document, job: &Job, line_ending: LineEnding) -> (Document, EditStatus) {
    let replacement = if job.match_line_endings {
        line_ending.apply_to(&job.replacement)
    } else {
        job.replacement.clone()
    };

    let span = match document.locate(&job.key, &job.options) {
        Ok(span) => span,
        Err(e) if e.is_key_not_found() => return (document, EditStatus::KeyNotFound),
        Err(e) => {
            return (
                document,
                EditStatus::Failed {
                    reason: e.to_string(),
                },
            );
        }
    };
    let line = line_number(document.source(), span.start);

    if document.block(span).is_ok_and(|current| current == replacement) {
        return (document, EditStatus::Unchanged { span, line });
    }

    let mut document = document;
    if let Err(e) = document.stage(span, replacement) {
        return (
            document,
            EditStatus::Failed {
                reason: e.to_string(),
            },
        );
    }

    match document.clone().apply() {
        Ok(next) => (next, EditStatus::Replaced { span, line }),
        Err(e) => {
            document.discard();
            (
                document,
                EditStatus::Failed {
                    reason: e.to_string(),
                },
            )
        }
    }
}

/// Write `content` unless the file changed since it was read.
fn persist(
    path: &NormalizedPath,
    expected_checksum: &str,
    content: &str,
    robustness: RobustnessConfig,
) -> Result<()> {
    io::write_document_if(path, content, expected_checksum, robustness).map_err(|e| match e {
        splice_fs::Error::ChecksumMismatch { path, .. } => Error::ConcurrentModification { path },
        other => Error::Fs(other),
    })
}

/// Find `key`'s block in the document at `path` without changing anything.
pub fn locate_in_document(
    path: &NormalizedPath,
    key: &str,
    options: &BlockOptions,
) -> Result<LocateReport> {
    let source = io::read_document(path)?;
    let found = locate_key(&source, key, options.delimiters)?;
    let end = find_block_end(&source, found.open, options.delimiters, options.scan)?;

    Ok(LocateReport {
        path: path.to_string(),
        key: key.to_string(),
        span: splice_blocks::Span::new(found.start, end),
        line: found.line,
        end_line: line_number(&source, end - 1),
        line_ending: LineEnding::detect(&source),
    })
}
