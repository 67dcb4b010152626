//! Per-document and per-batch reports

use serde::{Deserialize, Serialize};
use splice_blocks::Span;
use splice_fs::LineEnding;

use crate::diff::TextChange;

/// What happened to one edit within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EditStatus {
    /// The block was replaced.
    Replaced { span: Span, line: usize },
    /// The block already held exactly the replacement text.
    Unchanged { span: Span, line: usize },
    /// The key has no line-anchored block in this document.
    KeyNotFound,
    /// The edit could not be applied.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditOutcome {
    pub key: String,
    #[serde(flatten)]
    pub status: EditStatus,
}

/// Overall status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// At least one block was replaced and the document was (or, in a dry
    /// run, would be) written.
    Updated,
    /// Every edit found its block already up to date.
    Unchanged,
    /// No edit found its key; the document was left alone.
    Skipped,
    /// The document could not be read, edited or written; nothing was
    /// written.
    Failed,
}

/// Report for a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub path: String,
    pub status: DocumentStatus,
    pub dry_run: bool,
    pub edits: Vec<EditOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_ending: Option<LineEnding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_after: Option<String>,
    /// Document-level failure such as an unreadable file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<TextChange>,
}

impl DocumentReport {
    /// A document that failed before any edit could run.
    pub fn failed(path: impl Into<String>, dry_run: bool, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: DocumentStatus::Failed,
            dry_run,
            edits: Vec::new(),
            line_ending: None,
            checksum_before: None,
            checksum_after: None,
            error: Some(error.into()),
            change: None,
        }
    }

    /// Derive the document status from its edit outcomes.
    pub fn status_from(edits: &[EditOutcome]) -> DocumentStatus {
        let any = |pred: fn(&EditStatus) -> bool| edits.iter().any(|e| pred(&e.status));

        if any(|s| matches!(s, EditStatus::Failed { .. })) {
            DocumentStatus::Failed
        } else if any(|s| matches!(s, EditStatus::Replaced { .. })) {
            DocumentStatus::Updated
        } else if any(|s| matches!(s, EditStatus::Unchanged { .. })) {
            DocumentStatus::Unchanged
        } else {
            DocumentStatus::Skipped
        }
    }

    /// True if nothing in this document needs attention.
    pub fn is_success(&self) -> bool {
        self.status != DocumentStatus::Failed
            && !self
                .edits
                .iter()
                .any(|e| matches!(e.status, EditStatus::KeyNotFound | EditStatus::Failed { .. }))
    }
}

/// Report for a whole batch, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    pub fn new(documents: Vec<DocumentReport>) -> Self {
        Self { documents }
    }

    pub fn count(&self, status: DocumentStatus) -> usize {
        self.documents.iter().filter(|d| d.status == status).count()
    }

    /// True when every document succeeded and every key was found.
    pub fn is_success(&self) -> bool {
        self.documents.iter().all(DocumentReport::is_success)
    }

    /// One-line summary, e.g. `2 updated, 0 unchanged, 1 skipped, 0 failed`.
    pub fn summary(&self) -> String {
        format!(
            "{} updated, {} unchanged, {} skipped, {} failed",
            self.count(DocumentStatus::Updated),
            self.count(DocumentStatus::Unchanged),
            self.count(DocumentStatus::Skipped),
            self.count(DocumentStatus::Failed),
        )
    }
}

/// Where a key's block sits in a document, for read-only inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateReport {
    pub path: String,
    pub key: String,
    pub span: Span,
    pub line: usize,
    pub end_line: usize,
    pub line_ending: LineEnding,
}
