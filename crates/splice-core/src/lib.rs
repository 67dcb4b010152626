//! Batch orchestration for keysplice
//!
//! Turns edit manifests into per-document jobs, runs the
//! read/locate/splice/write cycle for each document and collects a report
//! in which every document is either updated, unchanged, skipped or failed
//! with a reason.

pub mod diff;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod report;

pub use diff::TextChange;
pub use engine::{Job, RunOptions, locate_in_document, plan, process_document, run_batch};
pub use error::{Error, Result};
pub use manifest::{EditSpec, Manifest, ManifestDefaults};
pub use report::{
    BatchReport, DocumentReport, DocumentStatus, EditOutcome, EditStatus, LocateReport,
};
