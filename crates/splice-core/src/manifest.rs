//! Edit manifests
//!
//! A manifest lists which block to replace, with what, in which files:
//!
//! ```toml
//! [defaults]
//! delimiters = "{}"
//! scan = "naive"
//!
//! [[edit]]
//! key = "bigramNarrative"
//! replacement_file = "snippets/bigram.ts"
//! files = ["src/i18n/en.ts", "src/i18n/es.ts"]
//! ```
//!
//! Relative paths resolve against the manifest's own directory. JSON and
//! YAML manifests use the same field names.

use serde::{Deserialize, Serialize};
use splice_blocks::locator::validate_key;
use splice_blocks::{BlockOptions, DelimiterPair, ScanMode};
use splice_fs::{ConfigStore, NormalizedPath, io};

use crate::engine::Job;
use crate::{Error, Result};

/// Settings applied to every edit unless the edit overrides them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestDefaults {
    pub delimiters: DelimiterPair,
    pub scan: ScanMode,
    /// Rewrite the replacement's line breaks to the target document's
    /// convention before splicing.
    pub match_line_endings: bool,
}

/// One named block replacement applied to a list of files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSpec {
    pub key: String,
    /// Inline replacement text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// File holding the replacement text, read verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_file: Option<String>,
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<DelimiterPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan: Option<ScanMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_line_endings: Option<bool>,
}

/// A parsed edit manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub defaults: ManifestDefaults,
    #[serde(default, rename = "edit", alias = "edits")]
    pub edits: Vec<EditSpec>,
}

impl Manifest {
    /// Load a manifest, choosing the format from the file extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let manifest: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, edits = manifest.edits.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Expand every edit into one job per file.
    ///
    /// `manifest_path` anchors relative paths and names the manifest in
    /// validation errors.
    pub fn jobs(&self, manifest_path: &NormalizedPath) -> Result<Vec<Job>> {
        let base = manifest_path.parent();
        let invalid = |message: String| Error::invalid_manifest(manifest_path.to_native(), message);

        if self.edits.is_empty() {
            return Err(invalid("no edits listed".to_string()));
        }

        let mut jobs = Vec::new();
        for (index, spec) in self.edits.iter().enumerate() {
            let label = format!("edit #{} ('{}')", index + 1, spec.key);
            let options = BlockOptions {
                delimiters: spec.delimiters.unwrap_or(self.defaults.delimiters),
                scan: spec.scan.unwrap_or(self.defaults.scan),
            };

            validate_key(&spec.key, options.delimiters)
                .map_err(|e| invalid(format!("{label}: {e}")))?;

            if spec.files.is_empty() {
                return Err(invalid(format!("{label}: no files listed")));
            }

            let replacement = match (&spec.replacement, &spec.replacement_file) {
                (Some(text), None) => text.clone(),
                (None, Some(file)) => {
                    let path = NormalizedPath::resolve_against(file, base.as_ref());
                    io::read_document(&path)?
                }
                (Some(_), Some(_)) => {
                    return Err(invalid(format!(
                        "{label}: set either 'replacement' or 'replacement_file', not both"
                    )));
                }
                (None, None) => {
                    return Err(invalid(format!(
                        "{label}: one of 'replacement' or 'replacement_file' is required"
                    )));
                }
            };

            let match_line_endings = spec
                .match_line_endings
                .unwrap_or(self.defaults.match_line_endings);

            for file in &spec.files {
                jobs.push(Job {
                    path: NormalizedPath::resolve_against(file, base.as_ref()),
                    key: spec.key.clone(),
                    replacement: replacement.clone(),
                    options,
                    match_line_endings,
                });
            }
        }

        Ok(jobs)
    }
}
