//! SHA-256 checksums in the canonical `sha256:<hex>` format
//!
//! Used to detect a document changing on disk between the read and the
//! write of a replace cycle.

use sha2::{Digest, Sha256};

use crate::{Error, NormalizedPath, Result};

const PREFIX: &str = "sha256:";

/// Compute the checksum of in-memory content.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the checksum of a document's current bytes on disk.
pub fn compute_file_checksum(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let bytes = std::fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}
