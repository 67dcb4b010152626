//! Error types for splice-core

use std::path::PathBuf;

/// Result type for splice-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning or running a batch
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Blocks(#[from] splice_blocks::Error),

    #[error(transparent)]
    Fs(#[from] splice_fs::Error),

    #[error("Invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("{path} changed on disk while it was being edited; not overwriting")]
    ConcurrentModification { path: PathBuf },
}

impl Error {
    /// True when the document was readable but has no block for the key.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::Blocks(e) if e.is_key_not_found())
    }

    pub fn invalid_manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }
}
