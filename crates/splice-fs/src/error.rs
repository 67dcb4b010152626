//! Error types for splice-fs

use std::path::PathBuf;

/// Result type for splice-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 (first invalid byte at offset {offset})")]
    InvalidUtf8 { path: PathBuf, offset: usize },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("{path} no longer matches {expected}; not overwriting")]
    ChecksumMismatch { path: PathBuf, expected: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the error refers to, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::InvalidUtf8 { path, .. }
            | Self::ConfigParse { path, .. }
            | Self::LockFailed { path }
            | Self::ChecksumMismatch { path, .. } => Some(path),
            Self::UnsupportedFormat { .. } => None,
        }
    }
}
