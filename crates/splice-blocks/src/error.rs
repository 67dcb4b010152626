//! Error types for splice-blocks

/// Result type for splice-blocks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or replacing a block
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Key not found: '{key}'")]
    KeyNotFound { key: String },

    #[error("Unbalanced block starting at byte {start}: {reason}")]
    UnbalancedBlock { start: usize, reason: Unbalance },

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("Invalid delimiters '{value}': {reason}")]
    InvalidDelimiters { value: String, reason: &'static str },

    #[error("Span {start}..{end} is not valid for a document of {len} bytes")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("Document already has a pending edit")]
    EditPending,
}

/// Why a delimiter scan failed to close a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unbalance {
    /// End of input before any opening delimiter.
    NoOpening,
    /// End of input with the depth counter away from zero.
    Unclosed { depth: isize },
}

impl std::fmt::Display for Unbalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoOpening => f.write_str("no opening delimiter found"),
            Self::Unclosed { depth } if *depth < 0 => {
                write!(f, "{} unmatched closing delimiter(s)", depth.unsigned_abs())
            }
            Self::Unclosed { depth } => write!(f, "{depth} delimiter(s) left unclosed"),
        }
    }
}

impl Error {
    pub fn invalid_key(key: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason,
        }
    }

    /// True for the one error a batch treats as "skip this document".
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}
