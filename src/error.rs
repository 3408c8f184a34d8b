//! Error types for DL1 archive parsing and LZ decompression

use thiserror::Error;

/// Result type for DL1 operations
pub type Result<T> = std::result::Result<T, Error>;

/// DL1 error types
#[derive(Error, Debug)]
pub enum Error {
    /// The container header or entry table is not a valid DL1 layout
    #[error("Invalid DL1 file: {reason}")]
    InvalidFormat { reason: String },

    /// The source ended before a header, table or entry was fully read
    #[error("Truncated input at offset {offset}: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        offset: u64,
        expected: u64,
        actual: u64,
    },

    /// No entry with this name (after case folding)
    #[error("Can't find '{0}'")]
    EntryNotFound(String),

    /// Malformed LZ stream
    #[error("Invalid LZ stream: {0}")]
    InvalidStream(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_format(reason: impl Into<String>) -> Self {
        Error::InvalidFormat {
            reason: reason.into(),
        }
    }
}
