//! Error types for the `faso-corpus` crate.

use thiserror::Error;

/// Errors that can occur in corpus operations.
///
/// Both variants are recoverable at the orchestration level: a corpus
/// that cannot be read or parsed is treated as zero documents.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A filesystem operation on a corpus file failed.
    #[error("cannot access corpus file {path}: {source}")]
    Io {
        /// The file that was being accessed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The corpus file exists but is not valid JSON.
    #[error("malformed corpus file {path}: {source}")]
    Malformed {
        /// The file that failed to parse.
        path: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The corpus could not be serialized for saving.
    #[error("cannot encode corpus: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A convenience result type for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
