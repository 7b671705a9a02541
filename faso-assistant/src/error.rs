//! Error types for the `faso-assistant` crate.

use thiserror::Error;

/// Errors surfaced by the assistant.
///
/// Generation-tier and retrieval failures never appear here — they are
/// absorbed by the fallback tiers. What remains is the one client error
/// and the failures of administrative operations.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The query was empty or whitespace-only; rejected before any
    /// retrieval or generation work.
    #[error("query must not be empty")]
    EmptyQuery,

    /// Invalid assistant composition.
    #[error("assistant configuration error: {0}")]
    Config(String),

    /// A retrieval-layer failure during an administrative operation.
    #[error(transparent)]
    Rag(#[from] faso_rag::RagError),
}

/// A convenience result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
