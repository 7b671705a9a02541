//! Error types for the `faso-model` crate.

use thiserror::Error;

/// Errors that can occur when calling a generation backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The backend API rejected or failed the request.
    #[error("model API error ({provider}): {message}")]
    Api {
        /// The backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// Invalid backend configuration.
    #[error("invalid model configuration: {0}")]
    Config(String),

    /// The backend ran but produced unusable output.
    #[error("generation failed: {0}")]
    Generation(String),
}

/// A convenience result type for generation operations.
pub type Result<T> = std::result::Result<T, ModelError>;
