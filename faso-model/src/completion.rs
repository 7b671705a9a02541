//! The language-generation capability trait and its parameters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sampling parameters for a completion request.
///
/// Read once at startup and reused for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { max_tokens: 512, temperature: 0.7, top_p: 0.9, top_k: 50 }
    }
}

/// A backend that continues a prompt with generated text.
///
/// Callers bound each call with their own timeout; implementations only
/// need to surface backend failures as [`ModelError`](crate::ModelError).
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a continuation for `prompt`.
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String>;

    /// Short backend identifier used in logs.
    fn name(&self) -> &str;
}
