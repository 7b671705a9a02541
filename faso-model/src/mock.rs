//! Deterministic mock backend for tests and offline runs.

use async_trait::async_trait;

use crate::completion::{GenerationParams, LanguageModel};
use crate::error::{ModelError, Result};

/// A [`LanguageModel`] that returns a canned response or always fails.
///
/// Lets the answer pipeline's tier walk be exercised without model
/// weights or a network: the canned mode drives the LLM tier, the failing
/// mode drives the fallthrough to the template tier.
#[derive(Debug, Clone)]
pub struct MockModel {
    response: Option<String>,
}

impl MockModel {
    /// A mock that completes every prompt with `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self { response: Some(response.into()) }
    }

    /// A mock whose every call fails, as an unreachable backend would.
    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, _prompt: &str, _params: &GenerationParams) -> Result<String> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(ModelError::Generation("mock backend configured to fail".into())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
