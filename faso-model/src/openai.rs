//! OpenAI-compatible completions client.
//!
//! Speaks the legacy `/completions` protocol rather than the chat one:
//! the answer pipeline builds a single continuation prompt (context,
//! question, lead-in) and wants the raw continuation back. Local servers
//! in the Ollama/vLLM family expose this endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::completion::{GenerationParams, LanguageModel};
use crate::error::{ModelError, Result};

/// A [`LanguageModel`] backed by an OpenAI-compatible `/completions`
/// endpoint.
pub struct OpenAiCompletions {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiCompletions {
    /// Create a client for the given server base URL and model name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if either value is empty; this is a
    /// startup failure.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let model = model.into();
        if base_url.is_empty() {
            return Err(ModelError::Config("base URL must not be empty".into()));
        }
        if model.is_empty() {
            return Err(ModelError::Config("model name must not be empty".into()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            model,
        })
    }

    /// Set a bearer token for authenticated servers.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

// ── wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl LanguageModel for OpenAiCompletions {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "requesting completion");

        let url = format!("{}/completions", self.base_url);
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "completion request failed");
            ModelError::Api {
                provider: "openai-compatible".into(),
                message: format!("request failed: {e}"),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(%status, "completion API error");
            return Err(ModelError::Api {
                provider: "openai-compatible".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse completion response");
            ModelError::Api {
                provider: "openai-compatible".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            // A blank continuation is unusable output; callers fall
            // through to the next answer tier.
            return Err(ModelError::Generation("backend returned an empty completion".into()));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}
