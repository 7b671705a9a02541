//! Language-generation backends for the faso-guide assistant.
//!
//! Generation is a capability behind the [`LanguageModel`] trait:
//! `complete(prompt, params) -> text`. The assistant composes it as an
//! optional dependency — when no backend is configured the answer
//! pipeline degrades to its template tier instead of failing.
//!
//! Two implementations ship here:
//!
//! - [`OpenAiCompletions`] — client for an OpenAI-compatible
//!   `/completions` endpoint (a local Ollama/vLLM-style server in the
//!   reference deployment)
//! - [`MockModel`] — deterministic canned-response/always-fail double for
//!   tests and offline runs

pub mod completion;
pub mod error;
pub mod mock;
pub mod openai;

pub use completion::{GenerationParams, LanguageModel};
pub use error::{ModelError, Result};
pub use mock::MockModel;
pub use openai::OpenAiCompletions;
