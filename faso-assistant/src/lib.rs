//! Answer generation and chat orchestration for the faso-guide assistant.
//!
//! The [`Assistant`] drives one request end-to-end: retrieve context
//! through `faso-rag`, generate an answer through the three-tier
//! [`AnswerGenerator`], attach sources, and package a [`ChatResult`].
//! When retrieval itself is unavailable it degrades to the keyword search
//! in [`keyword`] rather than failing the request — every well-formed
//! query gets a best-effort answer.

pub mod answer;
pub mod engine;
pub mod error;
pub mod keyword;

pub use answer::{Answer, AnswerGenerator, Tier, TierOutcome};
pub use engine::{Assistant, AssistantBuilder, ChatResult};
pub use error::{AssistantError, Result};
