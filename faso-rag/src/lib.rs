//! Retrieval core for the faso-guide tourism assistant.
//!
//! This crate implements the semantic half of the RAG pipeline:
//!
//! - [`EmbeddingProvider`] — capability trait mapping text to dense vectors,
//!   with an OpenAI-compatible HTTP implementation ([`OpenAiEmbedder`])
//! - [`VectorIndex`] — capability trait over cosine-space storage, with an
//!   in-process implementation ([`MemoryVectorIndex`]) that can snapshot
//!   itself to disk
//! - [`Retriever`] — composes the two: encode a query, run nearest-neighbor
//!   search, filter by similarity threshold
//!
//! Answer generation and orchestration live in `faso-assistant`; this crate
//! knows nothing about prompts or fallback tiers.

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod memory;
pub mod openai;
pub mod retriever;

pub use config::RetrievalConfig;
pub use document::{DocMetadata, Document, RetrievedMatch, SourceRef};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use index::{IndexHit, IndexRecord, VectorIndex};
pub use memory::MemoryVectorIndex;
pub use openai::OpenAiEmbedder;
pub use retriever::Retriever;
