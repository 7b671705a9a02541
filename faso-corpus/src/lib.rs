//! Document store and corpus management for the faso-guide assistant.
//!
//! Owns the canonical document list: admission (cleaning plus a minimum
//! length), the corpus JSON file, the sources list, derived statistics,
//! and the built-in sample data set. Independent of search — the vector
//! index keeps its own derived copy of the corpus, keyed by the same ids.

pub mod error;
pub mod sample;
pub mod stats;
pub mod store;

pub use error::{CorpusError, Result};
pub use sample::SAMPLE_DOCUMENTS;
pub use stats::CorpusStats;
pub use store::DocumentStore;
