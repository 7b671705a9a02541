//! Vector index abstraction over cosine-space storage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::DocMetadata;
use crate::error::Result;

/// One indexed entry: a document's text, embedding, and metadata, keyed by
/// the same id as the source [`Document`](crate::Document).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Id of the source document.
    pub id: String,
    /// The document text.
    pub text: String,
    /// The document's embedding vector.
    pub embedding: Vec<f32>,
    /// The document metadata.
    pub metadata: DocMetadata,
}

/// A nearest-neighbor hit returned by [`VectorIndex::query`].
#[derive(Debug, Clone)]
pub struct IndexHit {
    /// Id of the matched entry.
    pub id: String,
    /// Text of the matched entry.
    pub text: String,
    /// Metadata of the matched entry.
    pub metadata: DocMetadata,
    /// Cosine distance to the query vector: `1 - cosine_similarity`,
    /// in `[0, 2]`.
    pub distance: f32,
}

/// Storage for embedding vectors with nearest-neighbor search.
///
/// The index owns a derived copy of the corpus; the canonical document
/// list lives in the document store. Writes are mutually exclusive with
/// each other; reads may proceed concurrently.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Add or overwrite entries keyed by id.
    ///
    /// Pre-conditions: every id is non-empty and every embedding matches
    /// the index dimension. A violation fails the whole batch without
    /// applying any of it.
    async fn upsert(&self, records: &[IndexRecord]) -> Result<()>;

    /// Return up to `k` entries nearest to `vector`, ordered by ascending
    /// cosine distance. An empty index or `k == 0` yields an empty list,
    /// not an error.
    async fn query(&self, vector: &[f32], k: usize) -> Result<Vec<IndexHit>>;

    /// Atomically discard every entry, keeping the same cosine-space
    /// configuration and dimension.
    ///
    /// The reset is observable as complete before any subsequent upsert is
    /// accepted; the defined recovery path when the corpus changes is
    /// reset followed by a full reload.
    async fn reset(&self) -> Result<()>;

    /// Number of entries currently stored.
    async fn count(&self) -> Result<usize>;
}
