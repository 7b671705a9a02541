//! Query-time retrieval: encode, search, filter.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::RetrievalConfig;
use crate::document::RetrievedMatch;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::VectorIndex;

/// Composes an [`EmbeddingProvider`] and a [`VectorIndex`] into the
/// query-time retrieval step.
///
/// Guarantees, for `retrieve(query, Some(k))`:
///
/// - at most `k` matches are returned (`k == 0` yields none);
/// - every match carries `similarity >= similarity_threshold`;
/// - matches are ordered by non-increasing similarity, and filtering never
///   reorders the raw nearest-neighbor list.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a retriever over the given provider and index.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        config: RetrievalConfig,
    ) -> Self {
        Self { embedder, index, config }
    }

    /// The retrieval configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Retrieve the documents most relevant to `query`.
    ///
    /// `top_k` overrides the configured default when set. An empty index
    /// is not an error — it simply yields no matches.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Retrieval`] when the encoder or index is
    /// unreachable; the orchestrator treats that as a recoverable,
    /// degraded-mode condition.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<RetrievedMatch>> {
        let k = top_k.unwrap_or(self.config.top_k);
        if k == 0 {
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query).await.map_err(|e| {
            debug!(error = %e, "query embedding failed");
            RagError::Retrieval(format!("query embedding failed: {e}"))
        })?;

        let hits = self.index.query(&vector, k).await.map_err(|e| {
            debug!(error = %e, "index query failed");
            RagError::Retrieval(format!("index query failed: {e}"))
        })?;

        let threshold = self.config.similarity_threshold;
        let matches: Vec<RetrievedMatch> = hits
            .into_iter()
            .filter_map(|hit| {
                let similarity = 1.0 - hit.distance;
                (similarity >= threshold).then(|| RetrievedMatch {
                    id: hit.id,
                    text: hit.text,
                    metadata: hit.metadata,
                    similarity,
                })
            })
            .collect();

        info!(retrieved = matches.len(), requested = k, "retrieval completed");
        Ok(matches)
    }
}
