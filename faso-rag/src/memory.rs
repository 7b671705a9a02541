//! In-process vector index using cosine similarity.
//!
//! [`MemoryVectorIndex`] keeps entries in a `HashMap` behind a
//! `tokio::sync::RwLock`. When opened with a snapshot path it rewrites a
//! JSON snapshot on every mutation and reloads it on open, which is enough
//! durability for a single-process, single-corpus deployment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{RagError, Result};
use crate::index::{IndexHit, IndexRecord, VectorIndex};

const BACKEND: &str = "memory";

/// An in-process cosine-space vector index with optional JSON snapshots.
///
/// The dimension is fixed at construction and every upsert is checked
/// against it: a model change produces vectors of a different dimension
/// (or different semantics at the same dimension), so the only supported
/// migration is constructing a fresh index and reingesting the corpus.
#[derive(Debug)]
pub struct MemoryVectorIndex {
    dimensions: usize,
    entries: RwLock<HashMap<String, IndexRecord>>,
    snapshot: Option<PathBuf>,
}

impl MemoryVectorIndex {
    /// Create an empty, non-persistent index for vectors of `dimensions`.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, entries: RwLock::new(HashMap::new()), snapshot: None }
    }

    /// Open an index persisted at `snapshot`, creating parent directories
    /// as needed.
    ///
    /// A missing snapshot yields an empty index. A malformed snapshot, or
    /// one written by a model with a different dimension, is discarded
    /// with a warning — stale vectors must never mix with fresh ones.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Index`] if the snapshot location is unusable;
    /// that is a startup failure.
    pub async fn open(dimensions: usize, snapshot: impl AsRef<Path>) -> Result<Self> {
        let snapshot = snapshot.as_ref().to_path_buf();
        if let Some(parent) = snapshot.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| RagError::Index {
                backend: BACKEND.into(),
                message: format!("cannot create snapshot directory {}: {e}", parent.display()),
            })?;
        }

        let entries = match tokio::fs::read(&snapshot).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<IndexRecord>>(&bytes) {
                Ok(records) => {
                    if records.iter().any(|r| r.embedding.len() != dimensions) {
                        warn!(
                            path = %snapshot.display(),
                            dimensions,
                            "snapshot has mismatched dimensions, starting empty"
                        );
                        HashMap::new()
                    } else {
                        info!(path = %snapshot.display(), count = records.len(), "loaded index snapshot");
                        records.into_iter().map(|r| (r.id.clone(), r)).collect()
                    }
                }
                Err(e) => {
                    warn!(path = %snapshot.display(), error = %e, "malformed snapshot, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(RagError::Index {
                    backend: BACKEND.into(),
                    message: format!("cannot read snapshot {}: {e}", snapshot.display()),
                });
            }
        };

        Ok(Self { dimensions, entries: RwLock::new(entries), snapshot: Some(snapshot) })
    }

    /// The fixed vector dimension of this index generation.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn persist(&self, entries: &HashMap<String, IndexRecord>) -> Result<()> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };
        let mut records: Vec<&IndexRecord> = entries.values().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        let bytes = serde_json::to_vec_pretty(&records).map_err(|e| RagError::Index {
            backend: BACKEND.into(),
            message: format!("cannot serialize snapshot: {e}"),
        })?;
        tokio::fs::write(path, bytes).await.map_err(|e| RagError::Index {
            backend: BACKEND.into(),
            message: format!("cannot write snapshot {}: {e}", path.display()),
        })
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for MemoryVectorIndex {
    async fn upsert(&self, records: &[IndexRecord]) -> Result<()> {
        // Validate the whole batch before touching the map so a violation
        // leaves the index unchanged.
        for record in records {
            if record.id.is_empty() {
                return Err(RagError::Index {
                    backend: BACKEND.into(),
                    message: "record ids must be non-empty".into(),
                });
            }
            if record.embedding.len() != self.dimensions {
                return Err(RagError::Index {
                    backend: BACKEND.into(),
                    message: format!(
                        "embedding for '{}' has dimension {}, index expects {}",
                        record.id,
                        record.embedding.len(),
                        self.dimensions
                    ),
                });
            }
        }

        let mut entries = self.entries.write().await;
        for record in records {
            entries.insert(record.id.clone(), record.clone());
        }
        self.persist(&entries).await
    }

    async fn query(&self, vector: &[f32], k: usize) -> Result<Vec<IndexHit>> {
        if vector.len() != self.dimensions {
            return Err(RagError::Index {
                backend: BACKEND.into(),
                message: format!(
                    "query vector has dimension {}, index expects {}",
                    vector.len(),
                    self.dimensions
                ),
            });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let entries = self.entries.read().await;
        let mut hits: Vec<IndexHit> = entries
            .values()
            .map(|record| IndexHit {
                id: record.id.clone(),
                text: record.text.clone(),
                metadata: record.metadata.clone(),
                distance: 1.0 - cosine_similarity(&record.embedding, vector),
            })
            .collect();

        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }

    async fn reset(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.persist(&entries).await?;
        info!("vector index reset");
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}
