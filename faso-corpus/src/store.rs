//! The canonical document store.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use faso_rag::{DocMetadata, Document};

use crate::error::{CorpusError, Result};
use crate::sample::SAMPLE_DOCUMENTS;
use crate::stats::CorpusStats;

/// Minimum cleaned-text length (in characters) for a document to be
/// admitted to the corpus.
const MIN_TEXT_CHARS: usize = 50;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1F\x7F-\x9F]").unwrap());
static HTML_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

struct Inner {
    documents: Vec<Document>,
    sources: BTreeSet<String>,
}

/// Owns the canonical, ordered document list and the distinct-sources set.
///
/// Documents are immutable once admitted; the corpus changes only through
/// single-document appends or a bulk clear-and-reload. Concurrent readers
/// are fine; mutation takes the write lock.
pub struct DocumentStore {
    inner: RwLock<Inner>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner { documents: Vec::new(), sources: BTreeSet::new() }) }
    }

    /// Clean raw text: collapse whitespace runs, strip control characters
    /// and residual HTML tags.
    pub fn clean_text(text: &str) -> String {
        let text = WHITESPACE.replace_all(text, " ");
        let text = CONTROL_CHARS.replace_all(&text, "");
        let text = HTML_TAGS.replace_all(&text, "");
        text.trim().to_string()
    }

    /// Clean and admit a document, assigning it the next sequential id.
    ///
    /// Returns the assigned id, or `None` when the cleaned text is shorter
    /// than 50 characters (logged and skipped, not an error). A non-empty
    /// `url` is also recorded in the distinct-sources set.
    pub async fn add_document(
        &self,
        text: &str,
        title: &str,
        url: &str,
        category: &str,
        source_type: &str,
    ) -> Option<String> {
        let cleaned = Self::clean_text(text);
        if cleaned.chars().count() < MIN_TEXT_CHARS {
            debug!(title, "document too short, skipped");
            return None;
        }

        let mut inner = self.inner.write().await;
        let id = format!("doc_{}", inner.documents.len() + 1);
        inner.documents.push(Document {
            id: id.clone(),
            text: cleaned,
            metadata: DocMetadata {
                title: title.to_string(),
                url: url.to_string(),
                category: category.to_string(),
                source_type: source_type.to_string(),
                added_date: chrono::Local::now().to_rfc3339(),
            },
        });
        if !url.is_empty() {
            inner.sources.insert(url.to_string());
        }

        debug!(%id, title, "document added");
        Some(id)
    }

    /// Admit the built-in sample data set.
    pub async fn seed_samples(&self) -> usize {
        let mut added = 0;
        for sample in SAMPLE_DOCUMENTS {
            if self
                .add_document(sample.text, sample.title, "", sample.category, "manual")
                .await
                .is_some()
            {
                added += 1;
            }
        }
        info!(added, "sample documents seeded");
        added
    }

    /// A snapshot of the stored documents, in admission order.
    pub async fn documents(&self) -> Vec<Document> {
        self.inner.read().await.documents.clone()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.inner.read().await.documents.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.documents.is_empty()
    }

    /// Discard every document and source.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.documents.clear();
        inner.sources.clear();
    }

    /// Replace the store contents with documents from the corpus file.
    ///
    /// A missing file empties the store and returns 0 (logged, not an
    /// error). A malformed file also empties the store but surfaces a
    /// recoverable [`CorpusError::Malformed`] so the caller can report it.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "corpus file not found, starting empty");
                self.clear().await;
                return Ok(0);
            }
            Err(e) => {
                return Err(CorpusError::Io { path: path.display().to_string(), source: e });
            }
        };

        let documents: Vec<Document> = match serde_json::from_slice(&bytes) {
            Ok(documents) => documents,
            Err(e) => {
                self.clear().await;
                return Err(CorpusError::Malformed {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        let mut inner = self.inner.write().await;
        inner.sources = documents
            .iter()
            .filter(|d| !d.metadata.url.is_empty())
            .map(|d| d.metadata.url.clone())
            .collect();
        let count = documents.len();
        inner.documents = documents;

        info!(path = %path.display(), count, "corpus loaded");
        Ok(count)
    }

    /// Write the corpus as pretty JSON, creating parent directories.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| CorpusError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
        }

        let documents = self.documents().await;
        let bytes = serde_json::to_vec_pretty(&documents).map_err(CorpusError::Encode)?;
        tokio::fs::write(path, bytes).await.map_err(|e| CorpusError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        info!(path = %path.display(), count = documents.len(), "corpus saved");
        Ok(())
    }

    /// Write the distinct sources, sorted, one per line.
    pub async fn save_sources(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| CorpusError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
        }

        let inner = self.inner.read().await;
        let mut out = String::new();
        for source in &inner.sources {
            out.push_str(source);
            out.push('\n');
        }
        tokio::fs::write(path, out).await.map_err(|e| CorpusError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Derived corpus statistics.
    pub async fn statistics(&self) -> CorpusStats {
        let inner = self.inner.read().await;
        CorpusStats::compute(&inner.documents, inner.sources.len())
    }
}
