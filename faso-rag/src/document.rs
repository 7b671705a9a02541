//! Data types for corpus documents and retrieval results.

use serde::{Deserialize, Serialize};

/// Metadata attached to a corpus document.
///
/// Every field defaults to the empty string when absent from the corpus
/// file, so partially annotated documents still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocMetadata {
    /// Human-readable document title.
    pub title: String,
    /// Source URL, empty for hand-written documents.
    pub url: String,
    /// Topical category (`tourisme`, `culture`, ...).
    pub category: String,
    /// How the document entered the corpus (`web`, `pdf`, `manual`).
    pub source_type: String,
    /// RFC 3339 timestamp of when the document was added.
    pub added_date: String,
}

/// A corpus document: cleaned text plus metadata, keyed by a stable id.
///
/// Documents are immutable once stored; the corpus changes only through a
/// bulk clear-and-reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique, stable identifier (`doc_1`, `doc_2`, ...).
    pub id: String,
    /// Cleaned text content.
    pub text: String,
    /// Document metadata.
    #[serde(default)]
    pub metadata: DocMetadata,
}

/// A document retrieved for a query, scored by cosine similarity.
///
/// Produced per-query and never persisted. A batch of matches is always
/// ordered by descending similarity, and every match carries
/// `similarity >= similarity_threshold`.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedMatch {
    /// Id of the underlying [`Document`].
    pub id: String,
    /// The document text.
    pub text: String,
    /// The document metadata.
    pub metadata: DocMetadata,
    /// Cosine similarity to the query, typically in `[0, 1]`.
    pub similarity: f32,
}

/// A source citation projected from a retrieved document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRef {
    /// Document title, or a generic label when the document has none.
    pub title: String,
    /// Source URL, empty when unknown.
    pub url: String,
    /// Similarity score carried over from the match.
    pub similarity: f32,
}

impl RetrievedMatch {
    /// Project this match into a citable source reference.
    pub fn to_source(&self) -> SourceRef {
        let title = if self.metadata.title.is_empty() {
            "Source".to_string()
        } else {
            self.metadata.title.clone()
        };
        SourceRef { title, url: self.metadata.url.clone(), similarity: self.similarity }
    }
}
