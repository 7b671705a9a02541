//! Derived corpus statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use faso_rag::Document;

/// Aggregate figures derived from the stored documents.
///
/// Purely informational; recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    /// Number of stored documents.
    pub total_documents: usize,
    /// Total text length in characters.
    pub total_characters: usize,
    /// Total word count (whitespace-separated).
    pub total_words: usize,
    /// Average document length in characters (integer division, 0 when
    /// the corpus is empty).
    pub average_doc_length: usize,
    /// Document count per category; uncategorized documents fall under
    /// `unknown`.
    pub categories: BTreeMap<String, usize>,
    /// Number of distinct source URLs.
    pub sources: usize,
}

impl CorpusStats {
    pub(crate) fn compute(documents: &[Document], sources: usize) -> Self {
        let total_documents = documents.len();
        let total_characters: usize = documents.iter().map(|d| d.text.chars().count()).sum();
        let total_words: usize =
            documents.iter().map(|d| d.text.split_whitespace().count()).sum();

        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let category = if doc.metadata.category.is_empty() {
                "unknown"
            } else {
                doc.metadata.category.as_str()
            };
            *categories.entry(category.to_string()).or_default() += 1;
        }

        Self {
            total_documents,
            total_characters,
            total_words,
            average_doc_length: if total_documents > 0 {
                total_characters / total_documents
            } else {
                0
            },
            categories,
            sources,
        }
    }
}
