//! Property tests for index search ordering and retriever filtering.

use std::sync::Arc;

use async_trait::async_trait;
use faso_rag::config::RetrievalConfig;
use faso_rag::document::DocMetadata;
use faso_rag::embedding::EmbeddingProvider;
use faso_rag::index::{IndexRecord, VectorIndex};
use faso_rag::memory::MemoryVectorIndex;
use faso_rag::retriever::Retriever;
use proptest::prelude::*;

const DIM: usize = 16;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate an index record with a normalized embedding.
fn arb_record(dim: usize) -> impl Strategy<Value = IndexRecord> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(id, text, embedding)| IndexRecord {
            id,
            text,
            embedding,
            metadata: DocMetadata::default(),
        },
    )
}

/// Returns the same vector for every input; the query vector is then fully
/// under the test's control.
struct FixedEmbedder(Vec<f32>);

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, _text: &str) -> faso_rag::Result<Vec<f32>> {
        Ok(self.0.clone())
    }

    fn dimensions(&self) -> usize {
        self.0.len()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any stored set, query results are ordered by ascending distance
    /// and bounded by both `top_k` and the number of distinct entries.
    #[test]
    fn search_ordered_ascending_and_bounded(
        records in proptest::collection::vec(arb_record(DIM), 1..20),
        query in arb_normalized_embedding(DIM),
        top_k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (hits, unique) = rt.block_on(async {
            let index = MemoryVectorIndex::new(DIM);
            index.upsert(&records).await.unwrap();
            let unique = index.count().await.unwrap();
            (index.query(&query, top_k).await.unwrap(), unique)
        });

        prop_assert!(hits.len() <= top_k);
        prop_assert!(hits.len() <= unique);
        for window in hits.windows(2) {
            prop_assert!(
                window[0].distance <= window[1].distance,
                "hits not in ascending distance order: {} > {}",
                window[0].distance,
                window[1].distance,
            );
        }
    }

    /// The threshold filter returns exactly the above-threshold prefix
    /// semantics: every match clears the threshold, no below-threshold hit
    /// survives, and the surviving order equals the raw hit order.
    #[test]
    fn threshold_filter_is_order_preserving_subset(
        records in proptest::collection::vec(arb_record(DIM), 1..20),
        query in arb_normalized_embedding(DIM),
        threshold in -1.0f32..1.0f32,
        top_k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (matches, raw) = rt.block_on(async {
            let index = Arc::new(MemoryVectorIndex::new(DIM));
            index.upsert(&records).await.unwrap();
            let raw = index.query(&query, top_k).await.unwrap();

            let config = RetrievalConfig::builder()
                .top_k(top_k)
                .similarity_threshold(threshold)
                .build()
                .unwrap();
            let retriever =
                Retriever::new(Arc::new(FixedEmbedder(query.clone())), index, config);
            (retriever.retrieve("ignored", None).await.unwrap(), raw)
        });

        prop_assert!(matches.iter().all(|m| m.similarity >= threshold));
        prop_assert!(matches.len() <= top_k);

        let expected: Vec<&str> = raw
            .iter()
            .filter(|h| 1.0 - h.distance >= threshold)
            .map(|h| h.id.as_str())
            .collect();
        let actual: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }
}
