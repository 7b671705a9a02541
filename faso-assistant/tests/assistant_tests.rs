//! End-to-end scenarios for the chat orchestrator.
//!
//! A deterministic bag-of-words embedder stands in for the embedding
//! model: each word of three or more characters hashes to an axis, so
//! texts sharing words land close in cosine space. That is enough for
//! the French capital question to actually retrieve the capital document.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use faso_assistant::{Assistant, AssistantError};
use faso_corpus::DocumentStore;
use faso_model::MockModel;
use faso_rag::{
    DocMetadata, Document, EmbeddingProvider, MemoryVectorIndex, RagError, RetrievalConfig,
};
use tempfile::TempDir;

const DIM: usize = 256;

struct BagOfWordsEmbedder;

#[async_trait]
impl EmbeddingProvider for BagOfWordsEmbedder {
    async fn embed(&self, text: &str) -> faso_rag::Result<Vec<f32>> {
        let mut v = vec![0.0f32; DIM];
        for word in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= 3)
        {
            let hash =
                word.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            v[(hash % DIM as u64) as usize] += 1.0;
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Always-unreachable encoder, to force the degraded path.
struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> faso_rag::Result<Vec<f32>> {
        Err(RagError::Embedding {
            provider: "failing".into(),
            message: "encoder unreachable".into(),
        })
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

fn capital_document() -> Document {
    Document {
        id: "doc_1".into(),
        text: "Ouagadougou est la capitale du Burkina Faso. La ville est le centre politique, \
               économique et culturel du pays. Elle abrite de nombreux musées importants comme \
               le Musée National du Burkina Faso."
            .into(),
        metadata: DocMetadata {
            title: "Ouagadougou - Capitale du Burkina Faso".into(),
            url: "https://example.org/ouagadougou".into(),
            category: "tourisme".into(),
            ..DocMetadata::default()
        },
    }
}

fn banfora_document() -> Document {
    Document {
        id: "doc_2".into(),
        text: "Banfora est une ville pittoresque dans la région des Cascades, connue pour ses \
               lacs colorés et ses formations rocheuses spectaculaires."
            .into(),
        metadata: DocMetadata {
            title: "Banfora et ses Lacs Colorés".into(),
            category: "tourisme".into(),
            ..DocMetadata::default()
        },
    }
}

async fn write_corpus(path: &Path, documents: &[Document]) {
    let bytes = serde_json::to_vec_pretty(documents).unwrap();
    tokio::fs::write(path, bytes).await.unwrap();
}

fn build_assistant(
    dir: &TempDir,
    embedder: Arc<dyn EmbeddingProvider>,
    model: Option<Arc<MockModel>>,
    fallback_lines: Vec<String>,
) -> Assistant {
    let mut builder = Assistant::builder()
        .embedder(embedder)
        .index(Arc::new(MemoryVectorIndex::new(DIM)))
        .store(Arc::new(DocumentStore::new()))
        .config(RetrievalConfig::builder().similarity_threshold(0.3).build().unwrap())
        .corpus_path(dir.path().join("corpus.json"))
        .fallback_lines(fallback_lines);
    if let Some(model) = model {
        builder = builder.model(model);
    }
    builder.build().unwrap()
}

#[tokio::test]
async fn capital_question_retrieves_the_capital_document() {
    let dir = TempDir::new().unwrap();
    write_corpus(&dir.path().join("corpus.json"), &[capital_document(), banfora_document()])
        .await;

    let assistant = build_assistant(&dir, Arc::new(BagOfWordsEmbedder), None, Vec::new());
    assert_eq!(assistant.reinitialize().await.unwrap(), 2);

    let result = assistant.chat("Quelle est la capitale du Burkina Faso?", None).await.unwrap();
    assert!(result.context_used);
    assert!(result.num_sources >= 1);
    assert_eq!(result.sources[0].title, "Ouagadougou - Capitale du Burkina Faso");
    assert!(result.response.starts_with("Basé sur les informations disponibles: "));
}

#[tokio::test]
async fn configured_backend_answers_grounded_questions() {
    let dir = TempDir::new().unwrap();
    write_corpus(&dir.path().join("corpus.json"), &[capital_document()]).await;

    let model = Arc::new(MockModel::with_response("Ouagadougou est la capitale."));
    let assistant =
        build_assistant(&dir, Arc::new(BagOfWordsEmbedder), Some(model), Vec::new());
    assistant.reinitialize().await.unwrap();

    let result = assistant.chat("Quelle est la capitale du Burkina Faso?", None).await.unwrap();
    assert_eq!(result.response, "Ouagadougou est la capitale.");
    assert!(result.context_used);
    assert_eq!(result.num_sources, result.sources.len());
}

#[tokio::test]
async fn greeting_on_empty_corpus_uses_the_fixed_fallback() {
    let dir = TempDir::new().unwrap();
    let assistant = build_assistant(&dir, Arc::new(BagOfWordsEmbedder), None, Vec::new());

    let result = assistant.chat("Bonjour", None).await.unwrap();
    assert_eq!(
        result.response,
        "Bonjour! Je suis votre assistant touristique pour le Burkina Faso. \
         Comment puis-je vous aider?"
    );
    assert_eq!(result.num_sources, 0);
    assert!(!result.context_used);
    assert!(result.sources.is_empty());
}

#[tokio::test]
async fn whitespace_query_is_rejected_before_retrieval() {
    let dir = TempDir::new().unwrap();
    let assistant = build_assistant(&dir, Arc::new(BagOfWordsEmbedder), None, Vec::new());

    let err = assistant.chat("   \t ", None).await.unwrap_err();
    assert!(matches!(err, AssistantError::EmptyQuery));
    assert_eq!(assistant.indexed_count().await.unwrap(), 0);
}

#[tokio::test]
async fn reinitialize_purges_the_previous_corpus() {
    let dir = TempDir::new().unwrap();
    let corpus_path = dir.path().join("corpus.json");

    let tiebele = Document {
        id: "doc_1".into(),
        text: "Tiébélé est célèbre pour ses maisons peintes kassena, décorées de motifs \
               géométriques traditionnels par les femmes de la communauté."
            .into(),
        metadata: DocMetadata {
            title: "Les maisons peintes de Tiébélé".into(),
            category: "culture".into(),
            ..DocMetadata::default()
        },
    };
    write_corpus(&corpus_path, &[tiebele]).await;

    let assistant = build_assistant(&dir, Arc::new(BagOfWordsEmbedder), None, Vec::new());
    assert_eq!(assistant.reinitialize().await.unwrap(), 1);

    let before = assistant.chat("les maisons peintes de Tiébélé", None).await.unwrap();
    assert!(before.num_sources >= 1);

    write_corpus(&corpus_path, &[banfora_document()]).await;
    assert_eq!(assistant.reinitialize().await.unwrap(), 1);

    let after = assistant.chat("les maisons peintes de Tiébélé", None).await.unwrap();
    assert_eq!(after.num_sources, 0);
    assert!(!after.context_used);
}

#[tokio::test]
async fn missing_corpus_file_reinitializes_to_empty() {
    let dir = TempDir::new().unwrap();
    let assistant = build_assistant(&dir, Arc::new(BagOfWordsEmbedder), None, Vec::new());

    assert_eq!(assistant.reinitialize().await.unwrap(), 0);
    assert_eq!(assistant.indexed_count().await.unwrap(), 0);
    assert_eq!(assistant.statistics().await.total_documents, 0);
}

#[tokio::test]
async fn unreachable_encoder_degrades_to_keyword_search() {
    let dir = TempDir::new().unwrap();
    let lines =
        vec!["Festival FESPACO à Ouagadougou".to_string(), "Cascade de Banfora".to_string()];
    let assistant = build_assistant(&dir, Arc::new(FailingEmbedder), None, lines);

    let result = assistant.chat("banfora cascade", None).await.unwrap();
    assert_eq!(result.response, "Informations trouvées :\n\nCascade de Banfora");
    assert_eq!(result.num_sources, 1);
    assert_eq!(result.sources[0].title, "Cascade de Banfora");
    assert!(!result.context_used);

    let nothing = assistant.chat("zzz_inconnu", None).await.unwrap();
    assert!(nothing.response.starts_with("Désolé"));
    assert_eq!(nothing.num_sources, 0);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let dir = TempDir::new().unwrap();
    write_corpus(&dir.path().join("corpus.json"), &[capital_document(), banfora_document()])
        .await;

    let assistant =
        Arc::new(build_assistant(&dir, Arc::new(BagOfWordsEmbedder), None, Vec::new()));
    assistant.reinitialize().await.unwrap();

    let (a, b, c) = tokio::join!(
        assistant.chat("Quelle est la capitale du Burkina Faso?", None),
        assistant.chat("Bonjour", None),
        assistant.chat("les lacs colorés de Banfora", None),
    );
    assert!(a.unwrap().context_used);
    assert!(!b.unwrap().context_used);
    assert!(c.unwrap().num_sources >= 1);
}
