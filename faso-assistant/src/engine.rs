//! The chat orchestrator.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use faso_corpus::{CorpusStats, DocumentStore};
use faso_model::{GenerationParams, LanguageModel};
use faso_rag::{
    EmbeddingProvider, IndexRecord, RetrievalConfig, Retriever, SourceRef, VectorIndex,
};

use crate::answer::AnswerGenerator;
use crate::error::{AssistantError, Result};
use crate::keyword;

/// Lead-in of the degraded-mode response when keyword matches were found.
const SNIPPETS_LEAD_IN: &str = "Informations trouvées :\n\n";

/// Degraded-mode response when nothing matched.
const NO_SNIPPETS: &str = "Désolé, je n'ai pas trouvé d'information précise dans mes sources \
                           pour votre question.\nEssayez de reformuler avec des mots-clés \
                           (ex: 'Banfora', 'FESPACO', 'hébergement Ouagadougou').";

/// The packaged outcome of one chat request. Serializable for whatever
/// transport sits in front of the assistant; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResult {
    /// The answer text.
    pub response: String,
    /// Source citations, ordered like the retrieved matches.
    pub sources: Vec<SourceRef>,
    /// Whether retrieved context grounded the answer.
    pub context_used: bool,
    /// The (trimmed) query that was answered.
    pub query: String,
    /// Number of matches that backed the answer.
    pub num_sources: usize,
}

/// Drives one request end-to-end: retrieve, generate, attach sources,
/// package. All policy lives in the retriever and the answer generator;
/// this type only composes them and handles degradation.
///
/// Safe to share behind an `Arc` and call concurrently: requests only
/// take shared read access to the index and encoder. The administrative
/// [`reinitialize`](Assistant::reinitialize) serializes against itself
/// via an internal lock; queries in flight during a reinitialization may
/// observe an empty or partially populated index, which is an accepted
/// degraded state.
pub struct Assistant {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    retriever: Retriever,
    generator: AnswerGenerator,
    store: Arc<DocumentStore>,
    corpus_path: PathBuf,
    fallback_lines: Vec<String>,
    admin: Mutex<()>,
}

impl Assistant {
    /// Create a new [`AssistantBuilder`].
    pub fn builder() -> AssistantBuilder {
        AssistantBuilder::default()
    }

    /// Answer one query.
    ///
    /// `top_k` overrides the configured retrieval depth for this request.
    /// Every well-formed query yields a `ChatResult`; retrieval failures
    /// degrade to the keyword fallback instead of erroring.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::EmptyQuery`] for an empty or
    /// whitespace-only query, before any retrieval or generation work.
    pub async fn chat(&self, query: &str, top_k: Option<usize>) -> Result<ChatResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AssistantError::EmptyQuery);
        }

        info!(query, "processing chat request");

        let matches = match self.retriever.retrieve(query, top_k).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "retrieval failed, degrading to keyword search");
                return Ok(self.keyword_fallback(query, top_k));
            }
        };

        let answer = self.generator.generate(query, &matches).await;
        info!(num_sources = matches.len(), context_used = answer.context_used, "chat completed");

        Ok(ChatResult {
            response: answer.response,
            sources: answer.sources,
            context_used: answer.context_used,
            query: query.to_string(),
            num_sources: matches.len(),
        })
    }

    /// Degraded mode: substring search over the flat sources list.
    fn keyword_fallback(&self, query: &str, top_k: Option<usize>) -> ChatResult {
        let max_results = top_k.unwrap_or(self.retriever.config().top_k);
        let snippets = keyword::find_snippets(query, &self.fallback_lines, max_results);

        let (response, sources) = if snippets.is_empty() {
            (NO_SNIPPETS.to_string(), Vec::new())
        } else {
            let sources = snippets
                .iter()
                .map(|line| SourceRef { title: line.clone(), url: String::new(), similarity: 0.0 })
                .collect();
            (format!("{SNIPPETS_LEAD_IN}{}", snippets.join("\n")), sources)
        };

        ChatResult {
            response,
            context_used: false,
            query: query.to_string(),
            num_sources: sources.len(),
            sources,
        }
    }

    /// Administrative reinitialize: reset the index, reload the corpus
    /// file into the document store, embed everything in one batch, and
    /// repopulate the index. Returns the number of documents loaded.
    ///
    /// Runs under an exclusive lock so two reinitializations never
    /// interleave. A missing or malformed corpus file is recoverable —
    /// logged and treated as zero documents, the operation still
    /// completes.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Rag`] when embedding or indexing the
    /// reloaded corpus fails.
    pub async fn reinitialize(&self) -> Result<usize> {
        let _guard = self.admin.lock().await;
        info!(corpus = %self.corpus_path.display(), "reinitializing corpus");

        self.index.reset().await?;

        let count = match self.store.load(&self.corpus_path).await {
            Ok(count) => count,
            Err(e) => {
                error!(error = %e, "corpus load failed, continuing with empty corpus");
                self.store.clear().await;
                0
            }
        };
        if count == 0 {
            return Ok(0);
        }

        let documents = self.store.documents().await;
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let records: Vec<IndexRecord> = documents
            .iter()
            .zip(embeddings)
            .map(|(doc, embedding)| IndexRecord {
                id: doc.id.clone(),
                text: doc.text.clone(),
                embedding,
                metadata: doc.metadata.clone(),
            })
            .collect();
        self.index.upsert(&records).await?;

        info!(count, "corpus indexed");
        Ok(count)
    }

    /// Corpus statistics, derived from the document store.
    pub async fn statistics(&self) -> CorpusStats {
        self.store.statistics().await
    }

    /// The shared document store.
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    /// Number of entries currently in the vector index.
    pub async fn indexed_count(&self) -> Result<usize> {
        Ok(self.index.count().await?)
    }
}

/// Builder for constructing an [`Assistant`].
///
/// `embedder`, `index`, and `store` are required; everything else has a
/// default (no generation backend, default retrieval and generation
/// parameters, `data/corpus.json`, empty fallback list).
#[derive(Default)]
pub struct AssistantBuilder {
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    index: Option<Arc<dyn VectorIndex>>,
    store: Option<Arc<DocumentStore>>,
    model: Option<Arc<dyn LanguageModel>>,
    config: Option<RetrievalConfig>,
    params: Option<GenerationParams>,
    generation_timeout: Option<Duration>,
    corpus_path: Option<PathBuf>,
    fallback_lines: Vec<String>,
}

impl AssistantBuilder {
    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector index.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the document store.
    pub fn store(mut self, store: Arc<DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set an optional language-generation backend.
    pub fn model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the retrieval configuration.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the generation sampling parameters.
    pub fn generation_params(mut self, params: GenerationParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Bound each generation-backend call; a timeout falls through to the
    /// template tier.
    pub fn generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = Some(timeout);
        self
    }

    /// Set the corpus file consumed by `reinitialize`.
    pub fn corpus_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus_path = Some(path.into());
        self
    }

    /// Set the flat text lines scanned by the degraded-mode keyword
    /// search.
    pub fn fallback_lines(mut self, lines: Vec<String>) -> Self {
        self.fallback_lines = lines;
        self
    }

    /// Build the [`Assistant`], validating that required dependencies are
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Config`] if `embedder`, `index`, or
    /// `store` is missing.
    pub fn build(self) -> Result<Assistant> {
        let embedder = self
            .embedder
            .ok_or_else(|| AssistantError::Config("embedder is required".to_string()))?;
        let index =
            self.index.ok_or_else(|| AssistantError::Config("index is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| AssistantError::Config("store is required".to_string()))?;

        let config = self.config.unwrap_or_default();
        let retriever = Retriever::new(embedder.clone(), index.clone(), config);
        let generator = AnswerGenerator::new(
            self.model,
            self.params.unwrap_or_default(),
            self.generation_timeout.unwrap_or(Duration::from_secs(30)),
        );

        Ok(Assistant {
            embedder,
            index,
            retriever,
            generator,
            store,
            corpus_path: self.corpus_path.unwrap_or_else(|| PathBuf::from("data/corpus.json")),
            fallback_lines: self.fallback_lines,
            admin: Mutex::new(()),
        })
    }
}
