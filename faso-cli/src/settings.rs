//! Process settings, read from the environment once at startup.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use faso_model::GenerationParams;
use faso_rag::RetrievalConfig;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparseable setting, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the OpenAI-compatible embeddings server.
    pub embedding_url: String,
    /// Embedding model identifier.
    pub embedding_model: String,
    /// Embedding dimensionality; must match the hosted model.
    pub embedding_dimensions: usize,
    /// Base URL of the generation backend; `None` disables the LLM tier.
    pub llm_url: Option<String>,
    /// Generation model identifier.
    pub llm_model: String,
    /// Optional API key for the generation backend.
    pub llm_api_key: Option<String>,
    /// Directory holding the corpus, sources, and index files.
    pub data_dir: PathBuf,
    /// Retrieval parameters.
    pub retrieval: RetrievalConfig,
    /// Generation sampling parameters.
    pub generation: GenerationParams,
    /// Per-call generation timeout, in seconds.
    pub generation_timeout_secs: u64,
}

impl Settings {
    /// Read settings from the environment, falling back to defaults that
    /// target a local embeddings server and the multilingual MiniLM model.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the retrieval parameters are
    /// inconsistent; that is a fatal startup condition.
    pub fn from_env() -> faso_rag::Result<Self> {
        let retrieval = RetrievalConfig::builder()
            .chunk_size(env_parse("RAG_CHUNK_SIZE", 500))
            .chunk_overlap(env_parse("RAG_CHUNK_OVERLAP", 50))
            .top_k(env_parse("RAG_TOP_K", 5))
            .similarity_threshold(env_parse("RAG_SIMILARITY_THRESHOLD", 0.3))
            .build()?;
        let generation = GenerationParams {
            max_tokens: env_parse("LLM_MAX_TOKENS", 512),
            temperature: env_parse("LLM_TEMPERATURE", 0.7),
            top_p: env_parse("LLM_TOP_P", 0.9),
            top_k: env_parse("LLM_TOP_K", 50),
        };

        Ok(Self {
            embedding_url: env_or("EMBEDDING_API_URL", "http://localhost:8001/v1"),
            embedding_model: env_or(
                "EMBEDDING_MODEL",
                "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2",
            ),
            embedding_dimensions: env_parse("EMBEDDING_DIMENSIONS", 384),
            llm_url: std::env::var("LLM_API_URL").ok().filter(|v| !v.is_empty()),
            llm_model: env_or("LLM_MODEL", "mistral-7b"),
            llm_api_key: std::env::var("LLM_API_KEY").ok().filter(|v| !v.is_empty()),
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            retrieval,
            generation,
            generation_timeout_secs: env_parse("LLM_TIMEOUT_SECS", 30),
        })
    }

    /// Path of the corpus JSON file.
    pub fn corpus_path(&self) -> PathBuf {
        self.data_dir.join("corpus.json")
    }

    /// Path of the flat sources list used by the keyword fallback.
    pub fn sources_path(&self) -> PathBuf {
        self.data_dir.join("sources.txt")
    }

    /// Path of the vector index snapshot.
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("index.json")
    }
}
