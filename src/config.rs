use serde::{Deserialize, Serialize};

use crate::search::bm25::Bm25Params;
use crate::text::{Tokenizer, DEFAULT_STOPWORDS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
    /// Ranking and summarization knobs
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "ollama", "openai" or "hashing" (offline)
    pub provider: String,
    /// Base URL for the embedding API
    pub base_url: String,
    /// Model name for embeddings
    pub model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Vector width for the hashing provider
    pub dim: usize,
    /// Texts per embedding request
    pub batch_size: usize,
    /// Request timeout in seconds (capped at 600)
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            model: "all-minilm".to_string(),
            api_key: None,
            dim: 384,
            batch_size: 32,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Sections returned per query
    pub top_k: usize,
    /// Sentences kept per refined section
    pub max_sentences: usize,
    /// Reciprocal rank fusion damping constant
    pub rrf_k: f64,
    pub bm25: Bm25Params,
    /// Words dropped before BM25 indexing
    pub stopwords: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_sentences: 5,
            rrf_k: 60.0,
            bm25: Bm25Params::default(),
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RetrievalConfig {
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(&self.stopwords)
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(provider) = std::env::var("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }
        if let Ok(url) = std::env::var("EMBEDDING_BASE_URL") {
            config.embedding.base_url = url;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(key) = std::env::var("EMBEDDING_API_KEY") {
            config.embedding.api_key = Some(key);
        }
        if let Ok(val) = std::env::var("EMBEDDING_DIM") {
            if let Ok(v) = val.parse() {
                config.embedding.dim = v;
            }
        }
        if let Ok(val) = std::env::var("EMBEDDING_BATCH_SIZE") {
            if let Ok(v) = val.parse() {
                config.embedding.batch_size = v;
            }
        }
        if let Ok(val) = std::env::var("EMBEDDING_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.embedding.timeout_secs = v.min(600);
            }
        }

        // Retrieval
        if let Ok(val) = std::env::var("SECTION_SEARCH_TOP_K") {
            if let Ok(v) = val.parse() {
                config.retrieval.top_k = v;
            }
        }
        if let Ok(val) = std::env::var("SECTION_SEARCH_MAX_SENTENCES") {
            if let Ok(v) = val.parse() {
                config.retrieval.max_sentences = v;
            }
        }
        if let Ok(val) = std::env::var("SECTION_SEARCH_RRF_K") {
            if let Ok(v) = val.parse() {
                config.retrieval.rrf_k = v;
            }
        }
        if let Ok(val) = std::env::var("SECTION_SEARCH_BM25_K1") {
            if let Ok(v) = val.parse() {
                config.retrieval.bm25.k1 = v;
            }
        }
        if let Ok(val) = std::env::var("SECTION_SEARCH_BM25_B") {
            if let Ok(v) = val.parse() {
                config.retrieval.bm25.b = v;
            }
        }
        if let Ok(val) = std::env::var("SECTION_SEARCH_STOPWORDS") {
            config.retrieval.stopwords = parse_word_list(&val);
        }

        config
    }
}

/// Split a comma-separated word list, dropping blanks.
fn parse_word_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
