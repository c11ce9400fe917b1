use thiserror::Error;

/// Errors surfaced by the retrieval core.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("cannot build a retrieval session over an empty corpus")]
    EmptyCorpus,

    #[error("top_k must be a positive count, got {0}")]
    InvalidTopK(usize),

    #[error("max_sentences must be a positive count, got {0}")]
    InvalidSentenceLimit(usize),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// Failures reported by an embedding provider.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("embedding provider returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("embedding width mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("unknown embedding provider: {0}")]
    UnknownProvider(String),
}

pub type Result<T, E = RetrievalError> = std::result::Result<T, E>;
