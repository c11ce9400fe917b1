//! Embedding providers.
//!
//! The retrieval core depends only on the [`Embedder`] trait: a pure mapping
//! from text to a fixed-width vector. Which model sits behind it is a
//! deployment choice made in [`crate::config::EmbeddingConfig`].

pub mod embeddings;
pub mod hashing;

pub use embeddings::HttpEmbedder;
pub use hashing::HashingEmbedder;

use crate::config::EmbeddingConfig;
use crate::error::EmbeddingError;

/// Text-to-vector capability used by the semantic index and the summarizer.
///
/// Implementations must return exactly one vector per input, all of the same
/// width. Vectors need not be normalized; callers normalize.
pub trait Embedder {
    /// Embed a batch of texts, preserving input order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let out = self.embed_batch(&[text.to_string()])?;
        if out.len() != 1 {
            return Err(EmbeddingError::CountMismatch {
                expected: 1,
                got: out.len(),
            });
        }
        Ok(out.into_iter().next().unwrap_or_default())
    }
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }
}

/// Build the embedder selected by `config.provider`.
pub fn embedder_from_config(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>, EmbeddingError> {
    match config.provider.as_str() {
        "ollama" | "openai" => Ok(Box::new(HttpEmbedder::new(config)?)),
        "hashing" => Ok(Box::new(HashingEmbedder::new(config.dim))),
        other => Err(EmbeddingError::UnknownProvider(other.to_string())),
    }
}
