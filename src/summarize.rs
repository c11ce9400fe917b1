//! Extractive summaries: keep the sentences closest in meaning to the whole.

use crate::error::{EmbeddingError, Result, RetrievalError};
use crate::llm::Embedder;
use crate::search::hybrid::rank_order;
use crate::search::vector::cosine_similarity;
use crate::text::split_sentences;

/// Condenses text by selecting its most central sentences.
///
/// Centrality is the cosine similarity between a sentence embedding and the
/// embedding of the full text. Selected sentences are emitted in their
/// original order, joined by single spaces.
pub struct ExtractiveSummarizer<'a, E: ?Sized> {
    embedder: &'a E,
}

impl<'a, E: Embedder + ?Sized> ExtractiveSummarizer<'a, E> {
    pub fn new(embedder: &'a E) -> Self {
        Self { embedder }
    }

    /// Reduce `text` to at most `max_sentences` sentences.
    pub fn refine(&self, text: &str, max_sentences: usize) -> Result<String> {
        if max_sentences == 0 {
            return Err(RetrievalError::InvalidSentenceLimit(max_sentences));
        }

        let sentences = split_sentences(text);
        if sentences.len() <= max_sentences {
            return Ok(sentences.join(" "));
        }

        // One request: every sentence, then the whole text last.
        let mut inputs: Vec<String> = sentences.iter().map(|s| s.to_string()).collect();
        inputs.push(text.to_string());
        let mut vectors = self.embedder.embed_batch(&inputs)?;
        if vectors.len() != inputs.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: inputs.len(),
                got: vectors.len(),
            }
            .into());
        }
        let whole = vectors.pop().unwrap_or_default();
        if let Some(v) = vectors.iter().find(|v| v.len() != whole.len()) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: whole.len(),
                got: v.len(),
            }
            .into());
        }

        let scores: Vec<f32> = vectors
            .iter()
            .map(|v| cosine_similarity(&whole, v))
            .collect();

        let keep = select_central(&scores, max_sentences);
        Ok(keep
            .into_iter()
            .map(|i| sentences[i])
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Indices of the `n` highest scores (earlier index wins ties), in ascending
/// index order. Uses the same ordering as rank fusion.
fn select_central(scores: &[f32], n: usize) -> Vec<usize> {
    let mut keep = rank_order(scores);
    keep.truncate(n);
    keep.sort_unstable();
    keep
}
