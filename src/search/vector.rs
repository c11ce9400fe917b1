use crate::error::{EmbeddingError, Result};
use crate::llm::Embedder;

/// Dense index of unit-length embeddings, one per corpus document.
///
/// Vectors are normalized on the way in, so query scoring is a plain dot
/// product. Zero vectors (e.g. from an empty document) stay zero and score 0.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    embeddings: Vec<Vec<f32>>,
    dim: usize,
}

impl VectorIndex {
    /// Embed the whole corpus in one batch.
    pub fn build<E: Embedder + ?Sized>(embedder: &E, texts: &[String]) -> Result<Self> {
        let raw = embedder.embed_batch(texts)?;
        if raw.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                got: raw.len(),
            }
            .into());
        }

        let dim = raw.first().map(Vec::len).unwrap_or(0);
        let mut embeddings = Vec::with_capacity(raw.len());
        for mut v in raw {
            if v.len() != dim {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dim,
                    got: v.len(),
                }
                .into());
            }
            normalize(&mut v);
            embeddings.push(v);
        }

        tracing::debug!(documents = embeddings.len(), dim, "vector index built");
        Ok(Self { embeddings, dim })
    }

    /// Cosine similarity of `query` against every document, in corpus order.
    pub fn score<E: Embedder + ?Sized>(&self, embedder: &E, query: &str) -> Result<Vec<f32>> {
        let mut q = embedder.embed(query)?;
        if q.len() != self.dim {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dim,
                got: q.len(),
            }
            .into());
        }
        normalize(&mut q);
        Ok(self.score_vector(&q))
    }

    /// Dot product of an already-normalized query vector against every document.
    pub fn score_vector(&self, query: &[f32]) -> Vec<f32> {
        self.embeddings.iter().map(|e| dot(query, e)).collect()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }
}

/// Scale `v` to unit L2 norm in place. Zero vectors are left untouched.
pub fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cosine similarity for vectors of arbitrary length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmbeddingError, RetrievalError};

    /// Returns a fixed vector per known text, zero otherwise.
    struct TableEmbedder(Vec<(&'static str, Vec<f32>)>);

    impl Embedder for TableEmbedder {
        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts
                .iter()
                .map(|t| {
                    self.0
                        .iter()
                        .find(|(k, _)| *k == t.as_str())
                        .map(|(_, v)| v.clone())
                        .unwrap_or_else(|| vec![0.0; 3])
                })
                .collect())
        }
    }

    fn table() -> TableEmbedder {
        TableEmbedder(vec![
            ("fn main()", vec![0.1, 0.2, 0.9]),
            ("database connection", vec![0.9, 0.1, 0.1]),
            ("http handler", vec![0.2, 0.8, 0.3]),
            ("query", vec![0.95, 0.05, 0.05]),
        ])
    }

    #[test]
    fn test_closest_document_scores_highest() {
        let texts: Vec<String> = ["fn main()", "database connection", "http handler"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let index = VectorIndex::build(&table(), &texts).unwrap();
        let scores = index.score(&table(), "query").unwrap();
        assert_eq!(scores.len(), 3);
        assert!(scores[1] > scores[0]);
        assert!(scores[1] > scores[2]);
        assert!(scores.iter().all(|s| (-1.0..=1.0 + 1e-6).contains(s)));
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let texts = vec![String::new(), "database connection".to_string()];
        let index = VectorIndex::build(&table(), &texts).unwrap();
        let scores = index.score(&table(), "query").unwrap();
        assert_eq!(scores[0], 0.0);
        assert!(scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let bad = TableEmbedder(vec![("a", vec![1.0, 0.0]), ("b", vec![1.0, 0.0, 0.0])]);
        let texts = vec!["a".to_string(), "b".to_string()];
        let err = VectorIndex::build(&bad, &texts).unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::Embedding(EmbeddingError::DimensionMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_normalize_unit_length() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0, 0.0];
        normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn test_cosine_similarity_matches_dot_of_normalized() {
        let a = vec![1.0, 2.0, 2.0];
        let b = vec![2.0, 0.0, 1.0];
        let mut na = a.clone();
        let mut nb = b.clone();
        normalize(&mut na);
        normalize(&mut nb);
        assert!((cosine_similarity(&a, &b) - dot(&na, &nb)).abs() < 1e-6);
        assert_eq!(cosine_similarity(&a, &[1.0]), 0.0);
    }
}
