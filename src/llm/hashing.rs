//! Offline feature-hashing embedder.
//!
//! Produces deterministic dense vectors by hashing terms into fixed-width
//! buckets and weighting by term frequency. Needs no network; used for
//! offline runs and tests.

use std::collections::HashMap;

use super::Embedder;
use crate::error::EmbeddingError;

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// FNV-1a bucket for a term.
    fn bucket(&self, term: &str) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % self.dim as u64) as usize
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut tf: HashMap<String, f32> = HashMap::new();
        let mut total = 0usize;
        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.len() >= 2)
        {
            *tf.entry(term.to_lowercase()).or_default() += 1.0;
            total += 1;
        }

        let mut v = vec![0.0f32; self.dim];
        if total == 0 {
            return v;
        }

        for (term, count) in &tf {
            // Longer terms tend to be rarer; a cheap stand-in for corpus idf.
            let idf = 1.0 + (term.len() as f32).ln();
            v[self.bucket(term)] += count / total as f32 * idf;
        }

        crate::search::vector::normalize(&mut v);
        v
    }
}

impl Embedder for HashingEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }
}
