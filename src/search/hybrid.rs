use std::cmp::Ordering;

use crate::error::{Result, RetrievalError};
use crate::llm::Embedder;
use crate::models::ScoredResult;
use crate::search::bm25::Bm25Index;
use crate::search::vector::VectorIndex;
use crate::text::Tokenizer;

/// Default RRF damping constant.
pub const DEFAULT_RRF_K: f64 = 60.0;

/// Reciprocal Rank Fusion over a lexical and a dense signal.
///
/// Pipeline:
/// 1. Score the query against both indexes (one value per corpus position).
/// 2. Rank positions descending by each signal independently.
/// 3. Map each ranking to per-position contributions `1 / (rank + k)`,
///    with 1-based ranks.
/// 4. Merge the two contribution vectors and rank by the sum.
///
/// Ties at every step go to the lower corpus position, so results are
/// deterministic for a given corpus and query.
pub struct HybridRanker<'a, E: ?Sized> {
    lexical: &'a Bm25Index,
    semantic: &'a VectorIndex,
    tokenizer: &'a Tokenizer,
    embedder: &'a E,
    rrf_k: f64,
}

impl<'a, E: Embedder + ?Sized> HybridRanker<'a, E> {
    pub fn new(
        lexical: &'a Bm25Index,
        semantic: &'a VectorIndex,
        tokenizer: &'a Tokenizer,
        embedder: &'a E,
        rrf_k: f64,
    ) -> Self {
        Self {
            lexical,
            semantic,
            tokenizer,
            embedder,
            rrf_k,
        }
    }

    /// Fused ranking of the corpus for `query`, truncated to `top_k`.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredResult>> {
        if top_k == 0 {
            return Err(RetrievalError::InvalidTopK(top_k));
        }

        let dense = self.semantic.score(self.embedder, query)?;
        let lexical = self.lexical.score(&self.tokenizer.tokenize(query));

        if lexical.iter().all(|s| *s == 0.0) {
            tracing::debug!("no lexical overlap with query; lexical order falls back to corpus order");
        }

        Ok(rrf_fusion(&dense, &lexical, self.rrf_k, top_k))
    }
}

/// Corpus positions sorted by descending score, ties by ascending position.
pub fn rank_order<T: Copy + Into<f64>>(scores: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // Stable sort: equal scores keep corpus order.
    order.sort_by(|&a, &b| descending(scores[a].into(), scores[b].into()));
    order
}

/// Per-position RRF contribution for one ranking. `order[r]` is the corpus
/// position at rank `r + 1`; the result is indexed by corpus position.
pub fn reciprocal_ranks(order: &[usize], k: f64) -> Vec<f64> {
    let mut contributions = vec![0.0; order.len()];
    for (rank, &idx) in order.iter().enumerate() {
        contributions[idx] = 1.0 / (rank as f64 + 1.0 + k);
    }
    contributions
}

/// Element-wise sum of two contribution vectors of equal length.
pub fn merge(a: &[f64], b: &[f64]) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// Fuse a dense and a lexical score vector into the top `limit` positions.
pub fn rrf_fusion(dense: &[f32], lexical: &[f64], k: f64, limit: usize) -> Vec<ScoredResult> {
    let dense_rrf = reciprocal_ranks(&rank_order(dense), k);
    let lexical_rrf = reciprocal_ranks(&rank_order(lexical), k);
    let fused = merge(&dense_rrf, &lexical_rrf);

    rank_order(&fused)
        .into_iter()
        .take(limit)
        .map(|section_index| ScoredResult {
            section_index,
            fused_score: fused[section_index],
        })
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    // `+ 0.0` folds -0.0 into 0.0 so signed zeros tie.
    (b + 0.0).total_cmp(&(a + 0.0))
}
