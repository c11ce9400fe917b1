use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// BM25 Okapi tuning parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bm25Params {
    /// Term frequency saturation.
    pub k1: f64,
    /// Document length normalization.
    pub b: f64,
    /// Floor for negative idf values, as a fraction of the mean idf.
    pub epsilon: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.25,
        }
    }
}

/// In-memory BM25 index over a fixed, ordered corpus of token lists.
///
/// Documents are addressed by their position in the corpus; `score` returns
/// one value per document in that same order.
///
/// Scoring follows `rank_bm25`'s Okapi variant. A term found in exactly half
/// the corpus has idf 0 and carries no lexical weight. Terms found in more
/// than half are floored to `epsilon * mean_idf`; when common terms dominate
/// the vocabulary that mean is itself negative, and a matching document then
/// scores below a non-matching one.
#[derive(Debug, Clone)]
pub struct Bm25Index {
    params: Bm25Params,
    /// Per-document raw term frequencies.
    term_freqs: Vec<HashMap<String, usize>>,
    doc_lens: Vec<usize>,
    avgdl: f64,
    idf: HashMap<String, f64>,
}

impl Bm25Index {
    /// Build the index from already-tokenized documents.
    pub fn build(corpus: &[Vec<String>], params: Bm25Params) -> Self {
        let n = corpus.len() as f64;

        let mut term_freqs = Vec::with_capacity(corpus.len());
        // Ordered so the idf sum below is accumulated in a fixed order.
        let mut doc_freqs: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_lens = Vec::with_capacity(corpus.len());

        for doc in corpus {
            let mut tf: HashMap<String, usize> = HashMap::new();
            for term in doc {
                *tf.entry(term.clone()).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            doc_lens.push(doc.len());
            term_freqs.push(tf);
        }

        let total: usize = doc_lens.iter().sum();
        let avgdl = if corpus.is_empty() {
            0.0
        } else {
            total as f64 / n
        };

        // idf = ln(N - df + 0.5) - ln(df + 0.5); terms present in more than
        // half the corpus go negative and are floored to epsilon * mean idf.
        let mut idf: HashMap<String, f64> = HashMap::with_capacity(doc_freqs.len());
        let mut idf_sum = 0.0;
        let mut negative = Vec::new();
        for (term, df) in doc_freqs {
            let df = df as f64;
            let value = (n - df + 0.5).ln() - (df + 0.5).ln();
            idf_sum += value;
            if value < 0.0 {
                negative.push(term.clone());
            }
            idf.insert(term, value);
        }

        if !idf.is_empty() {
            let floor = params.epsilon * idf_sum / idf.len() as f64;
            for term in negative {
                idf.insert(term, floor);
            }
        }

        tracing::debug!(
            documents = corpus.len(),
            vocabulary = idf.len(),
            avgdl,
            "BM25 index built"
        );

        Self {
            params,
            term_freqs,
            doc_lens,
            avgdl,
            idf,
        }
    }

    /// Score every document against the query tokens, in corpus order.
    pub fn score(&self, query_tokens: &[String]) -> Vec<f64> {
        let Bm25Params { k1, b, .. } = self.params;
        let mut scores = vec![0.0f64; self.term_freqs.len()];

        for term in query_tokens {
            let Some(&idf) = self.idf.get(term) else {
                continue;
            };

            for (doc, tf_map) in self.term_freqs.iter().enumerate() {
                let tf = tf_map.get(term).copied().unwrap_or(0) as f64;
                if tf == 0.0 {
                    continue;
                }
                let length_ratio = if self.avgdl > 0.0 {
                    self.doc_lens[doc] as f64 / self.avgdl
                } else {
                    1.0
                };
                let norm = tf * (k1 + 1.0) / (tf + k1 * (1.0 - b + b * length_ratio));
                scores[doc] += idf * norm;
            }
        }

        scores
    }

    pub fn len(&self) -> usize {
        self.term_freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_freqs.is_empty()
    }
}
