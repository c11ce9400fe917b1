//! Retrieval over one frozen corpus.
//!
//! A [`RetrievalSession`] is built once per corpus: construction tokenizes and
//! embeds every section, after which `retrieve`, `refine` and `rank_sections`
//! are read-only and may be called any number of times.

use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};
use crate::llm::Embedder;
use crate::models::{RankedOutput, RefinedSubsection, ScoredResult, Section};
use crate::search::bm25::{Bm25Index, Bm25Params};
use crate::search::hybrid::{HybridRanker, DEFAULT_RRF_K};
use crate::search::vector::VectorIndex;
use crate::summarize::ExtractiveSummarizer;
use crate::text::Tokenizer;

/// Index-time and query-time settings for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub tokenizer: Tokenizer,
    pub bm25: Bm25Params,
    pub rrf_k: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tokenizer: Tokenizer::default(),
            bm25: Bm25Params::default(),
            rrf_k: DEFAULT_RRF_K,
        }
    }
}

impl From<&RetrievalConfig> for SessionOptions {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            tokenizer: config.tokenizer(),
            bm25: config.bm25,
            rrf_k: config.rrf_k,
        }
    }
}

/// Owns the lexical and semantic indexes for one corpus.
pub struct RetrievalSession<E> {
    sections: Vec<Section>,
    embedder: E,
    options: SessionOptions,
    lexical: Bm25Index,
    semantic: VectorIndex,
}

impl<E: Embedder> RetrievalSession<E> {
    /// Index `sections`. Fails on an empty corpus or an embedding failure.
    pub fn new(sections: Vec<Section>, embedder: E, options: SessionOptions) -> Result<Self> {
        if sections.is_empty() {
            return Err(RetrievalError::EmptyCorpus);
        }

        let texts: Vec<String> = sections.iter().map(Section::index_text).collect();

        let tokenized: Vec<Vec<String>> = texts
            .iter()
            .map(|t| options.tokenizer.tokenize(t))
            .collect();
        let lexical = Bm25Index::build(&tokenized, options.bm25);
        let semantic = VectorIndex::build(&embedder, &texts)?;

        tracing::info!(
            sections = sections.len(),
            dim = semantic.dim(),
            "retrieval session indexed"
        );

        Ok(Self {
            sections,
            embedder,
            options,
            lexical,
            semantic,
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Fused ranking of the corpus, at most `top_k` entries.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredResult>> {
        let ranker = HybridRanker::new(
            &self.lexical,
            &self.semantic,
            &self.options.tokenizer,
            &self.embedder,
            self.options.rrf_k,
        );
        let results = ranker.retrieve(query, top_k)?;
        tracing::debug!(query, returned = results.len(), "retrieved sections");
        Ok(results)
    }

    /// Condense `text` to its `max_sentences` most central sentences.
    pub fn refine(&self, text: &str, max_sentences: usize) -> Result<String> {
        ExtractiveSummarizer::new(&self.embedder).refine(text, max_sentences)
    }

    /// Retrieve the top sections and refine each one and its subsections.
    pub fn rank_sections(
        &self,
        query: &str,
        top_k: usize,
        max_sentences: usize,
    ) -> Result<Vec<RankedOutput>> {
        if max_sentences == 0 {
            return Err(RetrievalError::InvalidSentenceLimit(max_sentences));
        }

        let summarizer = ExtractiveSummarizer::new(&self.embedder);
        let mut ranked = Vec::new();

        for (rank, hit) in self.retrieve(query, top_k)?.into_iter().enumerate() {
            let section = &self.sections[hit.section_index];

            let mut subsections = Vec::with_capacity(section.subsections.len());
            for (i, sub) in section.subsections.iter().enumerate() {
                subsections.push(RefinedSubsection {
                    subsection_index: i,
                    importance_rank: i + 1,
                    refined_text: summarizer.refine(&sub.text, max_sentences)?,
                });
            }

            ranked.push(RankedOutput {
                section_index: hit.section_index,
                importance_rank: rank + 1,
                refined_text: summarizer.refine(&section.text, max_sentences)?,
                subsections,
            });
        }

        Ok(ranked)
    }
}
