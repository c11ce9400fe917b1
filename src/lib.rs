//! # section-search
//!
//! Hybrid retrieval over document sections: given a persona and the job
//! they need done, find the most relevant sections of a document collection
//! and condense each one to its most central sentences.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────┐
//!                    │ Sections (corpus)    │
//!                    └──────────┬───────────┘
//!                               │ heading + text
//!                  ┌────────────┴────────────┐
//!                  ▼                         ▼
//!         ┌────────────────┐       ┌──────────────────┐
//!         │   Tokenizer    │       │     Embedder     │
//!         │  (stopwords)   │       │ (injected, sync) │
//!         └───────┬────────┘       └────────┬─────────┘
//!                 ▼                         ▼
//!         ┌────────────────┐       ┌──────────────────┐
//!         │   BM25 Okapi   │       │  Cosine (unit)   │
//!         │ k1=1.5 b=0.75  │       │  VectorIndex     │
//!         └───────┬────────┘       └────────┬─────────┘
//!                 │ ranked list             │ ranked list
//!                 └────────────┬────────────┘
//!                              ▼
//!                  ┌───────────────────────┐
//!                  │   RRF Fusion (k=60)   │
//!                  │   keep top_k          │
//!                  └───────────┬───────────┘
//!                              ▼
//!                  ┌───────────────────────┐
//!                  │ Extractive Summarizer │
//!                  │ most central sentences│
//!                  └───────────┬───────────┘
//!                              ▼
//!                  ┌───────────────────────┐
//!                  │    Ranked Output      │
//!                  └───────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the embedder and retrieval knobs
//! - [`error`] - `RetrievalError` and `EmbeddingError`
//! - [`models`] - Shared data types: `Section`, `ScoredResult`, `RankedOutput`
//! - [`text`] - Tokenizer and sentence splitter
//! - [`search::bm25`] - In-memory BM25 Okapi lexical index
//! - [`search::vector`] - Normalized embedding index with cosine similarity
//! - [`search::hybrid`] - Reciprocal Rank Fusion of the lexical and semantic rankings
//! - [`llm`] - The `Embedder` seam plus HTTP (Ollama/OpenAI) and hashing embedders
//! - [`summarize`] - Centrality-based extractive summarization
//! - [`session`] - `RetrievalSession`: index once, query many times
//! - [`extract`] - Section outlines from Markdown/text exports and JSON files
//! - [`pipeline`] - Persona/job in, ranked JSON document out

pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod session;
pub mod summarize;
pub mod text;

pub use error::{EmbeddingError, RetrievalError};
pub use llm::Embedder;
pub use models::{RankedOutput, ScoredResult, Section, Subsection};
pub use session::{RetrievalSession, SessionOptions};
