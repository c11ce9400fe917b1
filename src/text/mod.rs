//! Text normalization: lexical tokens for BM25 and sentence splitting for summaries.

pub mod sentences;
pub mod tokenize;

pub use sentences::split_sentences;
pub use tokenize::{Tokenizer, DEFAULT_STOPWORDS};
