//! Retrieval indexes and rank fusion.

pub mod bm25;
pub mod hybrid;
pub mod vector;

pub use bm25::{Bm25Index, Bm25Params};
pub use hybrid::{HybridRanker, DEFAULT_RRF_K};
pub use vector::VectorIndex;
