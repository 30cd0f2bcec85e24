//! # sleuth-similarity
//!
//! Exact nearest-neighbour retrieval over node embeddings. Vectors are
//! L2-normalized at build time and queries at search time, so the inner
//! product is the cosine similarity.

pub mod index;
pub mod math;

pub use index::{SimilarityIndex, SimilarityMatch};
