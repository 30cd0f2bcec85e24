//! SimilarityIndex: brute-force exact search.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sleuth_core::config::IndexConfig;
use sleuth_core::errors::{IndexError, SleuthResult};
use tracing::{debug, info};

use crate::math;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    pub node_id: String,
    /// Cosine similarity in [-1, 1].
    pub score: f32,
}

/// Exact nearest-neighbour index keyed by node id.
///
/// Vectors are stored unit-normalized in one contiguous buffer.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    ids: Vec<String>,
    vectors: Vec<f32>,
    dimensions: usize,
    parallel_threshold: usize,
}

impl SimilarityIndex {
    /// Build from parallel id / embedding lists.
    ///
    /// Fails with `DimensionMismatch` if vectors differ in length,
    /// `LengthMismatch` if the lists differ in length, `DuplicateId`
    /// on repeated ids, and `NonFiniteEmbedding` on NaN or infinite components.
    pub fn build(
        node_ids: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        config: &IndexConfig,
    ) -> SleuthResult<Self> {
        if node_ids.len() != embeddings.len() {
            return Err(IndexError::LengthMismatch {
                ids: node_ids.len(),
                vectors: embeddings.len(),
            }
            .into());
        }

        let dimensions = embeddings.first().map_or(0, Vec::len);
        let mut seen = HashSet::with_capacity(node_ids.len());
        let mut vectors = Vec::with_capacity(dimensions * embeddings.len());

        for (id, mut embedding) in node_ids.iter().zip(embeddings) {
            if embedding.len() != dimensions {
                return Err(IndexError::DimensionMismatch {
                    id: id.clone(),
                    expected: dimensions,
                    actual: embedding.len(),
                }
                .into());
            }
            if !seen.insert(id.as_str()) {
                return Err(IndexError::DuplicateId { id: id.clone() }.into());
            }
            if !math::is_finite(&embedding) {
                return Err(IndexError::NonFiniteEmbedding { id: id.clone() }.into());
            }
            math::normalize(&mut embedding);
            vectors.extend_from_slice(&embedding);
        }

        info!(
            vectors = node_ids.len(),
            dims = dimensions,
            "similarity index built"
        );

        Ok(Self {
            ids: node_ids,
            vectors,
            dimensions,
            parallel_threshold: config.parallel_threshold,
        })
    }

    /// Top `top_k` ids by cosine similarity to `query`.
    ///
    /// Results are sorted by descending score, ties broken by id ascending.
    /// A zero query vector matches nothing; a NaN or infinite component is an error.
    pub fn search(&self, query: &[f32], top_k: usize) -> SleuthResult<Vec<SimilarityMatch>> {
        if self.ids.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                id: "<query>".to_string(),
                expected: self.dimensions,
                actual: query.len(),
            }
            .into());
        }
        if !math::is_finite(query) {
            return Err(IndexError::NonFiniteEmbedding {
                id: "<query>".to_string(),
            }
            .into());
        }
        let Some(query) = math::normalized(query) else {
            debug!("zero-norm query, returning no matches");
            return Ok(Vec::new());
        };

        let score = |(i, v): (usize, &[f32])| (i, math::dot(&query, v).clamp(-1.0, 1.0));
        let mut scored: Vec<(usize, f32)> = if self.ids.len() >= self.parallel_threshold {
            self.vectors
                .par_chunks_exact(self.dimensions)
                .enumerate()
                .map(score)
                .collect()
        } else {
            self.vectors
                .chunks_exact(self.dimensions)
                .enumerate()
                .map(score)
                .collect()
        };

        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| self.ids[a.0].cmp(&self.ids[b.0]))
        });
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| SimilarityMatch {
                node_id: self.ids[i].clone(),
                score,
            })
            .collect())
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Vector dimension (0 for an empty index).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Whether searches fan out across the rayon pool.
    pub fn is_parallel(&self) -> bool {
        self.ids.len() >= self.parallel_threshold
    }
}
