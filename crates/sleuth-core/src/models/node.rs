use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A claim in the causal graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique key within one graph.
    pub id: String,
    pub description: String,
    /// Occurrence timestamps, kept sorted ascending.
    pub datetimes: Vec<DateTime<Utc>>,
    /// Occurrence count, always >= 1.
    pub frequency: u32,
    pub embedding: Vec<f32>,
}

impl Node {
    pub fn new(id: impl Into<String>, description: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            datetimes: Vec::new(),
            frequency: 1,
            embedding,
        }
    }

    /// Set the occurrence timestamps (sorted on the way in).
    pub fn with_datetimes(mut self, mut datetimes: Vec<DateTime<Utc>>) -> Self {
        datetimes.sort();
        self.datetimes = datetimes;
        self
    }

    /// Set the occurrence count. Zero is coerced to one.
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency.max(1);
        self
    }

    /// Earliest occurrence, used as the node's single representative timestamp.
    pub fn representative_datetime(&self) -> Option<DateTime<Utc>> {
        self.datetimes.iter().min().copied()
    }

    /// Lightweight `{id, datetime}` reference.
    pub fn reference(&self) -> NodeReference {
        NodeReference {
            id: self.id.clone(),
            datetime: self.representative_datetime(),
        }
    }
}

/// Lightweight pointer to a neighbouring node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeReference {
    pub id: String,
    pub datetime: Option<DateTime<Utc>>,
}

/// Query-result view of a node with its immediate neighbourhood.
/// Always derived from the graph, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyListRecord {
    pub id: String,
    pub description: String,
    pub datetime: Option<DateTime<Utc>>,
    pub parents: Vec<NodeReference>,
    pub children: Vec<NodeReference>,
    pub frequency: u32,
}

/// Result of a traversal query.
pub type AdjacencyList = Vec<AdjacencyListRecord>;

/// A similarity hit resolved against the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarNode {
    pub score: f32,
    pub record: AdjacencyListRecord,
}
