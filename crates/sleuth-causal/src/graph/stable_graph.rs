//! `StableGraph` wrapper with a node-id index.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};
use sleuth_core::errors::GraphError;
use sleuth_core::models::Node;

/// Where an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrigin {
    /// Loaded from the upstream dataset.
    Dataset,
    /// Created by the agent loop through `connect`.
    Agent,
}

/// Edge weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalEdge {
    pub origin: EdgeOrigin,
    pub created_at: DateTime<Utc>,
}

impl CausalEdge {
    /// Edge stamped with the current time.
    pub fn new(origin: EdgeOrigin) -> Self {
        Self {
            origin,
            created_at: Utc::now(),
        }
    }
}

/// Directed graph of [`Node`]s with id → index lookup.
#[derive(Debug, Default)]
pub struct IndexedGraph {
    pub graph: StableGraph<Node, CausalEdge, Directed>,
    index: HashMap<String, NodeIndex>,
}

impl IndexedGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, rejecting duplicate ids.
    pub fn insert_node(&mut self, node: Node) -> Result<NodeIndex, GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode { id: node.id });
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Get the node index for an id.
    pub fn get_node(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Add `source → target` unless it already exists. Returns whether an edge was added.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, weight: CausalEdge) -> bool {
        if self.graph.find_edge(source, target).is_some() {
            return false;
        }
        self.graph.add_edge(source, target, weight);
        true
    }

    /// Direct neighbours in one direction, in edge insertion order.
    pub fn neighbors(&self, idx: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_unstable_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, other)| other).collect()
    }

    /// Direct successors, in edge insertion order.
    pub fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors(idx, Direction::Outgoing)
    }

    /// Direct predecessors, in edge insertion order.
    pub fn predecessors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors(idx, Direction::Incoming)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
