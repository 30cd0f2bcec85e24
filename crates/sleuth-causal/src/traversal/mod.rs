//! Traversal over the causal graph.

pub mod causal_chain;
pub mod reach;

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};
use sleuth_core::constants::MAX_TRAVERSAL_DEPTH;
use sleuth_core::models::{AdjacencyList, AdjacencyListRecord, NodeReference};

use crate::graph::{GraphStore, IndexedGraph};

/// Limits for ancestor/descendant traces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Maximum hops from the origin.
    pub max_depth: usize,
    /// Maximum nodes returned.
    pub max_nodes: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_TRAVERSAL_DEPTH,
            max_nodes: 1_000,
        }
    }
}

/// A node reached by a trace, with its hop distance from the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachedNode {
    pub id: String,
    pub depth: usize,
}

/// Directed path and ancestor/descendant queries.
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    config: TraversalConfig,
}

impl PathFinder {
    pub fn new(config: TraversalConfig) -> Self {
        Self { config }
    }

    /// Shortest directed path `source_id → … → target_id`, inclusive.
    /// Empty when no path exists or either id is unknown.
    pub fn get_causal_chain(
        &self,
        graph: &GraphStore,
        source_id: &str,
        target_id: &str,
    ) -> AdjacencyList {
        let g = graph.indexed();
        causal_chain::find(g, source_id, target_id)
            .map(|path| records(g, &path))
            .unwrap_or_default()
    }

    /// Everything that transitively causes `node_id`, nearest first.
    pub fn ancestors(&self, graph: &GraphStore, node_id: &str) -> Vec<ReachedNode> {
        reach::trace(graph.indexed(), node_id, petgraph::Direction::Incoming, &self.config)
    }

    /// Everything `node_id` transitively causes, nearest first.
    pub fn descendants(&self, graph: &GraphStore, node_id: &str) -> Vec<ReachedNode> {
        reach::trace(graph.indexed(), node_id, petgraph::Direction::Outgoing, &self.config)
    }

    /// Trace limits in effect.
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }
}

/// Build the adjacency view of one node.
pub fn record(graph: &IndexedGraph, idx: NodeIndex) -> Option<AdjacencyListRecord> {
    let node = graph.graph.node_weight(idx)?;
    let refs = |indices: Vec<NodeIndex>| -> Vec<NodeReference> {
        indices
            .into_iter()
            .filter_map(|i| graph.graph.node_weight(i))
            .map(|n| n.reference())
            .collect()
    };
    Some(AdjacencyListRecord {
        id: node.id.clone(),
        description: node.description.clone(),
        datetime: node.representative_datetime(),
        parents: refs(graph.predecessors(idx)),
        children: refs(graph.successors(idx)),
        frequency: node.frequency,
    })
}

/// Adjacency views for a sequence of nodes, order preserved.
pub fn records(graph: &IndexedGraph, indices: &[NodeIndex]) -> AdjacencyList {
    indices.iter().filter_map(|&idx| record(graph, idx)).collect()
}
