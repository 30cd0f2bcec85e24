//! Bounded breadth-first ancestor/descendant traces.

use std::collections::{HashSet, VecDeque};

use petgraph::Direction;

use super::{ReachedNode, TraversalConfig};
use crate::graph::IndexedGraph;

/// Trace from `node_id` following edges in `direction`, excluding the origin.
pub fn trace(
    graph: &IndexedGraph,
    node_id: &str,
    direction: Direction,
    config: &TraversalConfig,
) -> Vec<ReachedNode> {
    let mut result = Vec::new();
    let Some(start) = graph.get_node(node_id) else {
        return result;
    };

    let mut visited = HashSet::new();
    visited.insert(start);
    let mut queue = VecDeque::new();
    queue.push_back((start, 0usize));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= config.max_depth {
            continue;
        }
        for next in graph.neighbors(current, direction) {
            if result.len() >= config.max_nodes {
                return result;
            }
            if !visited.insert(next) {
                continue;
            }
            if let Some(node) = graph.graph.node_weight(next) {
                result.push(ReachedNode {
                    id: node.id.clone(),
                    depth: depth + 1,
                });
                queue.push_back((next, depth + 1));
            }
        }
    }

    result
}
