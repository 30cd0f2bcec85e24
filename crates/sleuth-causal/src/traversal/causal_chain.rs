//! Breadth-first causal-chain search.
//!
//! Explores outgoing edges in FIFO order with a visited set and stops the
//! moment the target is dequeued, so the returned path has the fewest hops.
//! Among equally short paths, the first found in edge-insertion order wins.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;

use crate::graph::IndexedGraph;

/// Node indices of the shortest path from `source_id` to `target_id`, inclusive.
pub fn find(graph: &IndexedGraph, source_id: &str, target_id: &str) -> Option<Vec<NodeIndex>> {
    let source = graph.get_node(source_id)?;
    let target = graph.get_node(target_id)?;

    let mut visited = HashSet::new();
    visited.insert(source);
    let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        if current == target {
            return Some(unwind(&came_from, source, target));
        }
        for next in graph.successors(current) {
            if visited.insert(next) {
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

fn unwind(
    came_from: &HashMap<NodeIndex, NodeIndex>,
    source: NodeIndex,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
