//! Property tests for sleuth-causal.

use std::collections::{HashMap, HashSet, VecDeque};

use proptest::prelude::*;

use sleuth_causal::{GraphStore, PathFinder};
use sleuth_core::models::Node;

fn build(n: usize, edges: &[(usize, usize)]) -> GraphStore {
    let nodes = (0..n)
        .map(|i| Node::new(format!("n{i}"), format!("Node {i}"), vec![1.0, i as f32]))
        .collect();
    let edges = edges
        .iter()
        .filter(|(a, b)| *a < n && *b < n)
        .map(|(a, b)| (format!("n{a}"), format!("n{b}")))
        .collect();
    GraphStore::build(nodes, edges).unwrap()
}

/// Hop distance via an independent BFS over the raw edge list.
fn hop_distance(n: usize, edges: &[(usize, usize)], from: usize, to: usize) -> Option<usize> {
    let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(a, b) in edges {
        if a < n && b < n {
            adj.entry(a).or_default().push(b);
        }
    }
    let mut seen = HashSet::from([from]);
    let mut queue = VecDeque::from([(from, 0)]);
    while let Some((cur, d)) = queue.pop_front() {
        if cur == to {
            return Some(d);
        }
        for &next in adj.get(&cur).into_iter().flatten() {
            if seen.insert(next) {
                queue.push_back((next, d + 1));
            }
        }
    }
    None
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..n * 3)
}

proptest! {
    #[test]
    fn chain_length_matches_bfs_hop_count(
        edges in edge_strategy(12),
        from in 0usize..12,
        to in 0usize..12,
    ) {
        let graph = build(12, &edges);
        let chain = PathFinder::default().get_causal_chain(&graph, &format!("n{from}"), &format!("n{to}"));
        match hop_distance(12, &edges, from, to) {
            Some(hops) => {
                prop_assert_eq!(chain.len(), hops + 1);
                prop_assert_eq!(&chain[0].id, &format!("n{from}"));
                prop_assert_eq!(&chain[chain.len() - 1].id, &format!("n{to}"));
                // Consecutive records are joined by real edges.
                for pair in chain.windows(2) {
                    prop_assert!(graph.has_edge(&pair[0].id, &pair[1].id));
                }
            }
            None => prop_assert!(chain.is_empty()),
        }
    }

    #[test]
    fn unknown_ids_never_error(edges in edge_strategy(8), id in "[a-z]{1,6}") {
        let graph = build(8, &edges);
        let probe = format!("x_{id}");
        prop_assert!(graph.get_children(&probe).is_empty());
        prop_assert!(graph.get_parents(&probe).is_empty());
    }

    #[test]
    fn connect_is_idempotent(edges in edge_strategy(8), a in 0usize..8, b in 0usize..8) {
        let mut graph = build(8, &edges);
        let (a, b) = (format!("n{a}"), format!("n{b}"));
        graph.connect(&a, &b).unwrap();
        let count = graph.edge_count();
        prop_assert!(!graph.connect(&a, &b).unwrap());
        prop_assert_eq!(graph.edge_count(), count);
        let children = graph.get_children(&a);
        prop_assert_eq!(children.iter().filter(|r| r.id == b).count(), 1);
    }

    #[test]
    fn build_preserves_every_node(n in 1usize..40, freq in 1u32..10) {
        let nodes = (0..n)
            .map(|i| Node::new(format!("n{i}"), format!("d{i}"), vec![0.1, 0.2]).with_frequency(freq))
            .collect();
        let graph = GraphStore::build(nodes, vec![]).unwrap();
        prop_assert_eq!(graph.node_count(), n);
        for i in 0..n {
            let node = graph.get_node(&format!("n{i}")).unwrap();
            prop_assert_eq!(node.frequency, freq);
            prop_assert_eq!(&node.description, &format!("d{i}"));
        }
    }
}
