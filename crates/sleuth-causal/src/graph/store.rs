//! GraphStore: owns the claim graph for one exploration session.

use sleuth_core::errors::{GraphError, IndexError, SleuthResult};
use sleuth_core::models::{AdjacencyList, AdjacencyListRecord, Node};
use tracing::{debug, info};

use super::stable_graph::{CausalEdge, EdgeOrigin, IndexedGraph};
use crate::dataset::{self, NodeRow};
use crate::traversal;

/// Directed graph of claims and causal edges.
///
/// Built once per session and read-mostly afterwards; [`connect`](Self::connect)
/// is the only mutation path and its effects are immediately visible.
#[derive(Debug)]
pub struct GraphStore {
    graph: IndexedGraph,
    dimensions: usize,
}

impl GraphStore {
    /// Build from node records and `(source, target)` edges.
    ///
    /// Fails on duplicate node ids, edges referencing missing nodes, empty
    /// or non-finite embeddings, or embeddings of differing dimension.
    /// Repeated edges collapse into one.
    pub fn build(nodes: Vec<Node>, edges: Vec<(String, String)>) -> SleuthResult<Self> {
        let mut graph = IndexedGraph::new();
        let mut dimensions = None;

        for node in nodes {
            if node.embedding.is_empty() {
                return Err(GraphError::EmptyEmbedding { id: node.id }.into());
            }
            if node.embedding.iter().any(|x| !x.is_finite()) {
                return Err(IndexError::NonFiniteEmbedding { id: node.id }.into());
            }
            let expected = *dimensions.get_or_insert(node.embedding.len());
            if node.embedding.len() != expected {
                return Err(IndexError::DimensionMismatch {
                    id: node.id,
                    expected,
                    actual: node.embedding.len(),
                }
                .into());
            }
            graph.insert_node(node)?;
        }

        let mut skipped = 0usize;
        for (source_id, target_id) in edges {
            let resolve = |id: &str| {
                graph.get_node(id).ok_or_else(|| GraphError::DanglingEdge {
                    source_id: source_id.clone(),
                    target_id: target_id.clone(),
                    missing: id.to_string(),
                })
            };
            let source = resolve(&source_id)?;
            let target = resolve(&target_id)?;
            if !graph.add_edge(source, target, CausalEdge::new(EdgeOrigin::Dataset)) {
                skipped += 1;
            }
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            duplicate_edges = skipped,
            "causal graph built"
        );

        Ok(Self {
            graph,
            dimensions: dimensions.unwrap_or(0),
        })
    }

    /// Build from upstream dataset rows.
    pub fn from_rows(rows: Vec<NodeRow>) -> SleuthResult<Self> {
        let input = dataset::rows_to_input(rows)?;
        Self::build(input.nodes, input.edges)
    }

    /// Direct successors of `node_id`. Empty if the id is unknown.
    pub fn get_children(&self, node_id: &str) -> AdjacencyList {
        match self.graph.get_node(node_id) {
            Some(idx) => traversal::records(&self.graph, &self.graph.successors(idx)),
            None => Vec::new(),
        }
    }

    /// Direct predecessors of `node_id`. Empty if the id is unknown.
    pub fn get_parents(&self, node_id: &str) -> AdjacencyList {
        match self.graph.get_node(node_id) {
            Some(idx) => traversal::records(&self.graph, &self.graph.predecessors(idx)),
            None => Vec::new(),
        }
    }

    /// Add `source_id → target_id` if absent.
    ///
    /// Returns `Ok(true)` when a new edge was created and `Ok(false)` when it
    /// already existed. Fails with `UnknownNode` if either endpoint is missing.
    /// There is no undo.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> SleuthResult<bool> {
        let source = self.require(source_id)?;
        let target = self.require(target_id)?;
        let created = self
            .graph
            .add_edge(source, target, CausalEdge::new(EdgeOrigin::Agent));
        debug!(source = source_id, target = target_id, created, "connect");
        Ok(created)
    }

    /// Adjacency view of a single node.
    pub fn record(&self, node_id: &str) -> Option<AdjacencyListRecord> {
        let idx = self.graph.get_node(node_id)?;
        traversal::record(&self.graph, idx)
    }

    /// Node by id.
    pub fn get_node(&self, node_id: &str) -> Option<&Node> {
        let idx = self.graph.get_node(node_id)?;
        self.graph.graph.node_weight(idx)
    }

    /// Whether `node_id` is in the graph.
    pub fn contains(&self, node_id: &str) -> bool {
        self.graph.get_node(node_id).is_some()
    }

    /// Whether `source_id → target_id` exists.
    pub fn has_edge(&self, source_id: &str, target_id: &str) -> bool {
        self.edge(source_id, target_id).is_some()
    }

    /// Weight of `source_id → target_id`, if present.
    pub fn edge(&self, source_id: &str, target_id: &str) -> Option<&CausalEdge> {
        let source = self.graph.get_node(source_id)?;
        let target = self.graph.get_node(target_id)?;
        let edge = self.graph.graph.find_edge(source, target)?;
        self.graph.graph.edge_weight(edge)
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> Vec<String> {
        self.graph
            .graph
            .node_indices()
            .filter_map(|idx| self.graph.graph.node_weight(idx))
            .map(|n| n.id.clone())
            .collect()
    }

    /// Ids and embedding vectors in insertion order, for building a similarity index.
    pub fn embeddings(&self) -> (Vec<String>, Vec<Vec<f32>>) {
        self.graph
            .graph
            .node_indices()
            .filter_map(|idx| self.graph.graph.node_weight(idx))
            .map(|n| (n.id.clone(), n.embedding.clone()))
            .unzip()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, dataset and agent-created.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Embedding dimension shared by every node (0 for an empty graph).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Underlying indexed graph, for traversal.
    pub fn indexed(&self) -> &IndexedGraph {
        &self.graph
    }

    fn require(&self, node_id: &str) -> Result<petgraph::stable_graph::NodeIndex, GraphError> {
        self.graph.get_node(node_id).ok_or_else(|| GraphError::UnknownNode {
            id: node_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::SleuthError;

    fn node(id: &str) -> Node {
        Node::new(id, format!("claim {id}"), vec![1.0, 0.0, 0.0])
    }

    fn edge(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    fn abc() -> GraphStore {
        GraphStore::build(
            vec![node("a"), node("b"), node("c")],
            vec![edge("a", "b"), edge("b", "c")],
        )
        .unwrap()
    }

    #[test]
    fn dangling_edge_fails_build() {
        let err = GraphStore::build(vec![node("a")], vec![edge("a", "ghost")]).unwrap_err();
        assert!(matches!(
            err,
            SleuthError::Graph(GraphError::DanglingEdge { ref missing, .. }) if missing == "ghost"
        ));
    }

    #[test]
    fn duplicate_node_fails_build() {
        let err = GraphStore::build(vec![node("a"), node("a")], vec![]).unwrap_err();
        assert!(matches!(err, SleuthError::Graph(GraphError::DuplicateNode { .. })));
    }

    #[test]
    fn mixed_dimensions_fail_build() {
        let odd = Node::new("b", "B", vec![1.0]);
        let err = GraphStore::build(vec![node("a"), odd], vec![]).unwrap_err();
        assert!(matches!(
            err,
            SleuthError::Index(IndexError::DimensionMismatch {
                expected: 3,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn empty_embedding_fails_build() {
        let err = GraphStore::build(vec![Node::new("a", "A", vec![])], vec![]).unwrap_err();
        assert!(matches!(err, SleuthError::Graph(GraphError::EmptyEmbedding { .. })));
    }

    #[test]
    fn non_finite_embedding_fails_build() {
        let bad = Node::new("b", "B", vec![0.0, f32::NAN, 1.0]);
        let err = GraphStore::build(vec![node("a"), bad], vec![]).unwrap_err();
        assert!(matches!(
            err,
            SleuthError::Index(IndexError::NonFiniteEmbedding { ref id }) if id == "b"
        ));
    }

    #[test]
    fn repeated_dataset_edges_collapse() {
        let g = GraphStore::build(vec![node("a"), node("b")], vec![edge("a", "b"), edge("a", "b")])
            .unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn children_and_parents_carry_neighbourhood() {
        let g = abc();
        let children = g.get_children("a");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "b");
        assert_eq!(children[0].parents[0].id, "a");
        assert_eq!(children[0].children[0].id, "c");

        let parents = g.get_parents("c");
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].id, "b");
    }

    #[test]
    fn unknown_ids_yield_empty_lists() {
        let g = abc();
        assert!(g.get_children("zzz").is_empty());
        assert!(g.get_parents("zzz").is_empty());
        assert!(g.get_children("c").is_empty());
        assert!(g.get_parents("a").is_empty());
    }

    #[test]
    fn connect_is_visible_and_idempotent() {
        let mut g = abc();
        assert!(g.connect("a", "c").unwrap());
        assert!(!g.connect("a", "c").unwrap());
        assert_eq!(g.edge_count(), 3);
        let ids: Vec<_> = g.get_children("a").into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(g.edge("a", "c").unwrap().origin, EdgeOrigin::Agent);
        assert_eq!(g.edge("a", "b").unwrap().origin, EdgeOrigin::Dataset);
    }

    #[test]
    fn connect_to_unknown_node_fails() {
        let mut g = abc();
        let err = g.connect("a", "nope").unwrap_err();
        assert!(err.is_unknown_node());
        let err = g.connect("nope", "a").unwrap_err();
        assert!(err.is_unknown_node());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn embeddings_follow_insertion_order() {
        let g = abc();
        let (ids, vectors) = g.embeddings();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(vectors.len(), 3);
        assert_eq!(g.dimensions(), 3);
    }
}
