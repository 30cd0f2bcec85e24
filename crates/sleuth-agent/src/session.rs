//! ExplorationSession: graph, index and configuration for one request.

use sleuth_causal::{GraphStore, NodeRow};
use sleuth_core::config::SleuthConfig;
use sleuth_core::errors::SleuthResult;
use sleuth_core::models::Node;
use sleuth_core::traits::{IEmbeddingProvider, IReasoningOracle};
use sleuth_observability::graph_build_span;
use sleuth_similarity::SimilarityIndex;

use crate::actions::ActionSet;
use crate::agent_loop::{AgentLoop, SessionReport};

/// Owns the per-request graph and similarity index.
///
/// Structural errors (bad rows, dangling edges, mixed dimensions) surface
/// from the constructors, before any oracle call is made.
#[derive(Debug)]
pub struct ExplorationSession {
    graph: GraphStore,
    index: SimilarityIndex,
    config: SleuthConfig,
}

impl ExplorationSession {
    /// Build from dataset rows.
    pub fn from_rows(rows: Vec<NodeRow>, config: SleuthConfig) -> SleuthResult<Self> {
        let span = graph_build_span!(rows.len(), tracing::field::Empty);
        let _enter = span.enter();
        let graph = GraphStore::from_rows(rows)?;
        span.record("edges", graph.edge_count());
        Self::from_graph(graph, config)
    }

    /// Build from nodes and `(source, target)` edges.
    pub fn from_nodes(
        nodes: Vec<Node>,
        edges: Vec<(String, String)>,
        config: SleuthConfig,
    ) -> SleuthResult<Self> {
        let span = graph_build_span!(nodes.len(), edges.len());
        let _enter = span.enter();
        Self::from_graph(GraphStore::build(nodes, edges)?, config)
    }

    /// Index an already-built graph.
    pub fn from_graph(graph: GraphStore, config: SleuthConfig) -> SleuthResult<Self> {
        config.validate()?;
        let (ids, vectors) = graph.embeddings();
        let index = SimilarityIndex::build(ids, vectors, &config.index)?;
        Ok(Self {
            graph,
            index,
            config,
        })
    }

    /// Capability surface over this session's graph and index.
    pub fn action_set(&mut self) -> ActionSet<'_> {
        ActionSet::new(&mut self.graph, &self.index, &self.config.agent)
    }

    /// A loop configured from this session's settings.
    pub fn agent_loop(&self) -> AgentLoop {
        AgentLoop::new(&self.config)
    }

    /// Validate `hypothesis` with a default loop and no text embedder.
    pub fn validate(&mut self, hypothesis: &str, oracle: &dyn IReasoningOracle) -> SessionReport {
        let agent = self.agent_loop();
        agent.run(hypothesis, &mut self.action_set(), oracle)
    }

    /// Validate with a caller-configured loop and optional embedder for text queries.
    pub fn validate_with(
        &mut self,
        hypothesis: &str,
        agent: &AgentLoop,
        oracle: &dyn IReasoningOracle,
        embedder: Option<&dyn IEmbeddingProvider>,
    ) -> SessionReport {
        let mut actions = self.action_set();
        if let Some(embedder) = embedder {
            actions = actions.with_embedder(embedder);
        }
        agent.run(hypothesis, &mut actions, oracle)
    }

    /// The session graph, including agent-created edges.
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// The similarity index over node embeddings.
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &SleuthConfig {
        &self.config
    }
}
