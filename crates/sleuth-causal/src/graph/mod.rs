//! In-memory causal graph.

pub mod stable_graph;
mod store;

pub use stable_graph::{CausalEdge, EdgeOrigin, IndexedGraph};
pub use store::GraphStore;
