//! # sleuth-causal
//!
//! The causal claim graph. Nodes are claims, directed edges mean
//! "source causally precedes/produces target".
//!
//! - [`GraphStore`] owns nodes and edges: O(1) id lookup, O(deg) neighbours,
//!   and the single agent-facing mutator, [`GraphStore::connect`].
//! - [`PathFinder`] answers causal-chain and ancestor/descendant queries.
//! - [`dataset`] turns upstream tabular rows into graph input.

pub mod dataset;
pub mod graph;
pub mod traversal;

pub use dataset::NodeRow;
pub use graph::{CausalEdge, EdgeOrigin, GraphStore};
pub use traversal::{PathFinder, TraversalConfig};
