//! Graph representations the cloner works over.
//!
//! - `node`: arena-allocated, token-branded pointer graphs (`GraphNode`)
//! - `build`: constructing pointer graphs from adjacency lists
//! - `reachable`: reachable sets with an identity-to-index side table
//! - `snapshot`: identity-free structural views for comparison
//! - `index_graph`: a `Vec`-backed graph addressed by `NodeId`

pub mod build;
pub mod index_graph;
pub mod node;
pub mod reachable;
pub mod snapshot;

pub use build::from_adjacency;
pub use index_graph::{IndexGraph, NodeId};
pub use node::{GraphNode, NodeKey, NodeRef};
pub use reachable::{reachable, shares_nodes, Reachable};
pub use snapshot::Snapshot;
