//! Value-and-index snapshots of reachable subgraphs.
//!
//! A [`Snapshot`] forgets node identity and keeps only structure: values in DFS
//! preorder plus each node's neighbor list as preorder indices. Two graphs have
//! equal snapshots exactly when they are the same shape with equal values, which
//! is what a faithful clone must produce.

use serde::{Deserialize, Serialize};

use crate::graph::{reachable, NodeRef};
use crate::GhostToken;

/// Structure of the subgraph reachable from one start node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<V> {
    /// Node values; index 0 is the start node.
    pub values: Vec<V>,
    /// `adjacency[i]` lists the preorder indices of node `i`'s neighbors.
    pub adjacency: Vec<Vec<usize>>,
}

impl<V: Clone> Snapshot<V> {
    /// Captures the subgraph reachable from `start`. An absent start yields an
    /// empty snapshot.
    pub fn capture<'arena, 'brand>(start: Option<NodeRef<'arena, 'brand, V>>, token: &GhostToken<'brand>) -> Self {
        let set = reachable(start, token);
        let values = set.nodes().iter().map(|node| node.value().clone()).collect();
        let adjacency = set
            .nodes()
            .iter()
            .map(|node| {
                node.neighbors(token)
                    .iter()
                    .filter_map(|neighbor| set.index_of(neighbor.key()))
                    .collect()
            })
            .collect();

        Self { values, adjacency }
    }
}

impl<V> Snapshot<V> {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.values.len()
    }

    /// Number of edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// `true` for the snapshot of an absent graph.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V> Default for Snapshot<V> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            adjacency: Vec::new(),
        }
    }
}
