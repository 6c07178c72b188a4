//! Reachable sets with an identity-to-index side table.
//!
//! Pointer nodes carry no index of their own. A reachability pass assigns each
//! node reachable from a start node a dense index in DFS preorder, visiting
//! neighbors in list order. That is the same order in which
//! [`GraphCloner`](crate::GraphCloner) allocates clones, so index `i` of an
//! original and index `i` of its clone denote corresponding nodes.

use std::collections::HashMap;

use crate::graph::{NodeKey, NodeRef};
use crate::GhostToken;

/// The nodes reachable from a start node, indexed in DFS preorder.
pub struct Reachable<'arena, 'brand, V> {
    order: Vec<NodeRef<'arena, 'brand, V>>,
    index: HashMap<NodeKey, usize>,
}

impl<'arena, 'brand, V> Reachable<'arena, 'brand, V> {
    /// Number of reachable nodes (including the start node).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` only for the reachable set of an absent start node.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in preorder; `nodes()[0]` is the start node.
    pub fn nodes(&self) -> &[NodeRef<'arena, 'brand, V>] {
        &self.order
    }

    /// Preorder index of `key`, if reachable.
    pub fn index_of(&self, key: NodeKey) -> Option<usize> {
        self.index.get(&key).copied()
    }

    /// Whether `key` is reachable.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Number of edges leaving reachable nodes, counting duplicates.
    pub fn edge_count(&self, token: &GhostToken<'brand>) -> usize {
        self.order.iter().map(|node| node.degree(token)).sum()
    }
}

/// Computes the set of nodes reachable from `start`.
///
/// Uses an explicit stack of `(node, next neighbor position)` frames, so deep
/// chains cannot overflow the call stack.
pub fn reachable<'arena, 'brand, V>(
    start: Option<NodeRef<'arena, 'brand, V>>,
    token: &GhostToken<'brand>,
) -> Reachable<'arena, 'brand, V> {
    let mut order = Vec::new();
    let mut index = HashMap::new();

    let Some(start) = start else {
        return Reachable { order, index };
    };

    index.insert(start.key(), 0);
    order.push(start);
    let mut stack = vec![(start, 0usize)];

    while let Some(frame) = stack.last_mut() {
        let (node, position) = *frame;
        let Some(neighbor) = node.neighbor(token, position) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        if !index.contains_key(&neighbor.key()) {
            index.insert(neighbor.key(), order.len());
            order.push(neighbor);
            stack.push((neighbor, 0));
        }
    }

    Reachable { order, index }
}

/// Whether the graphs reachable from `a` and `b` share any node object.
pub fn shares_nodes<'a, 'b, 'brand, V>(
    a: Option<NodeRef<'a, 'brand, V>>,
    b: Option<NodeRef<'b, 'brand, V>>,
    token: &GhostToken<'brand>,
) -> bool {
    let left = reachable(a, token);
    reachable(b, token)
        .nodes()
        .iter()
        .any(|node| left.contains(node.key()))
}
