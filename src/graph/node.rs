//! `GraphNode` - a vertex of a token-branded pointer graph.
//!
//! Nodes are allocated in a [`NodeArena`](crate::NodeArena) and point at each
//! other with plain `&'arena` references. The neighbor list sits in a
//! [`GhostCell`], so edges (including self-loops and back edges) are wired after
//! allocation with `&mut GhostToken<'brand>`, and read with `&GhostToken<'brand>`.
//!
//! Identity is the node's address, exposed as a [`NodeKey`].

use core::fmt;

use crate::{GhostCell, GhostToken};

/// A shared reference to an arena-allocated node.
pub type NodeRef<'arena, 'brand, V> = &'arena GraphNode<'arena, 'brand, V>;

/// Identity of a node: equal keys mean the same node object.
///
/// Keys are only meaningful while the node is alive; they are never reused
/// within a live arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(usize);

/// A vertex carrying an opaque `value` and an ordered list of neighbors.
pub struct GraphNode<'arena, 'brand, V> {
    value: V,
    neighbors: GhostCell<'brand, Vec<NodeRef<'arena, 'brand, V>>>,
}

impl<'arena, 'brand, V> GraphNode<'arena, 'brand, V> {
    /// Creates a node with no neighbors.
    ///
    /// Every node owns a fresh, empty neighbor list.
    pub fn new(value: V) -> Self {
        Self::with_degree(value, 0)
    }

    /// Creates a node whose neighbor list has room for `degree` edges.
    pub fn with_degree(value: V, degree: usize) -> Self {
        Self {
            value,
            neighbors: GhostCell::new(Vec::with_capacity(degree)),
        }
    }

    /// The payload.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Neighbors in insertion order.
    #[inline]
    pub fn neighbors<'a>(&'a self, token: &'a GhostToken<'brand>) -> &'a [NodeRef<'arena, 'brand, V>] {
        self.neighbors.borrow(token)
    }

    /// The neighbor at `position`, if any.
    ///
    /// The returned reference is not tied to the token borrow.
    #[inline]
    pub fn neighbor(&self, token: &GhostToken<'brand>, position: usize) -> Option<NodeRef<'arena, 'brand, V>> {
        self.neighbors.borrow(token).get(position).copied()
    }

    /// Out-degree.
    #[inline]
    pub fn degree(&self, token: &GhostToken<'brand>) -> usize {
        self.neighbors.borrow(token).len()
    }

    /// Appends a directed edge `self -> to`.
    #[inline]
    pub fn connect(&self, token: &mut GhostToken<'brand>, to: NodeRef<'arena, 'brand, V>) {
        self.neighbors.borrow_mut(token).push(to);
    }

    /// Removes every outgoing edge, returning the old neighbor list.
    pub fn disconnect_all(&self, token: &mut GhostToken<'brand>) -> Vec<NodeRef<'arena, 'brand, V>> {
        self.neighbors.replace(token, Vec::new())
    }

    /// Identity key of this node.
    #[inline]
    pub fn key(&self) -> NodeKey {
        NodeKey(core::ptr::from_ref(self) as usize)
    }

    /// Whether `self` and `other` are the same node object.
    #[inline]
    pub fn is(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

impl<V: fmt::Debug> fmt::Debug for GraphNode<'_, '_, V> {
    // Neighbors need a token to read, so only the payload and identity show.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphNode")
            .field("value", &self.value)
            .field("key", &self.key())
            .finish_non_exhaustive()
    }
}
