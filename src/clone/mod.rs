//! `GraphCloner` - cycle-safe deep copies of pointer graphs.
//!
//! The cloner walks the subgraph reachable from a start node depth-first and
//! keeps a map from original node identity ([`NodeKey`]) to the clone allocated
//! for it. A clone is registered in the map *before* any of its neighbors are
//! visited, so a self-loop or back edge finds the clone that is still being
//! built instead of starting another one. Shared neighbors (diamonds) resolve to
//! the same single clone for the same reason.
//!
//! The traversal uses an explicit stack of `(original, clone, next neighbor)`
//! frames rather than recursion; a chain of a million nodes clones without
//! touching the call stack.
//!
//! # Performance
//! - Time: O(V + E) over the reachable subgraph
//! - Space: O(V) for the identity map and the stack
//!
//! # Example
//!
//! ```rust
//! use ghostclone::{clone_graph, graph, GhostToken, NodeArena};
//!
//! GhostToken::new(|mut token| {
//!     let input = NodeArena::new();
//!     let nodes = graph::from_adjacency(&input, &mut token, ["a", "b"], &[vec![1], vec![0]]).unwrap();
//!
//!     let output = NodeArena::new();
//!     let copy = clone_graph(Some(nodes[0]), &output, &mut token).unwrap();
//!
//!     assert_eq!(*copy.value(), "a");
//!     assert!(!copy.is(nodes[0]));
//!     // a' -> b' -> a'
//!     assert!(copy.neighbors(&token)[0].neighbors(&token)[0].is(copy));
//! });
//! ```

pub mod limits;

use std::collections::HashMap;

use crate::error::CloneError;
use crate::graph::{GraphNode, NodeKey, NodeRef};
use crate::{GhostToken, NodeArena};

pub use limits::{CloneLimits, CloneStats};
use limits::Budget;

/// The root of a finished clone together with its statistics.
pub struct CloneReport<'dst, 'brand, V> {
    /// Clone of the start node.
    pub root: NodeRef<'dst, 'brand, V>,
    /// Counters gathered while cloning.
    pub stats: CloneStats,
}

/// One pending node: its original, its clone, and the next neighbor to copy.
struct Frame<'src, 'dst, 'brand, V> {
    original: NodeRef<'src, 'brand, V>,
    clone: NodeRef<'dst, 'brand, V>,
    next: usize,
}

/// Deep-copies pointer graphs, optionally under [`CloneLimits`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCloner {
    limits: CloneLimits,
}

impl GraphCloner {
    /// A cloner without ceilings.
    pub const fn new() -> Self {
        Self {
            limits: CloneLimits::unbounded(),
        }
    }

    /// A cloner enforcing `limits`.
    pub const fn with_limits(limits: CloneLimits) -> Self {
        Self { limits }
    }

    /// The ceilings this cloner enforces.
    pub fn limits(&self) -> &CloneLimits {
        &self.limits
    }

    /// Clones the subgraph reachable from `start` into `arena`.
    ///
    /// Returns `Ok(None)` for an absent start, allocating nothing.
    ///
    /// # Errors
    /// [`CloneError::CycleDepthExceeded`] if a ceiling is hit. Nodes already
    /// allocated in `arena` are then unreachable from anything returned.
    pub fn clone_from<'src, 'dst, 'brand, V: Clone>(
        &self,
        start: Option<NodeRef<'src, 'brand, V>>,
        arena: &'dst NodeArena<GraphNode<'dst, 'brand, V>>,
        token: &mut GhostToken<'brand>,
    ) -> Result<Option<NodeRef<'dst, 'brand, V>>, CloneError> {
        Ok(self.clone_with_report(start, arena, token)?.map(|report| report.root))
    }

    /// Like [`clone_from`](Self::clone_from), also returning [`CloneStats`].
    ///
    /// # Errors
    /// [`CloneError::CycleDepthExceeded`] if a ceiling is hit.
    pub fn clone_with_report<'src, 'dst, 'brand, V: Clone>(
        &self,
        start: Option<NodeRef<'src, 'brand, V>>,
        arena: &'dst NodeArena<GraphNode<'dst, 'brand, V>>,
        token: &mut GhostToken<'brand>,
    ) -> Result<Option<CloneReport<'dst, 'brand, V>>, CloneError> {
        let Some(start) = start else {
            return Ok(None);
        };

        let mut budget = Budget::new(self.limits);
        let mut memo: HashMap<NodeKey, NodeRef<'dst, 'brand, V>> = HashMap::new();
        let mut stack: Vec<Frame<'src, 'dst, 'brand, V>> = Vec::new();

        let root = admit(start, arena, token, &mut memo, &mut budget)?;
        stack.push(Frame {
            original: start,
            clone: root,
            next: 0,
        });
        budget.enter(stack.len())?;

        while let Some(frame) = stack.last_mut() {
            let Some(neighbor) = frame.original.neighbor(token, frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let parent = frame.clone;

            let cloned = match memo.get(&neighbor.key()).copied() {
                Some(existing) => existing,
                None => {
                    let fresh = admit(neighbor, arena, token, &mut memo, &mut budget)?;
                    stack.push(Frame {
                        original: neighbor,
                        clone: fresh,
                        next: 0,
                    });
                    budget.enter(stack.len())?;
                    fresh
                }
            };

            parent.connect(token, cloned);
            budget.copied_edge();
        }

        Ok(Some(CloneReport {
            root,
            stats: budget.finish(),
        }))
    }
}

/// Allocates the clone of `original` and registers it before any neighbor is
/// visited.
fn admit<'src, 'dst, 'brand, V: Clone>(
    original: NodeRef<'src, 'brand, V>,
    arena: &'dst NodeArena<GraphNode<'dst, 'brand, V>>,
    token: &GhostToken<'brand>,
    memo: &mut HashMap<NodeKey, NodeRef<'dst, 'brand, V>>,
    budget: &mut Budget,
) -> Result<NodeRef<'dst, 'brand, V>, CloneError> {
    budget.admit_node()?;
    let clone = arena.alloc(GraphNode::with_degree(
        original.value().clone(),
        original.degree(token),
    ));
    tracing::trace!(original = ?original.key(), clone = ?clone.key(), "cloned node");
    memo.insert(original.key(), clone);
    Ok(clone)
}

/// Clones the subgraph reachable from `start` into `arena`, without ceilings.
///
/// `None` in, `None` out.
pub fn clone_graph<'src, 'dst, 'brand, V: Clone>(
    start: Option<NodeRef<'src, 'brand, V>>,
    arena: &'dst NodeArena<GraphNode<'dst, 'brand, V>>,
    token: &mut GhostToken<'brand>,
) -> Option<NodeRef<'dst, 'brand, V>> {
    // An unbounded cloner has no ceiling to trip.
    GraphCloner::new().clone_from(start, arena, token).ok().flatten()
}
