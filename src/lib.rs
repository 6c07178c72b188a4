//! # `ghostclone` - cycle-safe graph cloning over ghost-token graphs
//!
//! Deep-copies the subgraph reachable from a node of a directed, possibly
//! cyclic graph. The copy has the same values and the same adjacency (neighbor
//! order included) and shares no node with the original.
//!
//! ## Guarantees
//!
//! - **One clone per node**: every reachable node is cloned exactly once.
//! - **Identity preservation**: two paths to the same original node lead to the
//!   same clone, so diamonds stay diamonds and cycles stay cycles.
//! - **No aliasing**: no clone is an original node.
//! - **No recursion**: traversal runs on an explicit stack; graph depth is
//!   bounded by memory, or by [`CloneLimits`] when the input is untrusted.
//! - **Read-only input**: the original graph is only ever read.
//!
//! ## Architecture
//!
//! Nodes are allocated in a [`NodeArena`] and reference each other with plain
//! `&'arena` references. Their neighbor lists live in [`GhostCell`]s, gated by a
//! [`GhostToken`] brand: reading adjacency takes `&GhostToken<'brand>`, wiring
//! edges takes `&mut GhostToken<'brand>`. This allows cycles and self-loops
//! without reference counting or runtime borrow flags.
//!
//! Node identity is the node's address ([`NodeKey`]); the cloner memoizes on it.
//! For graphs addressed by index there is [`IndexGraph`], whose cloner memoizes
//! on a dense index table instead.
//!
//! ## Example
//!
//! ```rust
//! use ghostclone::{clone_graph, graph, GhostToken, NodeArena, Snapshot};
//!
//! GhostToken::new(|mut token| {
//!     // A -> [B, C], B -> [D], C -> [D]
//!     let input = NodeArena::new();
//!     let nodes = graph::from_adjacency(
//!         &input,
//!         &mut token,
//!         ["A", "B", "C", "D"],
//!         &[vec![1, 2], vec![3], vec![3], vec![]],
//!     )
//!     .unwrap();
//!
//!     let output = NodeArena::new();
//!     let a = clone_graph(Some(nodes[0]), &output, &mut token).unwrap();
//!
//!     let b = a.neighbors(&token)[0];
//!     let c = a.neighbors(&token)[1];
//!     assert!(b.neighbors(&token)[0].is(c.neighbors(&token)[0]));
//!     assert_eq!(output.len(), 4);
//!     assert_eq!(
//!         Snapshot::capture(Some(a), &token),
//!         Snapshot::capture(Some(nodes[0]), &token),
//!     );
//! });
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alloc;
pub mod cell;
pub mod clone;
pub mod error;
pub mod graph;
pub mod token;

pub use alloc::NodeArena;
pub use cell::GhostCell;
pub use clone::{clone_graph, CloneLimits, CloneReport, CloneStats, GraphCloner};
pub use error::{Bound, BuildError, CloneError, GraphError, LimitsError};
pub use graph::{GraphNode, IndexGraph, NodeId, NodeKey, NodeRef, Snapshot};
pub use token::GhostToken;

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // Tokens are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // The brand costs nothing: a `GhostCell` is exactly its contents.
    assert!(mem::size_of::<GhostCell<'static, Vec<u8>>>() == mem::size_of::<Vec<u8>>());
    assert!(mem::align_of::<GhostCell<'static, u64>>() == mem::align_of::<u64>());

    // A node is its payload plus one neighbor `Vec`.
    assert!(
        mem::size_of::<GraphNode<'static, 'static, u64>>()
            <= mem::size_of::<u64>() + mem::size_of::<Vec<usize>>()
    );
};
