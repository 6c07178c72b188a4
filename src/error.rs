//! Error types for graph construction and cloning.
//!
//! An absent start node is not an error anywhere in this crate: cloning
//! nothing yields nothing.

use core::fmt;

use thiserror::Error;

/// Which safety ceiling a clone ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Depth of the explicit DFS stack.
    Depth,
    /// Number of distinct nodes cloned.
    Nodes,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Depth => f.write_str("traversal depth"),
            Bound::Nodes => f.write_str("node count"),
        }
    }
}

/// Failure of a bounded clone. No partial clone is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CloneError {
    /// The reachable graph is deeper or larger than the configured ceiling.
    #[error("graph clone exceeded the {bound} ceiling of {limit}")]
    CycleDepthExceeded {
        /// The ceiling that tripped.
        bound: Bound,
        /// Its configured value.
        limit: usize,
    },
}

/// Invalid [`CloneLimits`](crate::CloneLimits) configuration.
#[derive(Debug, Error)]
pub enum LimitsError {
    /// A ceiling of zero would reject every non-empty graph.
    #[error("{field} must be greater than zero")]
    Zero {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The configuration document could not be parsed.
    #[error("invalid clone limits: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Malformed adjacency input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// `values` and `adjacency` disagree on the node count.
    #[error("{values} node values given for {rows} adjacency rows")]
    LengthMismatch {
        /// Number of values.
        values: usize,
        /// Number of adjacency rows.
        rows: usize,
    },
    /// A row names a node that does not exist.
    #[error("node {node} lists neighbor {neighbor}, but the graph has {len} nodes")]
    NeighborOutOfRange {
        /// Row index.
        node: usize,
        /// Offending neighbor index.
        neighbor: usize,
        /// Number of nodes.
        len: usize,
    },
}

/// Errors raised by [`IndexGraph`](crate::IndexGraph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The id does not name a node of this graph.
    #[error("node {0} does not exist in this graph")]
    UnknownNode(usize),
    /// A bounded clone gave up.
    #[error(transparent)]
    Clone(#[from] CloneError),
}
