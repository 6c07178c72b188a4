//! Building pointer graphs from adjacency lists.
//!
//! `adjacency[i]` lists the neighbor indices of node `i`, in order. This is the
//! usual textual form of a graph (`[[1, 2], [3], [3], []]`), and the inverse of
//! [`Snapshot`](super::Snapshot).

use crate::error::BuildError;
use crate::graph::{GraphNode, NodeRef};
use crate::{GhostToken, NodeArena};

/// Checks that every row index names one of `len` nodes.
pub(crate) fn validate_adjacency(len: usize, adjacency: &[Vec<usize>]) -> Result<(), BuildError> {
    if len != adjacency.len() {
        return Err(BuildError::LengthMismatch {
            values: len,
            rows: adjacency.len(),
        });
    }
    for (node, row) in adjacency.iter().enumerate() {
        if let Some(&neighbor) = row.iter().find(|&&n| n >= len) {
            return Err(BuildError::NeighborOutOfRange { node, neighbor, len });
        }
    }
    Ok(())
}

/// Allocates one node per value in `arena` and wires the edges of `adjacency`.
///
/// Returns the nodes in input order. Nothing is allocated if validation fails.
///
/// # Example
///
/// ```rust
/// use ghostclone::{graph, GhostToken, NodeArena};
///
/// GhostToken::new(|mut token| {
///     let arena = NodeArena::new();
///     let nodes = graph::from_adjacency(&arena, &mut token, [1, 2, 3], &[vec![1], vec![2], vec![0]])
///         .unwrap();
///     assert!(nodes[2].neighbors(&token)[0].is(nodes[0]));
/// });
/// ```
pub fn from_adjacency<'arena, 'brand, V, I>(
    arena: &'arena NodeArena<GraphNode<'arena, 'brand, V>>,
    token: &mut GhostToken<'brand>,
    values: I,
    adjacency: &[Vec<usize>],
) -> Result<Vec<NodeRef<'arena, 'brand, V>>, BuildError>
where
    I: IntoIterator<Item = V>,
{
    let values: Vec<V> = values.into_iter().collect();
    validate_adjacency(values.len(), adjacency)?;

    let nodes: Vec<NodeRef<'arena, 'brand, V>> = values
        .into_iter()
        .zip(adjacency)
        .map(|(value, row)| arena.alloc(GraphNode::with_degree(value, row.len())))
        .collect();

    for (node, row) in nodes.iter().zip(adjacency) {
        for &neighbor in row {
            node.connect(token, nodes[neighbor]);
        }
    }

    Ok(nodes)
}
