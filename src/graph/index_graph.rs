//! `IndexGraph` - a dynamic graph addressed by dense `NodeId`s.
//!
//! Nodes live in one `Vec`; each keeps its value and an ordered outgoing list of
//! `NodeId`s. There is no pointer identity to key on, so cloning memoizes on the
//! node index itself: a dense `Vec<Option<NodeId>>` mapping each input index to
//! the id of its clone in the output graph.
//!
//! Serialized form: `{ "nodes": [{ "value": .., "neighbors": [..] }, ..] }`.
//! Deserialization rejects neighbor ids that do not name a node.
//!
//! # Performance
//! - `add_node`: O(1)
//! - `add_edge`: O(1) (append to list)
//! - `neighbors`: O(1) to get the slice
//! - `clone_reachable`: O(V + E) over the reachable subgraph

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::clone::limits::Budget;
use crate::clone::{CloneLimits, CloneStats};
use crate::error::{BuildError, GraphError};
use crate::graph::build::validate_adjacency;
use crate::graph::Snapshot;

/// Index of a node in an [`IndexGraph`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw index. Graph methods reject ids that name no node.
    #[inline(always)]
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// The raw index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NodeData<V> {
    value: V,
    neighbors: Vec<NodeId>,
}

#[derive(Deserialize)]
struct RawIndexGraph<V> {
    nodes: Vec<NodeData<V>>,
}

/// A directed graph over dense node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexGraph<V> {
    nodes: Vec<NodeData<V>>,
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for IndexGraph<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawIndexGraph::deserialize(deserializer)?;
        let len = raw.nodes.len();
        for (node, data) in raw.nodes.iter().enumerate() {
            if let Some(bad) = data.neighbors.iter().find(|id| id.index() >= len) {
                return Err(de::Error::custom(BuildError::NeighborOutOfRange {
                    node,
                    neighbor: bad.index(),
                    len,
                }));
            }
        }
        Ok(Self { nodes: raw.nodes })
    }
}

impl<V> IndexGraph<V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates a graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Builds a graph from values and an adjacency list (`adjacency[i]` lists
    /// the neighbors of node `i`).
    ///
    /// # Errors
    /// [`BuildError`] if the lengths disagree or a neighbor is out of range.
    pub fn from_adjacency<I>(values: I, adjacency: &[Vec<usize>]) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = V>,
    {
        let values: Vec<V> = values.into_iter().collect();
        validate_adjacency(values.len(), adjacency)?;
        let nodes = values
            .into_iter()
            .zip(adjacency)
            .map(|(value, row)| NodeData {
                value,
                neighbors: row.iter().copied().map(NodeId).collect(),
            })
            .collect();
        Ok(Self { nodes })
    }

    /// Adds a node and returns its id.
    pub fn add_node(&mut self, value: V) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            value,
            neighbors: Vec::new(),
        });
        id
    }

    /// Adds a directed edge `source -> target`.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if either endpoint does not exist.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<(), GraphError> {
        self.check(target)?;
        self.entry_mut(source)?.neighbors.push(target);
        Ok(())
    }

    /// Value of `node`.
    pub fn value(&self, node: NodeId) -> Option<&V> {
        self.nodes.get(node.index()).map(|n| &n.value)
    }

    /// Outgoing neighbors of `node` in insertion order; empty for unknown ids.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.index())
            .map(|n| n.neighbors.as_slice())
            .unwrap_or_default()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum()
    }

    /// Iterates over all nodes.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &V)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), &n.value))
    }

    fn check(&self, node: NodeId) -> Result<(), GraphError> {
        if node.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(node.index()))
        }
    }

    fn entry_mut(&mut self, node: NodeId) -> Result<&mut NodeData<V>, GraphError> {
        self.nodes
            .get_mut(node.index())
            .ok_or(GraphError::UnknownNode(node.index()))
    }
}

impl<V: Clone> IndexGraph<V> {
    /// Copies the subgraph reachable from `start` into a new graph.
    ///
    /// Ids in the copy are assigned in DFS preorder, so the start node's copy is
    /// always `NodeId` 0. `Ok(None)` for an absent start.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] for a start id outside this graph, or
    /// [`GraphError::Clone`] if a ceiling in `limits` is hit.
    pub fn clone_reachable(
        &self,
        start: Option<NodeId>,
        limits: CloneLimits,
    ) -> Result<Option<(IndexGraph<V>, NodeId)>, GraphError> {
        Ok(self
            .clone_reachable_with_stats(start, limits)?
            .map(|(graph, root, _)| (graph, root)))
    }

    /// Like [`clone_reachable`](Self::clone_reachable), also returning
    /// [`CloneStats`].
    ///
    /// # Errors
    /// Same as [`clone_reachable`](Self::clone_reachable).
    pub fn clone_reachable_with_stats(
        &self,
        start: Option<NodeId>,
        limits: CloneLimits,
    ) -> Result<Option<(IndexGraph<V>, NodeId, CloneStats)>, GraphError> {
        let Some(start) = start else {
            return Ok(None);
        };
        self.check(start)?;

        let mut budget = Budget::new(limits);
        let mut memo: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        let mut out = IndexGraph::new();

        budget.admit_node()?;
        let root = out.add_node(self.nodes[start.index()].value.clone());
        memo[start.index()] = Some(root);

        let mut stack = vec![(start, root, 0usize)];
        budget.enter(stack.len())?;

        while let Some(frame) = stack.last_mut() {
            let (original, clone, next) = *frame;
            let Some(&neighbor) = self.nodes[original.index()].neighbors.get(next) else {
                stack.pop();
                continue;
            };
            frame.2 += 1;

            let cloned = match memo[neighbor.index()] {
                Some(existing) => existing,
                None => {
                    budget.admit_node()?;
                    let fresh = out.add_node(self.nodes[neighbor.index()].value.clone());
                    memo[neighbor.index()] = Some(fresh);
                    stack.push((neighbor, fresh, 0));
                    budget.enter(stack.len())?;
                    fresh
                }
            };

            out.nodes[clone.index()].neighbors.push(cloned);
            budget.copied_edge();
        }

        Ok(Some((out, root, budget.finish())))
    }

    /// Structure of the subgraph reachable from `start`, comparable with
    /// [`Snapshot::capture`] of a pointer graph.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] for a start id outside this graph.
    pub fn snapshot(&self, start: Option<NodeId>) -> Result<Snapshot<V>, GraphError> {
        // A clone is renumbered in preorder already; its node order is the
        // snapshot order.
        let Some((copy, _)) = self.clone_reachable(start, CloneLimits::unbounded())? else {
            return Ok(Snapshot::default());
        };
        let (values, adjacency) = copy
            .nodes
            .into_iter()
            .map(|n| (n.value, n.neighbors.into_iter().map(NodeId::index).collect::<Vec<_>>()))
            .unzip();
        Ok(Snapshot { values, adjacency })
    }
}

impl<V> Default for IndexGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Bound, CloneError};

    #[test]
    fn test_index_graph_basic() {
        let mut graph = IndexGraph::new();
        let n0 = graph.add_node("A");
        let n1 = graph.add_node("B");

        graph.add_edge(n0, n1).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.value(n0), Some(&"A"));
        assert_eq!(graph.neighbors(n0), &[n1]);
        assert!(graph.neighbors(n1).is_empty());
    }

    #[test]
    fn test_add_edge_rejects_unknown_endpoints() {
        let mut graph = IndexGraph::new();
        let n0 = graph.add_node(0);

        assert_eq!(graph.add_edge(n0, NodeId(4)), Err(GraphError::UnknownNode(4)));
        assert_eq!(graph.add_edge(NodeId(9), n0), Err(GraphError::UnknownNode(9)));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_clone_reachable_renumbers_from_zero() {
        // 0 -> 1 ; 2 -> 0 ; 1 -> 2  (a cycle), 3 unreachable
        let graph =
            IndexGraph::from_adjacency(['w', 'x', 'y', 'z'], &[vec![1], vec![2], vec![0], vec![0]]).unwrap();

        let (copy, root) = graph.clone_reachable(Some(NodeId(2)), CloneLimits::unbounded()).unwrap().unwrap();
        assert_eq!(root, NodeId(0));
        assert_eq!(copy.node_count(), 3);
        let values: Vec<char> = copy.iter_nodes().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!['y', 'w', 'x']);
        assert_eq!(copy.neighbors(NodeId(2)), &[NodeId(0)]);
    }

    #[test]
    fn test_clone_reachable_absent_and_unknown_start() {
        let graph: IndexGraph<u8> = IndexGraph::new();
        assert_eq!(graph.clone_reachable(None, CloneLimits::unbounded()), Ok(None));
        assert_eq!(
            graph.clone_reachable(Some(NodeId(0)), CloneLimits::unbounded()),
            Err(GraphError::UnknownNode(0))
        );
    }

    #[test]
    fn test_clone_reachable_respects_limits() {
        let graph = IndexGraph::from_adjacency(0..4, &[vec![1], vec![2], vec![3], vec![]]).unwrap();
        let err = graph
            .clone_reachable(Some(NodeId(0)), CloneLimits::unbounded().max_nodes(3))
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::Clone(CloneError::CycleDepthExceeded {
                bound: Bound::Nodes,
                limit: 3
            })
        );

        let (_, _, stats) = graph
            .clone_reachable_with_stats(Some(NodeId(1)), CloneLimits::unbounded().max_nodes(3))
            .unwrap()
            .unwrap();
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_deserialize_validates_neighbors() {
        let ok: IndexGraph<u8> =
            serde_json::from_str(r#"{"nodes":[{"value":1,"neighbors":[1]},{"value":2,"neighbors":[]}]}"#).unwrap();
        assert_eq!(ok.neighbors(NodeId(0)), &[NodeId(1)]);

        let bad = serde_json::from_str::<IndexGraph<u8>>(r#"{"nodes":[{"value":1,"neighbors":[3]}]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_snapshot_of_diamond() {
        let graph = IndexGraph::from_adjacency(["A", "B", "C", "D"], &[vec![1, 2], vec![3], vec![3], vec![]]).unwrap();
        let snap = graph.snapshot(Some(NodeId(0))).unwrap();
        assert_eq!(snap.values, vec!["A", "B", "D", "C"]);
        assert_eq!(snap.adjacency, vec![vec![1, 3], vec![2], vec![], vec![2]]);
    }
}
