use anyhow::{Context, Result};
use ghostclone::{Bound, CloneError, CloneLimits, GraphError, IndexGraph, NodeId};

#[test]
fn index_graph_clone_keeps_diamond_shape() -> Result<()> {
    let mut graph = IndexGraph::with_capacity(4);
    let a = graph.add_node("A");
    let b = graph.add_node("B");
    let c = graph.add_node("C");
    let d = graph.add_node("D");
    graph.add_edge(a, b)?;
    graph.add_edge(a, c)?;
    graph.add_edge(b, d)?;
    graph.add_edge(c, d)?;

    let (copy, root) = graph
        .clone_reachable(Some(a), CloneLimits::unbounded())?
        .context("diamond clone")?;

    assert_eq!(copy.node_count(), 4);
    assert_eq!(copy.edge_count(), 4);
    let [b2, c2] = copy.neighbors(root) else {
        anyhow::bail!("root should have two neighbors");
    };
    assert_eq!(copy.neighbors(*b2), copy.neighbors(*c2));
    assert_eq!(copy.value(copy.neighbors(*b2)[0]), Some(&"D"));

    // The input is untouched.
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.neighbors(a), &[b, c]);
    Ok(())
}

#[test]
fn json_round_trip_then_clone() -> Result<()> {
    let document = r#"{
        "nodes": [
            { "value": "root", "neighbors": [1, 0] },
            { "value": "leaf", "neighbors": [] },
            { "value": "orphan", "neighbors": [0] }
        ]
    }"#;
    let graph: IndexGraph<String> = serde_json::from_str(document)?;
    assert_eq!(graph.node_count(), 3);

    let (copy, _) = graph
        .clone_reachable(Some(NodeId::from_index(0)), CloneLimits::unbounded())?
        .context("clone")?;
    let reparsed: IndexGraph<String> = serde_json::from_str(&serde_json::to_string(&copy)?)?;
    assert_eq!(reparsed, copy);
    assert_eq!(copy.node_count(), 2);
    assert_eq!(copy.neighbors(NodeId::from_index(0)), &[NodeId::from_index(1), NodeId::from_index(0)]);
    Ok(())
}

#[test]
fn limits_from_json_bound_the_clone() -> Result<()> {
    let limits = CloneLimits::from_json(r#"{ "max_nodes": 3, "max_depth": 100 }"#)?;
    let adjacency: Vec<Vec<usize>> = (0..5).map(|i| vec![(i + 1) % 5]).collect();
    let graph = IndexGraph::from_adjacency(0..5, &adjacency)?;

    let err = graph
        .clone_reachable(Some(NodeId::from_index(0)), limits)
        .expect_err("five-node cycle exceeds a three-node ceiling");
    assert_eq!(
        err,
        GraphError::Clone(CloneError::CycleDepthExceeded {
            bound: Bound::Nodes,
            limit: 3
        })
    );
    Ok(())
}
