//! Property runners for the closure engine.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use super::{oracle::bfs_reachability, types::GraphFixture};
use crate::{build_matrix, closure};

/// The closure agrees cell for cell with the BFS oracle.
pub(super) fn run_oracle_equivalence_property(fixture: &GraphFixture) -> TestCaseResult {
    let (graph, _) = fixture.build_graph();
    let reach = closure(&build_matrix(&graph));
    let expected = bfs_reachability(fixture.node_count, &fixture.edges);

    for (i, row) in expected.iter().enumerate() {
        for (j, want) in row.iter().enumerate() {
            let got = reach.get(i, j);
            if got != Some(*want) {
                return Err(TestCaseError::fail(format!(
                    "{:?} graph with {} nodes: cell ({i}, {j}) is {got:?}, oracle says {want}",
                    fixture.topology, fixture.node_count,
                )));
            }
        }
    }
    Ok(())
}

/// Symmetry, containment, idempotence and the diagonal rule.
pub(super) fn run_structural_invariants_property(fixture: &GraphFixture) -> TestCaseResult {
    let (graph, ids) = fixture.build_graph();
    let adjacency = build_matrix(&graph);
    let reach = closure(&adjacency);
    let size = adjacency.len();

    if !adjacency.matrix().is_symmetric() {
        return Err(TestCaseError::fail("adjacency matrix is not symmetric"));
    }
    if !reach.matrix().is_symmetric() {
        return Err(TestCaseError::fail("closure is not symmetric"));
    }

    for i in 0..size {
        for j in 0..size {
            if adjacency.get(i, j) == Some(true) && reach.get(i, j) != Some(true) {
                return Err(TestCaseError::fail(format!(
                    "edge ({i}, {j}) missing from closure"
                )));
            }
        }
    }

    for (index, id) in ids.iter().enumerate() {
        let has_edge = graph.node(*id).is_some_and(|node| node.degree() > 0);
        if reach.get(index, index) != Some(has_edge) {
            return Err(TestCaseError::fail(format!(
                "node {index}: diagonal must be set iff the node has an incident edge"
            )));
        }
    }

    if closure(&reach.as_adjacency()) != reach {
        return Err(TestCaseError::fail("closure is not idempotent"));
    }
    Ok(())
}
