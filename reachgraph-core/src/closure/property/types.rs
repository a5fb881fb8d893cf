//! Fixture types for closure property tests.

use test_strategy::Arbitrary;

use crate::{Graph, NodeId};

/// Shape of a generated graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum Topology {
    /// Roughly one random edge per node.
    #[weight(3)]
    Sparse,
    /// Most pairs connected.
    #[weight(2)]
    Dense,
    /// Several components with no edges between them.
    #[weight(3)]
    Disconnected,
    /// A single chain visiting nodes in shuffled order.
    #[weight(1)]
    Path,
    /// Sparse edges plus self-loops on some nodes.
    #[weight(2)]
    SelfLoops,
    /// Nodes only.
    #[weight(1)]
    Edgeless,
}

/// Generated graph described by node indices.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    /// Number of nodes; node `i` is labelled with [`label_for`].
    pub node_count: usize,
    /// Undirected edges as index pairs, possibly repeated or reversed.
    pub edges: Vec<(usize, usize)>,
    /// Shape used during generation.
    pub topology: Topology,
}

/// Zero-padded labels keep lexicographic header order equal to index order.
pub(super) fn label_for(index: usize) -> String {
    format!("{index:03}")
}

impl GraphFixture {
    /// Materialises the fixture as a [`Graph`], returning node ids by index.
    pub(super) fn build_graph(&self) -> (Graph, Vec<NodeId>) {
        let mut graph = Graph::new();
        let ids: Vec<NodeId> = (0..self.node_count)
            .map(|index| {
                graph
                    .add_node(label_for(index))
                    .expect("generated labels are distinct")
            })
            .collect();
        for &(left, right) in &self.edges {
            graph
                .add_edge(ids[left], ids[right])
                .expect("generated endpoints exist");
        }
        (graph, ids)
    }
}
