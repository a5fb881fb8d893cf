//! Node storage for the graph arena.
//!
//! Nodes carry their label, the selection flag driven by the controller, a
//! self-loop flag mirroring the `{n, n}` edge, and non-owning back-references
//! to incident edges.

use std::collections::BTreeSet;
use std::fmt;

use super::EdgeId;

/// Stable arena identifier for a [`Node`]. Identifiers are never reused
/// within one [`Graph`](super::Graph), so a stale id cannot alias a newer
/// node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A labelled vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    label: String,
    selected: bool,
    self_loop: bool,
    edges: BTreeSet<EdgeId>,
}

impl Node {
    pub(super) fn new(id: NodeId, label: String) -> Self {
        Self {
            id,
            label,
            selected: false,
            self_loop: false,
            edges: BTreeSet::new(),
        }
    }

    /// Arena identifier of this node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> NodeId { self.id }

    /// The unique label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the node is the provisional endpoint of an edge toggle.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_selected(&self) -> bool { self.selected }

    /// Whether the node currently carries a self-loop.
    #[must_use]
    #[rustfmt::skip]
    pub const fn has_self_loop(&self) -> bool { self.self_loop }

    /// Incident edges in id order. A self-loop appears once.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    /// Number of incident edges, counting a self-loop once.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub(super) fn attach(&mut self, edge: EdgeId) {
        self.edges.insert(edge);
    }

    pub(super) fn detach(&mut self, edge: EdgeId) {
        self.edges.remove(&edge);
    }

    pub(super) fn take_edges(&mut self) -> BTreeSet<EdgeId> {
        std::mem::take(&mut self.edges)
    }

    pub(super) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(super) fn set_self_loop(&mut self, self_loop: bool) {
        self.self_loop = self_loop;
    }
}
