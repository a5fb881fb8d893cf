//! Undirected edge identity.

use std::fmt;

use super::NodeId;

/// Stable arena identifier for an [`Edge`]. Identifiers are never reused
/// within one [`Graph`](super::Graph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u64);

impl EdgeId {
    pub(super) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// An unordered pair of endpoints, possibly a self-loop.
///
/// The pair is stored in canonical form (`low <= high`), so equality and
/// hashing ignore the order the endpoints were given in.
///
/// # Examples
/// ```
/// use reachgraph_core::{Edge, Graph};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("a")?;
/// let b = graph.add_node("b")?;
/// assert_eq!(Edge::new(a, b), Edge::new(b, a));
/// assert!(Edge::new(a, a).is_self_loop());
/// # Ok::<(), reachgraph_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    low: NodeId,
    high: NodeId,
}

impl Edge {
    /// Builds the edge joining `a` and `b`.
    #[must_use]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self { low, high }
    }

    /// Both endpoints, smaller id first.
    #[must_use]
    #[rustfmt::skip]
    pub const fn endpoints(&self) -> (NodeId, NodeId) { (self.low, self.high) }

    /// Whether both endpoints are the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.low == self.high
    }

    /// The endpoint opposite `node`, or `node` itself for a self-loop.
    /// Returns `None` when `node` is not an endpoint.
    #[must_use]
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if node == self.low {
            Some(self.high)
        } else if node == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}
