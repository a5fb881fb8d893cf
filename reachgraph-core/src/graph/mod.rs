//! Node and edge store.
//!
//! [`Graph`] owns two arenas: nodes keyed by [`NodeId`] and edges keyed by
//! [`EdgeId`]. A label index enforces label uniqueness and a pair index keeps
//! at most one edge per unordered pair. Nodes only hold edge ids, so the
//! graph is the single owner of edge storage and removing a node cascades
//! through those ids.

mod edge;
mod node;

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::{Result, error::GraphError};

pub use self::{
    edge::{Edge, EdgeId},
    node::{Node, NodeId},
};

/// Undirected graph with unique node labels and at most one edge per
/// unordered pair.
///
/// # Examples
/// ```
/// use reachgraph_core::Graph;
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("a")?;
/// let b = graph.add_node("b")?;
/// let edge = graph.add_edge(a, b)?;
/// assert_eq!(graph.add_edge(b, a)?, edge);
/// assert_eq!(graph.find_edge(b, a), Some(edge));
///
/// graph.remove_node(a);
/// assert_eq!(graph.edge_count(), 0);
/// # Ok::<(), reachgraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    labels: HashMap<String, NodeId>,
    pairs: HashMap<Edge, EdgeId>,
    next_node: u64,
    next_edge: u64,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node labelled `label`.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateLabel`] when the label is already in
    /// use; the graph is left untouched.
    pub fn add_node(&mut self, label: impl Into<String>) -> Result<NodeId> {
        let label = label.into();
        if self.labels.contains_key(&label) {
            return Err(GraphError::DuplicateLabel { label });
        }

        let id = NodeId::new(self.next_node);
        self.next_node += 1;
        debug!(node = %id, label = label.as_str(), "node added");
        self.labels.insert(label.clone(), id);
        self.nodes.insert(id, Node::new(id, label));
        Ok(id)
    }

    /// Removes `id` together with every incident edge and returns the
    /// detached node. Returns `None` when the node is absent.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let mut node = self.nodes.remove(&id)?;
        self.labels.remove(node.label());

        let incident = node.take_edges();
        for edge_id in &incident {
            let Some(edge) = self.edges.remove(edge_id) else {
                continue;
            };
            self.pairs.remove(&edge);
            if let Some(partner) = edge.opposite(id).filter(|partner| *partner != id) {
                if let Some(partner) = self.nodes.get_mut(&partner) {
                    partner.detach(*edge_id);
                }
            }
        }

        debug!(
            node = %id,
            label = node.label(),
            cascaded_edges = incident.len(),
            "node removed"
        );
        Some(node)
    }

    /// Connects `src` and `dest`, returning the edge for the unordered pair.
    ///
    /// Adding a pair that is already connected returns the existing edge and
    /// changes nothing. A self-loop also raises the node's self-loop flag.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when either endpoint is absent.
    pub fn add_edge(&mut self, src: NodeId, dest: NodeId) -> Result<EdgeId> {
        for node in [src, dest] {
            if !self.nodes.contains_key(&node) {
                return Err(GraphError::UnknownNode { node });
            }
        }

        let edge = Edge::new(src, dest);
        if let Some(existing) = self.pairs.get(&edge) {
            return Ok(*existing);
        }

        let id = EdgeId::new(self.next_edge);
        self.next_edge += 1;
        self.attach(src, id);
        if src == dest {
            self.mark_self_loop(src, true);
        } else {
            self.attach(dest, id);
        }
        self.pairs.insert(edge, id);
        self.edges.insert(id, edge);
        debug!(edge = %id, src = %src, dest = %dest, "edge added");
        Ok(id)
    }

    /// Removes `id` from the graph and from both endpoints, clearing the
    /// self-loop flag for a self-loop. Returns `None` when the edge is absent.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        self.pairs.remove(&edge);

        let (low, high) = edge.endpoints();
        self.detach(low, id);
        if high == low {
            self.mark_self_loop(low, false);
        } else {
            self.detach(high, id);
        }
        debug!(edge = %id, low = %low, high = %high, "edge removed");
        Some(edge)
    }

    /// Looks up the edge joining `a` and `b` in either order.
    #[must_use]
    pub fn find_edge(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.pairs.get(&Edge::new(a, b)).copied()
    }

    /// Returns the node stored under `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Resolves `label` to its node.
    #[must_use]
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        self.labels.get(label).and_then(|id| self.nodes.get(id))
    }

    /// Returns the edge stored under `id`.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Iterates nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Iterates edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().map(|(id, edge)| (*id, edge))
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether `id` names a live node.
    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sets the selection flag on `id`.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when the node is absent.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> Result<()> {
        self.node_mut(id)?.set_selected(selected);
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or(GraphError::UnknownNode { node: id })
    }

    fn attach(&mut self, node: NodeId, edge: EdgeId) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.attach(edge);
        }
    }

    fn detach(&mut self, node: NodeId, edge: EdgeId) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.detach(edge);
        }
    }

    fn mark_self_loop(&mut self, node: NodeId, present: bool) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.set_self_loop(present);
        }
    }
}
