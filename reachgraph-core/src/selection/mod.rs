//! Interactive edge-toggle state machine.
//!
//! Pointer gestures reach the core as [`SelectionEvent`]s. The pure
//! [`transition`] function maps the current [`SelectionState`] and an event
//! to the next state plus a list of [`SelectionEffect`]s; the
//! [`SelectionController`] applies those effects to a [`Graph`].
//!
//! Clicking node `a` then node `b` toggles the edge `{a, b}`. A self gesture
//! on an idle controller toggles the node's self-loop directly. At most one
//! node is pending at any time.

use tracing::{debug, instrument};

use crate::{
    Result,
    error::GraphError,
    graph::{EdgeId, Graph, NodeId},
    instrumentation,
};

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// No node is waiting for a partner.
    #[default]
    Idle,
    /// The node has been selected and waits for the second endpoint.
    Pending(NodeId),
}

/// Discrete input forwarded by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A node was targeted. `self_gesture` marks the modifier-qualified
    /// click that addresses the node's self-loop directly.
    Select {
        /// The targeted node.
        node: NodeId,
        /// Whether the gesture targets the self-loop.
        self_gesture: bool,
    },
    /// The user asked for a node to be deleted.
    RemoveRequest {
        /// The node to delete.
        node: NodeId,
    },
}

/// A graph mutation requested by [`transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEffect {
    /// Set the node's `selected` flag.
    MarkSelected(NodeId),
    /// Remove the edge `{a, b}` if present, otherwise add it. For `a == b`
    /// the graph keeps the node's self-loop flag in step with the edge.
    ToggleEdge {
        /// First endpoint.
        a: NodeId,
        /// Second endpoint.
        b: NodeId,
    },
    /// Clear the node's `selected` flag.
    ClearSelected(NodeId),
    /// Delete the node and its incident edges.
    RemoveNode(NodeId),
}

/// Summary of what a handled event changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The node became pending.
    Selected(NodeId),
    /// A new edge joins `a` and `b`.
    EdgeAdded {
        /// The created edge.
        edge: EdgeId,
        /// First endpoint.
        a: NodeId,
        /// Second endpoint.
        b: NodeId,
    },
    /// The edge joining `a` and `b` was removed.
    EdgeRemoved {
        /// First endpoint.
        a: NodeId,
        /// Second endpoint.
        b: NodeId,
    },
    /// The node and its incident edges were removed.
    NodeRemoved(NodeId),
    /// Nothing changed, e.g. a removal request for an absent node.
    Ignored,
}

/// Computes the next state and the effects for `event`.
///
/// # Examples
/// ```
/// use reachgraph_core::{Graph, SelectionEffect, SelectionEvent, SelectionState, transition};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("a")?;
/// let b = graph.add_node("b")?;
///
/// let (state, effects) = transition(
///     SelectionState::Idle,
///     SelectionEvent::Select { node: a, self_gesture: false },
/// );
/// assert_eq!(state, SelectionState::Pending(a));
/// assert_eq!(effects, vec![SelectionEffect::MarkSelected(a)]);
///
/// let (state, effects) = transition(state, SelectionEvent::Select { node: b, self_gesture: false });
/// assert_eq!(state, SelectionState::Idle);
/// assert_eq!(effects[0], SelectionEffect::ToggleEdge { a, b });
/// # Ok::<(), reachgraph_core::GraphError>(())
/// ```
#[must_use]
pub fn transition(
    state: SelectionState,
    event: SelectionEvent,
) -> (SelectionState, Vec<SelectionEffect>) {
    use SelectionEffect::{ClearSelected, MarkSelected, RemoveNode, ToggleEdge};
    use SelectionEvent::{RemoveRequest, Select};
    use SelectionState::{Idle, Pending};

    match (state, event) {
        (
            Idle,
            Select {
                node,
                self_gesture: false,
            },
        ) => (Pending(node), vec![MarkSelected(node)]),
        (
            Idle,
            Select {
                node,
                self_gesture: true,
            },
        ) => (Idle, vec![ToggleEdge { a: node, b: node }]),
        (Pending(a), Select { node: b, .. }) => {
            let mut effects = vec![ToggleEdge { a, b }, ClearSelected(a)];
            if a != b {
                effects.push(ClearSelected(b));
            }
            (Idle, effects)
        }
        (Pending(pending), RemoveRequest { node }) if pending == node => {
            (Idle, vec![RemoveNode(node)])
        }
        (current, RemoveRequest { node }) => (current, vec![RemoveNode(node)]),
    }
}

/// Applies [`transition`] to a live [`Graph`].
///
/// # Examples
/// ```
/// use reachgraph_core::{Graph, SelectionController, SelectionEvent, SelectionOutcome};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("a")?;
/// let mut controller = SelectionController::new();
///
/// let outcome = controller.handle(
///     &mut graph,
///     SelectionEvent::Select { node: a, self_gesture: true },
/// )?;
/// assert!(matches!(outcome, SelectionOutcome::EdgeAdded { .. }));
/// assert!(graph.node(a).is_some_and(|node| node.has_self_loop()));
/// # Ok::<(), reachgraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    #[rustfmt::skip]
    pub const fn state(&self) -> SelectionState { self.state }

    /// The pending node, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<NodeId> {
        match self.state {
            SelectionState::Pending(node) => Some(node),
            SelectionState::Idle => None,
        }
    }

    /// Runs `event` through [`transition`] and applies the effects to
    /// `graph`.
    ///
    /// A pending node that disappeared from `graph` without a
    /// [`Self::node_removed`] notification is discarded before the event is
    /// handled.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when a `Select` event names a node
    /// that is not in `graph`. State and graph are unchanged in that case.
    #[instrument(name = "core.selection.handle", level = "debug", err, skip(self, graph))]
    pub fn handle(&mut self, graph: &mut Graph, event: SelectionEvent) -> Result<SelectionOutcome> {
        if let SelectionEvent::Select { node, .. } = event {
            if !graph.contains_node(node) {
                return Err(GraphError::UnknownNode { node });
            }
        }
        if self.pending().is_some_and(|pending| !graph.contains_node(pending)) {
            debug!(state = ?self.state, "discarding stale pending selection");
            self.state = SelectionState::Idle;
        }

        let (next, effects) = transition(self.state, event);
        let mut outcome = SelectionOutcome::Ignored;
        for effect in effects {
            let applied = apply(graph, effect)?;
            if applied != SelectionOutcome::Ignored {
                outcome = applied;
            }
        }
        self.state = next;
        Ok(outcome)
    }

    /// Notification that `node` was removed outside the controller. Drops a
    /// pending selection of that node.
    pub fn node_removed(&mut self, node: NodeId) {
        if self.state == SelectionState::Pending(node) {
            self.state = SelectionState::Idle;
        }
    }

    /// Abandons the pending selection without touching any edge and returns
    /// the node that was pending.
    pub fn cancel(&mut self, graph: &mut Graph) -> Option<NodeId> {
        let pending = self.pending()?;
        self.state = SelectionState::Idle;
        // The node may already be gone; only the flag needs clearing.
        graph.set_selected(pending, false).ok()?;
        Some(pending)
    }
}

fn apply(graph: &mut Graph, effect: SelectionEffect) -> Result<SelectionOutcome> {
    match effect {
        SelectionEffect::MarkSelected(node) => {
            graph.set_selected(node, true)?;
            Ok(SelectionOutcome::Selected(node))
        }
        SelectionEffect::ClearSelected(node) => {
            graph.set_selected(node, false)?;
            Ok(SelectionOutcome::Ignored)
        }
        SelectionEffect::ToggleEdge { a, b } => toggle_edge(graph, a, b),
        SelectionEffect::RemoveNode(node) => Ok(graph
            .remove_node(node)
            .map_or(SelectionOutcome::Ignored, |_| {
                SelectionOutcome::NodeRemoved(node)
            })),
    }
}

fn toggle_edge(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<SelectionOutcome> {
    let outcome = match graph.find_edge(a, b) {
        Some(edge) => {
            graph.remove_edge(edge);
            SelectionOutcome::EdgeRemoved { a, b }
        }
        None => {
            let edge = graph.add_edge(a, b)?;
            SelectionOutcome::EdgeAdded { edge, a, b }
        }
    };
    instrumentation::record_edge_toggle();
    Ok(outcome)
}
