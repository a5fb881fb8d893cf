//! The editing session facade.
//!
//! A [`Session`] bundles the live [`Graph`], the [`SelectionController`], the
//! automatic label counter and the last [`Calculation`]. Presentation code
//! talks to the session only; the session routes gestures through the
//! controller and runs the matrix and closure pipeline on request.

use tracing::{debug, instrument};

use crate::{
    Result,
    builder::SessionBuilder,
    closure::{TransitiveClosure, closure},
    error::GraphError,
    graph::{Graph, NodeId},
    instrumentation,
    matrix::{AdjacencyMatrix, LabelOrder, build_matrix_with},
    query::reachable,
    selection::{SelectionController, SelectionEvent, SelectionOutcome, SelectionState},
};

/// Snapshot produced by [`Session::calculate`]: the adjacency matrix and its
/// transitive closure, both detached from the live graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Calculation {
    matrix: AdjacencyMatrix,
    closure: TransitiveClosure,
    nodes: Vec<NodeId>,
}

impl Calculation {
    /// The adjacency matrix.
    #[must_use]
    #[rustfmt::skip]
    pub const fn matrix(&self) -> &AdjacencyMatrix { &self.matrix }

    /// The transitive closure of [`Self::matrix`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn closure(&self) -> &TransitiveClosure { &self.closure }

    /// Ids of the nodes named by the header, in header order.
    #[must_use]
    pub fn node_ids(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Whether `label` named `node` when the snapshot was taken.
    fn covers(&self, label: &str, node: NodeId) -> bool {
        self.closure
            .index_of(label)
            .and_then(|index| self.nodes.get(index))
            == Some(&node)
    }

    /// Splits the snapshot into its two matrices.
    #[must_use]
    pub fn into_parts(self) -> (AdjacencyMatrix, TransitiveClosure) {
        (self.matrix, self.closure)
    }
}

/// Answer to [`Session::query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathAnswer {
    /// A walk of one or more edges joins the two labels.
    Reachable,
    /// No walk joins the two labels.
    Unreachable,
    /// No calculation covers both labels as they currently exist.
    Unavailable,
}

/// Interactive editing session.
///
/// # Examples
/// ```
/// use reachgraph_core::{PathAnswer, Session};
///
/// let mut session = Session::new();
/// let a = session.add_node("A")?;
/// let b = session.add_node("B")?;
/// session.select_node(a, false)?;
/// session.select_node(b, false)?;
///
/// let calculation = session.calculate();
/// assert_eq!(calculation.closure().to_rows(), vec![vec![1, 1], vec![1, 1]]);
/// assert_eq!(session.query("A", "B"), PathAnswer::Reachable);
/// # Ok::<(), reachgraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    graph: Graph,
    selection: SelectionController,
    label_order: LabelOrder,
    next_label: u64,
    last: Option<Calculation>,
}

impl Default for Session {
    fn default() -> Self {
        SessionBuilder::new().build()
    }
}

impl Session {
    /// Creates an empty session with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn configured(label_order: LabelOrder, first_label: u64) -> Self {
        Self {
            graph: Graph::new(),
            selection: SelectionController::new(),
            label_order,
            next_label: first_label,
            last: None,
        }
    }

    /// Adds a node with an explicit label.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateLabel`] when the label is taken.
    pub fn add_node(&mut self, label: impl Into<String>) -> Result<NodeId> {
        self.graph.add_node(label)
    }

    /// Adds a node under the next free automatic label.
    ///
    /// When another node is pending, the new node is connected to it and the
    /// selection is cleared.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateLabel`] when every remaining number is
    /// already taken.
    ///
    /// # Examples
    /// ```
    /// use reachgraph_core::Session;
    ///
    /// let mut session = Session::new();
    /// session.add_node("1")?;
    /// let placed = session.place_node()?;
    /// assert_eq!(session.graph().node(placed).map(|node| node.label()), Some("2"));
    /// # Ok::<(), reachgraph_core::GraphError>(())
    /// ```
    #[instrument(name = "core.place_node", level = "debug", err, skip(self))]
    pub fn place_node(&mut self) -> Result<NodeId> {
        let number = (self.next_label..=u64::MAX)
            .find(|candidate| self.graph.node_by_label(&candidate.to_string()).is_none())
            .ok_or_else(|| GraphError::DuplicateLabel {
                label: u64::MAX.to_string(),
            })?;
        let id = self.graph.add_node(number.to_string())?;
        self.next_label = number.saturating_add(1);

        if let Some(pending) = self.selection.pending() {
            if self.graph.contains_node(pending) {
                debug!(%pending, node = %id, "connecting placed node to pending selection");
                self.selection.handle(
                    &mut self.graph,
                    SelectionEvent::Select {
                        node: id,
                        self_gesture: false,
                    },
                )?;
            } else {
                self.selection.node_removed(pending);
            }
        }
        Ok(id)
    }

    /// Requests removal of `node`, dropping a pending selection of it.
    /// Removing an absent node yields [`SelectionOutcome::Ignored`].
    ///
    /// # Errors
    /// Propagates graph failures raised while applying the removal.
    pub fn remove_node(&mut self, node: NodeId) -> Result<SelectionOutcome> {
        self.selection
            .handle(&mut self.graph, SelectionEvent::RemoveRequest { node })
    }

    /// Forwards a node click to the controller.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when `node` is not in the graph.
    pub fn select_node(&mut self, node: NodeId, self_gesture: bool) -> Result<SelectionOutcome> {
        self.selection.handle(
            &mut self.graph,
            SelectionEvent::Select { node, self_gesture },
        )
    }

    /// Drops the pending selection without touching any edge.
    pub fn cancel_selection(&mut self) -> Option<NodeId> {
        self.selection.cancel(&mut self.graph)
    }

    /// Identifier of the node labelled `label`.
    #[must_use]
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.graph.node_by_label(label).map(|node| node.id())
    }

    /// All labels, arranged by the configured [`LabelOrder`].
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .graph
            .nodes()
            .map(|node| node.label().to_owned())
            .collect();
        labels.sort_by(|left, right| self.label_order.compare(left, right));
        labels
    }

    /// The live graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn graph(&self) -> &Graph { &self.graph }

    /// Current controller state.
    #[must_use]
    pub const fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// The configured header order.
    #[must_use]
    #[rustfmt::skip]
    pub const fn label_order(&self) -> LabelOrder { self.label_order }

    /// The most recent calculation, if any.
    #[must_use]
    pub const fn last_calculation(&self) -> Option<&Calculation> {
        self.last.as_ref()
    }

    /// Builds the adjacency matrix and its closure from the current graph and
    /// keeps a copy for [`Self::query`].
    #[instrument(
        name = "core.calculate",
        skip(self),
        fields(nodes = self.graph.node_count(), edges = self.graph.edge_count()),
    )]
    pub fn calculate(&mut self) -> Calculation {
        let matrix = build_matrix_with(&self.graph, self.label_order);
        let reach = closure(&matrix);
        let nodes = matrix
            .header()
            .iter()
            .filter_map(|label| self.node_id(label))
            .collect();
        instrumentation::record_calculation(matrix.len());
        debug!(reachable_pairs = reach.matrix().count_ones(), "closure computed");
        let calculation = Calculation {
            matrix,
            closure: reach,
            nodes,
        };
        self.last = Some(calculation.clone());
        calculation
    }

    /// Answers whether `from` reaches `to` according to the last
    /// calculation.
    ///
    /// Returns [`PathAnswer::Unavailable`] when nothing has been calculated
    /// yet, when either label is missing from that calculation, or when
    /// either label no longer names the node it named at calculation time.
    /// A label freed by a removal and taken by a new node does not count as
    /// the same node.
    #[must_use]
    #[instrument(name = "core.query", level = "debug", skip(self), ret)]
    pub fn query(&self, from: &str, to: &str) -> PathAnswer {
        let Some(calculation) = &self.last else {
            return PathAnswer::Unavailable;
        };
        let current = |label: &str| {
            self.node_id(label)
                .is_some_and(|node| calculation.covers(label, node))
        };
        if !current(from) || !current(to) {
            return PathAnswer::Unavailable;
        }
        match reachable(calculation.closure(), from, to) {
            Ok(true) => PathAnswer::Reachable,
            Ok(false) => PathAnswer::Unreachable,
            Err(_) => PathAnswer::Unavailable,
        }
    }
}
