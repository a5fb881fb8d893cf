//! Transitive closure via Warshall's algorithm.
//!
//! [`closure`] copies the adjacency cells and, for every intermediate index
//! `k`, sets `w[i][j]` whenever `w[i][k]` and `w[k][j]` are both set. The
//! result marks `(i, j)` exactly when a walk of one or more edges leads from
//! `i` to `j`. Isolated nodes without a self-loop do not reach themselves.
//!
//! The algorithm is cubic in the node count and intended for the small,
//! hand-built graphs this crate manages.

use tracing::instrument;

use crate::matrix::{AdjacencyMatrix, BoolMatrix};

/// Reachability matrix sharing the header of the adjacency matrix it was
/// computed from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitiveClosure {
    header: Vec<String>,
    cells: BoolMatrix,
}

impl TransitiveClosure {
    /// Ordered labels naming the rows and columns.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The underlying reachability cells.
    #[must_use]
    #[rustfmt::skip]
    pub const fn matrix(&self) -> &BoolMatrix { &self.cells }

    /// Number of nodes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.header.len()
    }

    /// Whether the closure covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Position of `label` in the header.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.header.iter().position(|entry| entry == label)
    }

    /// Cell `(row, column)`.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        self.cells.get(row, column)
    }

    /// The cells as nested 0/1 rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.to_rows()
    }

    /// Reinterprets the reachability relation as an adjacency matrix, e.g.
    /// to feed it back into [`closure`].
    #[must_use]
    pub fn as_adjacency(&self) -> AdjacencyMatrix {
        AdjacencyMatrix::from_parts(self.header.clone(), self.cells.clone())
    }
}

/// Computes the transitive closure of `adjacency`.
///
/// # Examples
/// ```
/// use reachgraph_core::{Graph, build_matrix, closure};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("A")?;
/// let b = graph.add_node("B")?;
/// let c = graph.add_node("C")?;
/// graph.add_edge(a, b)?;
/// graph.add_edge(b, c)?;
///
/// let reach = closure(&build_matrix(&graph));
/// assert_eq!(reach.to_rows(), vec![vec![1, 1, 1]; 3]);
/// # Ok::<(), reachgraph_core::GraphError>(())
/// ```
#[must_use]
#[instrument(name = "core.closure", level = "debug", skip(adjacency), fields(nodes = adjacency.len()))]
pub fn closure(adjacency: &AdjacencyMatrix) -> TransitiveClosure {
    let (header, mut w) = adjacency.clone().into_parts();
    warshall(&mut w);
    TransitiveClosure { header, cells: w }
}

/// In-place Warshall pass.
///
/// Row `k` cannot change while `k` is the intermediate index (`w[k][j] |=
/// w[k][k] && w[k][j]` is a no-op), so OR-ing a snapshot of row `k` into
/// every row `i` with `w[i][k]` set is the textbook triple loop.
pub(crate) fn warshall(w: &mut BoolMatrix) {
    let size = w.size();
    for k in 0..size {
        let Some(pivot) = w.row(k).map(<[bool]>::to_vec) else {
            continue;
        };
        for i in 0..size {
            if w.get(i, k) != Some(true) {
                continue;
            }
            if let Some(row) = w.row_mut(i) {
                for (cell, via) in row.iter_mut().zip(&pivot) {
                    *cell |= *via;
                }
            }
        }
    }
}

#[cfg(test)]
mod property;
