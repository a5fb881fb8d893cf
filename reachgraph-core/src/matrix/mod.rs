//! Adjacency matrix snapshots.
//!
//! [`build_matrix`] turns a [`Graph`] into an [`AdjacencyMatrix`]: nodes are
//! sorted by label to form the header and every edge sets its two mirrored
//! cells. The snapshot owns its data and never refers back to the graph.

mod order;

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::instrument;

use crate::graph::{Graph, Node, NodeId};

pub use self::order::LabelOrder;

/// Error returned when raw rows or headers do not describe a square matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MatrixError {
    /// A row length differs from the number of rows.
    #[error("row {row} has {len} cells but the matrix has {expected} rows")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Number of rows.
        expected: usize,
    },
    /// The header length differs from the matrix size.
    #[error("header names {header} labels for a {size}x{size} matrix")]
    HeaderMismatch {
        /// Number of header labels.
        header: usize,
        /// Matrix dimension.
        size: usize,
    },
    /// The header names the same label twice.
    #[error("header repeats label `{label}`")]
    DuplicateHeader {
        /// The repeated label.
        label: String,
    },
}

/// Square boolean matrix stored row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoolMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl BoolMatrix {
    /// An all-zero `size` by `size` matrix.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Builds a matrix from 0/1 rows; any non-zero cell counts as set.
    ///
    /// # Errors
    /// Returns [`MatrixError::NotSquare`] when a row length differs from the
    /// row count.
    ///
    /// # Examples
    /// ```
    /// use reachgraph_core::BoolMatrix;
    ///
    /// let matrix = BoolMatrix::from_rows(&[vec![0, 1], vec![1, 0]])?;
    /// assert_eq!(matrix.get(0, 1), Some(true));
    /// assert_eq!(matrix.get(2, 0), None);
    /// # Ok::<(), reachgraph_core::MatrixError>(())
    /// ```
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MatrixError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            cells.extend(values.iter().map(|value| *value != 0));
        }
        Ok(Self { size, cells })
    }

    /// Number of rows (and columns).
    #[must_use]
    #[rustfmt::skip]
    pub const fn size(&self) -> usize { self.size }

    /// Whether the matrix has no rows.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.size == 0 }

    /// Cell `(row, column)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        self.cells.get(self.offset(row, column)?).copied()
    }

    /// Row `row` as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        let start = self.offset(row, 0)?;
        self.cells.get(start..start + self.size)
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut [bool]> {
        let start = self.offset(row, 0)?;
        self.cells.get_mut(start..start + self.size)
    }

    pub(crate) fn set(&mut self, row: usize, column: usize) {
        if let Some(cell) = self
            .offset(row, column)
            .and_then(|offset| self.cells.get_mut(offset))
        {
            *cell = true;
        }
    }

    const fn offset(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.size && column < self.size {
            Some(row * self.size + column)
        } else {
            None
        }
    }

    /// Whether `m[i][j] == m[j][i]` for every cell.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Number of set cells.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// The matrix as nested 0/1 rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size.max(1))
            .take(self.size)
            .map(|row| row.iter().map(|cell| u8::from(*cell)).collect())
            .collect()
    }
}

/// Labelled 0/1 adjacency matrix. `header()[i]` names row and column `i`.
///
/// # Examples
/// ```
/// use reachgraph_core::{Graph, build_matrix};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("A")?;
/// let b = graph.add_node("B")?;
/// graph.add_edge(b, a)?;
///
/// let matrix = build_matrix(&graph);
/// assert_eq!(matrix.header(), ["A", "B"]);
/// assert_eq!(matrix.to_rows(), vec![vec![0, 1], vec![1, 0]]);
/// # Ok::<(), reachgraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    header: Vec<String>,
    cells: BoolMatrix,
}

impl AdjacencyMatrix {
    /// Pairs a header with a matrix of the same size.
    ///
    /// # Errors
    /// Returns [`MatrixError::HeaderMismatch`] when the sizes differ and
    /// [`MatrixError::DuplicateHeader`] when a label repeats.
    pub fn new(header: Vec<String>, cells: BoolMatrix) -> Result<Self, MatrixError> {
        if header.len() != cells.size() {
            return Err(MatrixError::HeaderMismatch {
                header: header.len(),
                size: cells.size(),
            });
        }
        let mut seen = HashSet::with_capacity(header.len());
        for label in &header {
            if !seen.insert(label.as_str()) {
                return Err(MatrixError::DuplicateHeader {
                    label: label.clone(),
                });
            }
        }
        Ok(Self { header, cells })
    }

    /// Ordered labels naming the rows and columns.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The underlying 0/1 cells.
    #[must_use]
    #[rustfmt::skip]
    pub const fn matrix(&self) -> &BoolMatrix { &self.cells }

    /// Number of nodes in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.header.len()
    }

    /// Whether the snapshot has no nodes.
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

    pub(crate) const fn from_parts(header: Vec<String>, cells: BoolMatrix) -> Self {
        Self { header, cells }
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, BoolMatrix) {
        (self.header, self.cells)
    }
}

/// Builds the adjacency matrix of `graph` with lexicographic label order.
#[must_use]
pub fn build_matrix(graph: &Graph) -> AdjacencyMatrix {
    build_matrix_with(graph, LabelOrder::default())
}

/// Builds the adjacency matrix of `graph`, arranging the header by `order`.
///
/// # Examples
/// ```
/// use reachgraph_core::{Graph, LabelOrder, build_matrix_with};
///
/// let mut graph = Graph::new();
/// for label in ["1", "2", "10"] {
///     graph.add_node(label)?;
/// }
/// let natural = build_matrix_with(&graph, LabelOrder::Natural);
/// assert_eq!(natural.header(), ["1", "2", "10"]);
/// # Ok::<(), reachgraph_core::GraphError>(())
/// ```
#[must_use]
#[instrument(
    name = "core.build_matrix",
    level = "debug",
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn build_matrix_with(graph: &Graph, order: LabelOrder) -> AdjacencyMatrix {
    let mut nodes: Vec<&Node> = graph.nodes().collect();
    nodes.sort_by(|left, right| order.compare(left.label(), right.label()));

    let positions: HashMap<NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id(), index))
        .collect();
    let header = nodes.iter().map(|node| node.label().to_owned()).collect();

    let mut cells = BoolMatrix::zeros(nodes.len());
    for (_, edge) in graph.edges() {
        let (u, v) = edge.endpoints();
        if let (Some(&i), Some(&j)) = (positions.get(&u), positions.get(&v)) {
            cells.set(i, j);
            cells.set(j, i);
        }
    }

    AdjacencyMatrix { header, cells }
}
