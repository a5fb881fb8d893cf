//! Path queries against a computed closure.

use tracing::instrument;

use crate::{Result, closure::TransitiveClosure, error::GraphError};

/// Whether a walk of one or more edges leads from `from` to `to`.
///
/// # Errors
/// Returns [`GraphError::NotFound`] when either label is missing from the
/// closure header.
///
/// # Examples
/// ```
/// use reachgraph_core::{Graph, GraphError, build_matrix, closure, reachable};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("A")?;
/// let b = graph.add_node("B")?;
/// graph.add_edge(a, b)?;
/// graph.add_node("C")?;
///
/// let reach = closure(&build_matrix(&graph));
/// assert!(reachable(&reach, "A", "B")?);
/// assert!(!reachable(&reach, "A", "C")?);
/// assert!(matches!(
///     reachable(&reach, "X", "A"),
///     Err(GraphError::NotFound { .. })
/// ));
/// # Ok::<(), GraphError>(())
/// ```
#[instrument(name = "core.reachable", level = "debug", err, skip(closure))]
pub fn reachable(closure: &TransitiveClosure, from: &str, to: &str) -> Result<bool> {
    let row = locate(closure, from)?;
    let column = locate(closure, to)?;
    Ok(closure.get(row, column).unwrap_or(false))
}

fn locate(closure: &TransitiveClosure, label: &str) -> Result<usize> {
    closure
        .index_of(label)
        .ok_or_else(|| GraphError::NotFound {
            label: label.to_owned(),
        })
}
