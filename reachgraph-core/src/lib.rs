//! Reachgraph core library.
//!
//! Interactive construction of undirected graphs and computation of their
//! adjacency matrix and transitive closure.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod closure;
mod error;
mod graph;
mod instrumentation;
mod matrix;
mod query;
mod selection;
mod session;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::SessionBuilder,
    closure::{TransitiveClosure, closure},
    error::{GraphError, GraphErrorCode, Result},
    graph::{Edge, EdgeId, Graph, Node, NodeId},
    matrix::{AdjacencyMatrix, BoolMatrix, LabelOrder, MatrixError, build_matrix, build_matrix_with},
    query::reachable,
    selection::{
        SelectionController, SelectionEffect, SelectionEvent, SelectionOutcome, SelectionState,
        transition,
    },
    session::{Calculation, PathAnswer, Session},
};
