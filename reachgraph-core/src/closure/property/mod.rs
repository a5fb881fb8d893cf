//! Property-based tests for the Warshall closure.
//!
//! Checks the closure of randomly generated graphs against a breadth-first
//! reachability oracle and validates its structural invariants (symmetry,
//! containment of the adjacency relation, idempotence, and the diagonal rule
//! for undirected graphs).

mod oracle;
mod strategies;
mod structural;
mod types;
