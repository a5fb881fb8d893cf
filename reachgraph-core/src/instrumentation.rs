//! Optional `metrics` emission.
//!
//! With the `metrics` feature enabled the core reports:
//!
//! - `graph_edge_toggles` (counter)
//! - `graph_calculations` (counter)
//! - `graph_closure_size` (histogram, nodes per calculation)
//!
//! Without the feature every recorder compiles to nothing.

#[cfg(feature = "metrics")]
pub(crate) fn record_edge_toggle() {
    metrics::counter!("graph_edge_toggles").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_edge_toggle() {}

#[cfg(feature = "metrics")]
pub(crate) fn record_calculation(nodes: usize) {
    metrics::counter!("graph_calculations").increment(1);
    let size = u32::try_from(nodes).map_or(f64::from(u32::MAX), f64::from);
    metrics::histogram!("graph_closure_size").record(size);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_calculation(_nodes: usize) {}
