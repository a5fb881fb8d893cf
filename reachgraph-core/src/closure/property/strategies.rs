//! Seeded graph generators for closure property tests.
//!
//! Proptest picks a [`Topology`] and a seed; the generator then draws the
//! graph from a [`SmallRng`] so failing cases replay from the seed alone.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::{GraphFixture, Topology};

/// Smallest generated graph.
const MIN_NODES: usize = 1;
/// Largest generated graph. Warshall is cubic, keep this modest.
const MAX_NODES: usize = 24;

/// Generates fixtures across every [`Topology`].
pub(super) fn graph_fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    (any::<Topology>(), any::<u64>()).prop_map(|(topology, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(topology, &mut rng)
    })
}

/// Generates a fixture of the given topology from `rng`.
pub(super) fn generate_fixture(topology: Topology, rng: &mut SmallRng) -> GraphFixture {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let edges = match topology {
        Topology::Sparse => random_edges(rng, node_count, node_count),
        Topology::Dense => dense_edges(rng, node_count),
        Topology::Disconnected => component_edges(rng, node_count),
        Topology::Path => path_edges(rng, node_count),
        Topology::SelfLoops => {
            let mut edges = random_edges(rng, node_count, node_count / 2);
            edges.extend(
                (0..node_count)
                    .filter(|_| rng.gen_bool(0.3))
                    .map(|node| (node, node)),
            );
            edges
        }
        Topology::Edgeless => Vec::new(),
    };
    GraphFixture {
        node_count,
        edges,
        topology,
    }
}

fn random_edges(rng: &mut SmallRng, node_count: usize, count: usize) -> Vec<(usize, usize)> {
    (0..count)
        .map(|_| (rng.gen_range(0..node_count), rng.gen_range(0..node_count)))
        .collect()
}

fn dense_edges(rng: &mut SmallRng, node_count: usize) -> Vec<(usize, usize)> {
    let probability: f64 = rng.gen_range(0.6..=0.95);
    let mut edges = Vec::new();
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            if rng.gen_bool(probability) {
                edges.push((left, right));
            }
        }
    }
    edges
}

/// Splits the nodes into contiguous blocks and only draws edges inside a
/// block.
fn component_edges(rng: &mut SmallRng, node_count: usize) -> Vec<(usize, usize)> {
    let components = rng.gen_range(1..=4_usize).min(node_count);
    let block = node_count.div_ceil(components);
    let mut edges = Vec::new();
    for start in (0..node_count).step_by(block) {
        let end = (start + block).min(node_count);
        for _ in 0..(end - start) {
            edges.push((rng.gen_range(start..end), rng.gen_range(start..end)));
        }
    }
    edges
}

fn path_edges(rng: &mut SmallRng, node_count: usize) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..node_count).collect();
    order.shuffle(rng);
    order.windows(2).map(|pair| (pair[0], pair[1])).collect()
}
