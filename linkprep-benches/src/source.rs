//! Synthetic graph generation for benchmarking.
//!
//! Builds connected graphs from a shuffled spanning tree plus random
//! chords, seeded for reproducibility across benchmark runs.

use linkprep_core::SparseGraph;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// Fewer than two nodes were requested.
    #[error("a connected graph needs at least two nodes (got {got})")]
    TooFewNodes {
        /// The invalid node count supplied by the caller.
        got: usize,
    },
    /// Graph construction rejected the generated edges.
    #[error("graph construction failed: {0}")]
    Graph(#[from] linkprep_core::GraphError),
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Number of random chords added on top of the spanning tree.
    pub extra_edges: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a connected graph from `config`.
///
/// A random node permutation forms the spanning tree; `extra_edges` chords
/// are then drawn uniformly, with duplicates collapsing at construction.
/// The result is always connected, so any split fraction small enough for
/// the chord count is feasible.
///
/// # Examples
///
/// ```
/// use linkprep_benches::source::{SyntheticConfig, generate};
///
/// let config = SyntheticConfig { node_count: 100, extra_edges: 200, seed: 42 };
/// let graph = generate(&config).expect("valid config");
/// assert_eq!(graph.node_count(), 100);
/// assert!(graph.edge_count() >= 99);
/// ```
///
/// # Errors
/// Returns [`SyntheticError::TooFewNodes`] when fewer than two nodes are
/// requested.
pub fn generate(config: &SyntheticConfig) -> Result<SparseGraph, SyntheticError> {
    if config.node_count < 2 {
        return Err(SyntheticError::TooFewNodes {
            got: config.node_count,
        });
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);

    let mut perm: Vec<usize> = (0..config.node_count).collect();
    perm.shuffle(&mut rng);

    let mut edges: Vec<(usize, usize)> = (1..config.node_count)
        .map(|i| (perm[i - 1], perm[i]))
        .collect();
    for _ in 0..config.extra_edges {
        let u = rng.gen_range(0..config.node_count);
        let v = rng.gen_range(0..config.node_count);
        if u != v {
            edges.push((u, v));
        }
    }
    Ok(SparseGraph::from_edges(config.node_count, &edges)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{SyntheticConfig, SyntheticError, generate};

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_degenerate_node_counts(#[case] node_count: usize) {
        let config = SyntheticConfig {
            node_count,
            extra_edges: 0,
            seed: 1,
        };
        assert!(matches!(
            generate(&config),
            Err(SyntheticError::TooFewNodes { got }) if got == node_count
        ));
    }

    #[test]
    fn same_seed_reproduces_the_graph() {
        let config = SyntheticConfig {
            node_count: 50,
            extra_edges: 80,
            seed: 7,
        };
        let a = generate(&config).expect("config is valid");
        let b = generate(&config).expect("config is valid");
        assert_eq!(a, b);
    }

    #[test]
    fn tree_edges_are_always_present() {
        let config = SyntheticConfig {
            node_count: 40,
            extra_edges: 0,
            seed: 11,
        };
        let graph = generate(&config).expect("config is valid");
        assert_eq!(graph.edge_count(), 39);
    }
}
