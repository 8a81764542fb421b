//! Connectivity-preserving train/test edge splitting.
//!
//! The splitter builds a spanning forest of the input graph, marks every
//! non-forest edge as removable, and draws the test set uniformly without
//! replacement from the removable edges. Because no forest edge is ever
//! removed, the train edges keep exactly the component structure of the
//! input graph.

mod union_find;

#[cfg(test)]
mod property;

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;
use tracing::{info, instrument};

use crate::{graph::SparseGraph, key::EdgeKey};

pub(crate) use self::union_find::UnionFind;

/// Errors returned while splitting a graph's edges.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum SplitError {
    /// The caller requested a split of a graph with no nodes.
    #[error("cannot split an empty graph")]
    EmptyGraph,
    /// The requested fraction cannot be honoured without disconnecting the
    /// train graph.
    #[error(
        "cannot remove {requested} of {total} edges at fraction {fraction}: only {removable} \
         edges are outside the spanning forest; decrease the fraction"
    )]
    Infeasible {
        /// The requested test-edge fraction.
        fraction: f64,
        /// Number of edges not needed for connectivity.
        removable: usize,
        /// Number of test edges the fraction asked for.
        requested: usize,
        /// Total number of undirected edges.
        total: usize,
    },
}

impl SplitError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> SplitErrorCode {
        match self {
            Self::EmptyGraph => SplitErrorCode::EmptyGraph,
            Self::Infeasible { .. } => SplitErrorCode::Infeasible,
        }
    }
}

/// Machine-readable error codes for [`SplitError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SplitErrorCode {
    /// The caller requested a split of a graph with no nodes.
    EmptyGraph,
    /// The requested fraction would disconnect the train graph.
    Infeasible,
}

impl SplitErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyGraph => "SPLIT_EMPTY_GRAPH",
            Self::Infeasible => "SPLIT_INFEASIBLE",
        }
    }
}

/// The outcome of a train/test edge split.
///
/// Train and test sets are disjoint, their union is the full edge set, and
/// the train set preserves the input graph's component count. Produced once
/// per [`TrainTestEdgeSplitter::fit`] call and read-only thereafter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSplit {
    train: Vec<(usize, usize)>,
    test: Vec<(usize, usize)>,
    test_keys: HashSet<EdgeKey>,
}

impl EdgeSplit {
    /// Returns the retained train edges as canonical pairs.
    #[rustfmt::skip]
    #[must_use]
    pub fn train_edges(&self) -> &[(usize, usize)] { &self.train }

    /// Returns the held-out test edges in draw order.
    #[rustfmt::skip]
    #[must_use]
    pub fn test_edges(&self) -> &[(usize, usize)] { &self.test }

    /// Returns the test edges as a key set, for exclusion during negative
    /// sampling.
    #[rustfmt::skip]
    #[must_use]
    pub fn test_keys(&self) -> &HashSet<EdgeKey> { &self.test_keys }
}

/// Splits a graph's edges into train and test sets without breaking
/// connectivity.
///
/// # Examples
/// ```
/// use linkprep_core::{SparseGraph, TrainTestEdgeSplitter};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let graph = SparseGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)])
///     .expect("edges are in range");
/// let splitter = TrainTestEdgeSplitter::new(0.34);
/// let mut rng = SmallRng::seed_from_u64(7);
/// let split = splitter.fit(&graph, &mut rng).expect("one edge is removable");
/// assert_eq!(split.test_edges().len(), 1);
/// assert_eq!(split.train_edges().len(), 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TrainTestEdgeSplitter {
    fraction: f64,
}

impl TrainTestEdgeSplitter {
    /// Creates a splitter that holds out `fraction` of the edges for
    /// testing.
    #[rustfmt::skip]
    #[must_use]
    pub fn new(fraction: f64) -> Self { Self { fraction } }

    /// Returns the configured test-edge fraction.
    #[rustfmt::skip]
    #[must_use]
    pub fn fraction(&self) -> f64 { self.fraction }

    /// Computes the split.
    ///
    /// A spanning forest is grown over the canonical edge set with a
    /// union-find; edges that close a cycle are removable. The test set is
    /// `floor(fraction * |E|)` edges drawn uniformly without replacement
    /// from the removable edges.
    ///
    /// # Errors
    /// Returns [`SplitError::EmptyGraph`] for a zero-node graph and
    /// [`SplitError::Infeasible`] when fewer removable edges exist than the
    /// fraction requires.
    #[instrument(
        name = "split.fit",
        err,
        skip(self, graph, rng),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            fraction = self.fraction,
        ),
    )]
    pub fn fit<R: Rng>(&self, graph: &SparseGraph, rng: &mut R) -> Result<EdgeSplit, SplitError> {
        if graph.node_count() == 0 {
            return Err(SplitError::EmptyGraph);
        }

        let edges = graph.edge_keys();
        let mut forest = UnionFind::new(graph.node_count());
        let mut removable = Vec::new();
        for &key in &edges {
            let (u, v) = key.decode();
            if !forest.union(u, v) {
                removable.push(key);
            }
        }

        let requested = (self.fraction * edges.len() as f64).floor() as usize;
        if removable.len() < requested {
            return Err(SplitError::Infeasible {
                fraction: self.fraction,
                removable: removable.len(),
                requested,
                total: edges.len(),
            });
        }

        let drawn: Vec<EdgeKey> = rand::seq::index::sample(rng, removable.len(), requested)
            .iter()
            .map(|idx| removable[idx])
            .collect();
        let test_keys: HashSet<EdgeKey> = drawn.iter().copied().collect();
        let test: Vec<(usize, usize)> = drawn.iter().map(|key| key.decode()).collect();
        let train: Vec<(usize, usize)> = edges
            .iter()
            .filter(|key| !test_keys.contains(key))
            .map(|key| key.decode())
            .collect();

        info!(
            train = train.len(),
            test = test.len(),
            components = forest.components(),
            "edge split complete"
        );
        Ok(EdgeSplit {
            train,
            test,
            test_keys,
        })
    }
}
