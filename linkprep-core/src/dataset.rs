//! Orchestration of splitting and negative sampling into one dataset.
//!
//! `fit` holds out test positives, rebuilds the training graph, and fits the
//! negative sampler on it. `transform` then pairs the held-out positives
//! with sampled (or exhaustively enumerated) negatives.

use std::{collections::HashSet, num::NonZeroUsize};

use rand::Rng;
use tracing::{info, instrument};

use crate::{
    Result,
    error::DatasetError,
    graph::SparseGraph,
    key::EdgeKey,
    sample::{NegativeEdgeSampler, SamplerKind},
    split::{EdgeSplit, TrainTestEdgeSplitter},
    table::TargetEdgeTable,
};

#[derive(Debug)]
struct FittedDataset {
    split: EdgeSplit,
    train_graph: SparseGraph,
    sampler: NegativeEdgeSampler,
    original_keys: HashSet<EdgeKey>,
    node_count: usize,
}

/// Produces link-prediction train/evaluation material from a graph.
///
/// Constructed through [`crate::LinkPredictionDatasetBuilder`], which
/// validates the configuration up front.
///
/// # Examples
/// ```
/// use linkprep_core::{LinkPredictionDatasetBuilder, SparseGraph};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let graph = SparseGraph::from_edges(
///     5,
///     &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2), (1, 3)],
/// )
/// .expect("edges are in range");
/// let mut dataset = LinkPredictionDatasetBuilder::new()
///     .with_test_edge_fraction(0.3)
///     .build()
///     .expect("configuration is valid");
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// dataset.fit(&graph, &mut rng).expect("graph splits cleanly");
/// let (train_graph, table) = dataset.transform(&mut rng).expect("sampling succeeds");
/// assert_eq!(table.positive_count(), 2);
/// assert_eq!(train_graph.edge_count(), graph.edge_count() - 2);
/// ```
#[derive(Debug)]
pub struct LinkPredictionDataset {
    test_edge_fraction: f64,
    sampler_kind: SamplerKind,
    negatives_per_positive: NonZeroUsize,
    all_negatives: bool,
    duplicated_negative_edges: bool,
    walk_length: usize,
    conditioned_on_source: Option<bool>,
    state: Option<FittedDataset>,
}

impl LinkPredictionDataset {
    pub(crate) fn new(
        test_edge_fraction: f64,
        sampler_kind: SamplerKind,
        negatives_per_positive: NonZeroUsize,
        all_negatives: bool,
        duplicated_negative_edges: bool,
        walk_length: usize,
        conditioned_on_source: Option<bool>,
    ) -> Self {
        Self {
            test_edge_fraction,
            sampler_kind,
            negatives_per_positive,
            all_negatives,
            duplicated_negative_edges,
            walk_length,
            conditioned_on_source,
            state: None,
        }
    }

    /// Returns the configured test-edge fraction.
    #[rustfmt::skip]
    #[must_use]
    pub fn test_edge_fraction(&self) -> f64 { self.test_edge_fraction }

    /// Returns the configured negative-sampling strategy.
    #[rustfmt::skip]
    #[must_use]
    pub fn sampler_kind(&self) -> SamplerKind { self.sampler_kind }

    /// Returns the number of negatives sampled per test positive.
    #[rustfmt::skip]
    #[must_use]
    pub fn negatives_per_positive(&self) -> NonZeroUsize { self.negatives_per_positive }

    /// Returns whether transform enumerates every non-edge instead of
    /// sampling.
    #[rustfmt::skip]
    #[must_use]
    pub fn all_negatives(&self) -> bool { self.all_negatives }

    /// Returns `true` once `fit` has succeeded.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_fitted(&self) -> bool { self.state.is_some() }

    /// Returns the fitted train/test split, if any.
    #[must_use]
    pub fn split(&self) -> Option<&EdgeSplit> {
        self.state.as_ref().map(|state| &state.split)
    }

    /// Returns the fitted training graph, if any.
    #[must_use]
    pub fn train_graph(&self) -> Option<&SparseGraph> {
        self.state.as_ref().map(|state| &state.train_graph)
    }

    /// Splits the graph, rebuilds the training graph from the retained
    /// edges, and fits the negative sampler on it.
    ///
    /// Refitting on a new graph replaces the previous state.
    ///
    /// # Errors
    /// Propagates [`crate::SplitError`] when the split is empty or
    /// infeasible, [`crate::GraphError`] when the training graph cannot be
    /// rebuilt, and [`crate::SamplerError`] from sampler fitting.
    #[instrument(
        name = "dataset.fit",
        err,
        skip(self, graph, rng),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            fraction = self.test_edge_fraction,
            sampler = %self.sampler_kind,
        ),
    )]
    pub fn fit<R: Rng>(&mut self, graph: &SparseGraph, rng: &mut R) -> Result<()> {
        let split = TrainTestEdgeSplitter::new(self.test_edge_fraction).fit(graph, rng)?;
        let train_graph = SparseGraph::from_edges(graph.node_count(), split.train_edges())?;
        let mut sampler = self.configure_sampler(self.sampler_kind);
        sampler.fit(&train_graph)?;

        info!(
            train_edges = train_graph.edge_count(),
            test_edges = split.test_edges().len(),
            "dataset fitted"
        );
        self.state = Some(FittedDataset {
            split,
            train_graph,
            sampler,
            original_keys: graph.edge_keys().into_iter().collect(),
            node_count: graph.node_count(),
        });
        Ok(())
    }

    /// Returns the training graph together with the labelled target edge
    /// table: held-out positives first, then negatives.
    ///
    /// In sampling mode the table carries `negatives_per_positive` rounds of
    /// negatives, each round the size of the positive set. In exhaustive
    /// mode it carries every non-edge of the original graph in ascending
    /// canonical order.
    ///
    /// # Errors
    /// Returns [`DatasetError::NotFitted`] before `fit` and propagates
    /// [`crate::SamplerError`] from sampling.
    #[instrument(name = "dataset.transform", err, skip(self, rng))]
    pub fn transform<R: Rng>(&self, rng: &mut R) -> Result<(SparseGraph, TargetEdgeTable)> {
        let state = self.state.as_ref().ok_or(DatasetError::NotFitted)?;
        self.assemble(state, &state.sampler, rng)
    }

    /// Like [`transform`](Self::transform), but draws negatives with a
    /// freshly fitted sampler of `kind` instead of the configured one.
    ///
    /// # Errors
    /// Returns [`DatasetError::NotFitted`] before `fit` and propagates
    /// [`crate::SamplerError`] from sampler fitting and sampling.
    pub fn transform_with_sampler<R: Rng>(
        &self,
        rng: &mut R,
        kind: SamplerKind,
    ) -> Result<(SparseGraph, TargetEdgeTable)> {
        let state = self.state.as_ref().ok_or(DatasetError::NotFitted)?;
        let mut sampler = self.configure_sampler(kind);
        sampler.fit(&state.train_graph)?;
        self.assemble(state, &sampler, rng)
    }

    fn configure_sampler(&self, kind: SamplerKind) -> NegativeEdgeSampler {
        let mut sampler = NegativeEdgeSampler::new(kind)
            .with_duplicated_negative_edges(self.duplicated_negative_edges)
            .with_walk_length(self.walk_length);
        if let Some(conditioned) = self.conditioned_on_source {
            sampler = sampler.with_conditioned_on_source(conditioned);
        }
        sampler
    }

    fn assemble<R: Rng>(
        &self,
        state: &FittedDataset,
        sampler: &NegativeEdgeSampler,
        rng: &mut R,
    ) -> Result<(SparseGraph, TargetEdgeTable)> {
        let positives = state.split.test_edges();
        let negatives = if self.all_negatives {
            Self::enumerate_non_edges(state)
        } else {
            let mut negatives = Vec::with_capacity(
                positives.len() * self.negatives_per_positive.get(),
            );
            for _ in 0..self.negatives_per_positive.get() {
                let (src, trg) =
                    sampler.sample(rng, positives.len(), Some(state.split.test_keys()))?;
                negatives.extend(src.into_iter().zip(trg));
            }
            negatives
        };

        let table = TargetEdgeTable::from_parts(positives, &negatives);
        Ok((state.train_graph.clone(), table))
    }

    /// Every unordered node pair absent from the original graph, ascending.
    fn enumerate_non_edges(state: &FittedDataset) -> Vec<(usize, usize)> {
        let mut non_edges = Vec::new();
        for u in 0..state.node_count {
            for v in (u + 1)..state.node_count {
                if !state.original_keys.contains(&EdgeKey::encode(u, v)) {
                    non_edges.push((u, v));
                }
            }
        }
        non_edges
    }
}
