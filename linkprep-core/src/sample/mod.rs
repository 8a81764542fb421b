//! Negative-edge sampling via bounded accept/reject refinement.
//!
//! The sampler drives a [`PairSource`] through rounds of candidate draws,
//! rejecting self-loops, real edges, held-out test edges, and (optionally)
//! duplicates. Only the source nodes whose candidates were rejected carry
//! into the next round, so the per-round batch shrinks as results
//! accumulate. A shortfall after the final round is padded by resampling
//! already-accepted results with replacement — a silent approximation that
//! can introduce duplicates even when duplicates were forbidden.

mod source;


use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{graph::SparseGraph, key::EdgeKey};

pub use self::source::{DEFAULT_WALK_LENGTH, PairSource, SamplerKind};

/// Maximum number of accept/reject rounds before the shortfall is padded.
pub const MAX_RESAMPLE_ROUNDS: usize = 30;

/// Errors returned by [`NegativeEdgeSampler`] operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SamplerError {
    /// The configured sampler name is not one of the shipped kinds.
    #[error("unsupported negative-edge sampler `{name}`")]
    UnsupportedKind {
        /// The unrecognised configuration name.
        name: String,
    },
    /// The sampler was fitted on a graph with no nodes.
    #[error("cannot fit a negative-edge sampler on an empty graph")]
    EmptyGraph,
    /// A sampling call arrived before `fit`.
    #[error("sampler has not been fitted; call fit() first")]
    NotFitted,
    /// A conditioned sampler was asked to draw its own source nodes.
    #[error("sampler conditions on source nodes; use sample_with_sources()")]
    ConditioningRequiresSources,
    /// The retry budget elapsed without a single accepted candidate, so the
    /// shortfall cannot be padded.
    #[error("no valid negative edge was found within the retry budget")]
    NoCandidatesAccepted,
}

impl SamplerError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> SamplerErrorCode {
        match self {
            Self::UnsupportedKind { .. } => SamplerErrorCode::UnsupportedKind,
            Self::EmptyGraph => SamplerErrorCode::EmptyGraph,
            Self::NotFitted => SamplerErrorCode::NotFitted,
            Self::ConditioningRequiresSources => SamplerErrorCode::ConditioningRequiresSources,
            Self::NoCandidatesAccepted => SamplerErrorCode::NoCandidatesAccepted,
        }
    }
}

/// Machine-readable error codes for [`SamplerError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SamplerErrorCode {
    /// The configured sampler name is not one of the shipped kinds.
    UnsupportedKind,
    /// The sampler was fitted on a graph with no nodes.
    EmptyGraph,
    /// A sampling call arrived before `fit`.
    NotFitted,
    /// A conditioned sampler was asked to draw its own source nodes.
    ConditioningRequiresSources,
    /// The retry budget elapsed with nothing accepted.
    NoCandidatesAccepted,
}

impl SamplerErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedKind => "SAMPLER_UNSUPPORTED_KIND",
            Self::EmptyGraph => "SAMPLER_EMPTY_GRAPH",
            Self::NotFitted => "SAMPLER_NOT_FITTED",
            Self::ConditioningRequiresSources => "SAMPLER_CONDITIONING_REQUIRES_SOURCES",
            Self::NoCandidatesAccepted => "SAMPLER_NO_CANDIDATES_ACCEPTED",
        }
    }
}

#[derive(Debug)]
struct FittedState {
    source: PairSource,
    node_count: usize,
    edge_keys: HashSet<EdgeKey>,
}

/// Samples node pairs absent from a fitted graph.
///
/// # Examples
/// ```
/// use linkprep_core::{NegativeEdgeSampler, SamplerKind, SparseGraph};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let graph = SparseGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)])
///     .expect("edges are in range");
/// let mut sampler = NegativeEdgeSampler::new(SamplerKind::Uniform);
/// sampler.fit(&graph).expect("graph is non-empty");
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let (src, trg) = sampler.sample(&mut rng, 3, None).expect("non-edges exist");
/// assert_eq!(src.len(), 3);
/// for (&s, &t) in src.iter().zip(&trg) {
///     assert_ne!(s, t);
///     assert!(!graph.has_edge(s, t));
/// }
/// ```
#[derive(Debug)]
pub struct NegativeEdgeSampler {
    kind: SamplerKind,
    conditioned_on_source: bool,
    duplicated_negative_edges: bool,
    walk_length: usize,
    state: Option<FittedState>,
}

impl NegativeEdgeSampler {
    /// Creates an unfitted sampler of the given kind.
    #[must_use]
    pub fn new(kind: SamplerKind) -> Self {
        Self {
            kind,
            conditioned_on_source: kind.conditioned_on_source(),
            duplicated_negative_edges: false,
            walk_length: DEFAULT_WALK_LENGTH,
            state: None,
        }
    }

    /// Creates a sampler from a configuration name.
    ///
    /// # Errors
    /// Returns [`SamplerError::UnsupportedKind`] for unknown names, failing
    /// fast at construction rather than at the first sampling call.
    pub fn from_name(name: &str) -> Result<Self, SamplerError> {
        Ok(Self::new(name.parse()?))
    }

    /// Permits repeated negative edges across and within sampling calls.
    #[must_use]
    pub fn with_duplicated_negative_edges(mut self, allow: bool) -> Self {
        self.duplicated_negative_edges = allow;
        self
    }

    /// Overrides the step count of the random-walk source.
    #[must_use]
    pub fn with_walk_length(mut self, steps: usize) -> Self {
        self.walk_length = steps;
        self
    }

    /// Forces the conditioning mode, overriding the kind's default.
    #[must_use]
    pub fn with_conditioned_on_source(mut self, conditioned: bool) -> Self {
        self.conditioned_on_source = conditioned;
        self
    }

    /// Returns the configured sampler kind.
    #[rustfmt::skip]
    #[must_use]
    pub fn kind(&self) -> SamplerKind { self.kind }

    /// Returns whether sampling requires caller-supplied source nodes.
    #[rustfmt::skip]
    #[must_use]
    pub fn conditioned_on_source(&self) -> bool { self.conditioned_on_source }

    /// Indexes the graph's existing edges as the exclusion set and fits the
    /// pair source.
    ///
    /// # Errors
    /// Returns [`SamplerError::EmptyGraph`] when the graph has no nodes.
    #[instrument(
        name = "sampler.fit",
        err,
        skip(self, graph),
        fields(kind = %self.kind, nodes = graph.node_count(), edges = graph.edge_count()),
    )]
    pub fn fit(&mut self, graph: &SparseGraph) -> Result<(), SamplerError> {
        if graph.node_count() == 0 {
            return Err(SamplerError::EmptyGraph);
        }
        self.state = Some(FittedState {
            source: PairSource::fit(self.kind, graph, self.walk_length),
            node_count: graph.node_count(),
            edge_keys: graph.edge_keys().into_iter().collect(),
        });
        Ok(())
    }

    /// Samples exactly `size` negative edges, drawing source nodes from the
    /// pair source itself.
    ///
    /// `test_edges`, when supplied, is an additional exclusion set so
    /// negatives never collide with held-out positives.
    ///
    /// # Errors
    /// Returns [`SamplerError::NotFitted`] before `fit`,
    /// [`SamplerError::ConditioningRequiresSources`] when the sampler
    /// conditions on source nodes, and
    /// [`SamplerError::NoCandidatesAccepted`] when the retry budget ends
    /// with nothing to pad from.
    pub fn sample<R: Rng>(
        &self,
        rng: &mut R,
        size: usize,
        test_edges: Option<&HashSet<EdgeKey>>,
    ) -> Result<(Vec<usize>, Vec<usize>), SamplerError> {
        let state = self.state.as_ref().ok_or(SamplerError::NotFitted)?;
        if self.conditioned_on_source {
            return Err(SamplerError::ConditioningRequiresSources);
        }
        let worklist = state.source.sample_source_nodes(rng, size);
        self.sample_from(state, rng, worklist, size, test_edges)
    }

    /// Samples one negative edge per supplied source node.
    ///
    /// Valid in both conditioning modes; the result length equals
    /// `source_nodes.len()`.
    ///
    /// # Errors
    /// Returns [`SamplerError::NotFitted`] before `fit` and
    /// [`SamplerError::NoCandidatesAccepted`] when the retry budget ends
    /// with nothing to pad from.
    pub fn sample_with_sources<R: Rng>(
        &self,
        rng: &mut R,
        source_nodes: &[usize],
        test_edges: Option<&HashSet<EdgeKey>>,
    ) -> Result<(Vec<usize>, Vec<usize>), SamplerError> {
        let state = self.state.as_ref().ok_or(SamplerError::NotFitted)?;
        self.sample_from(
            state,
            rng,
            source_nodes.to_vec(),
            source_nodes.len(),
            test_edges,
        )
    }

    #[instrument(
        name = "sampler.sample",
        err,
        skip_all,
        fields(kind = %self.kind, size = size),
    )]
    fn sample_from<R: Rng>(
        &self,
        state: &FittedState,
        rng: &mut R,
        mut worklist: Vec<usize>,
        size: usize,
        test_edges: Option<&HashSet<EdgeKey>>,
    ) -> Result<(Vec<usize>, Vec<usize>), SamplerError> {
        if size == 0 {
            return Ok((Vec::new(), Vec::new()));
        }

        let mut accepted: Vec<EdgeKey> = Vec::with_capacity(size);
        let mut accepted_keys: HashSet<EdgeKey> = HashSet::new();
        let mut rounds = 0;

        while accepted.len() < size && rounds < MAX_RESAMPLE_ROUNDS {
            let (src, trg) = state.source.sample_pairs(rng, &worklist);
            let mut retry = Vec::with_capacity(worklist.len());

            for index in 0..worklist.len() {
                let (s, t) = (src[index], trg[index]);
                let key = EdgeKey::encode(s, t);
                let reject = s == t
                    || state.edge_keys.contains(&key)
                    || test_edges.is_some_and(|held_out| held_out.contains(&key))
                    || (!self.duplicated_negative_edges && accepted_keys.contains(&key));
                if reject {
                    retry.push(worklist[index]);
                } else {
                    accepted.push(key);
                    accepted_keys.insert(key);
                }
            }

            worklist = retry;
            rounds += 1;
        }

        if accepted.len() < size {
            if accepted.is_empty() {
                return Err(SamplerError::NoCandidatesAccepted);
            }
            let shortfall = size - accepted.len();
            warn!(
                shortfall,
                rounds, "padding negatives by resampling accepted results with replacement"
            );
            let base = accepted.len();
            for _ in 0..shortfall {
                accepted.push(accepted[rng.gen_range(0..base)]);
            }
        }

        info!(
            accepted = size,
            rounds,
            node_count = state.node_count,
            "negative sampling complete"
        );
        Ok(accepted.iter().map(|key| key.decode()).unzip())
    }
}
