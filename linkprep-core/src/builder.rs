//! Builder utilities for configuring dataset orchestration.
//!
//! Exposes the configuration surface and the validation performed before
//! constructing [`LinkPredictionDataset`] instances.

use std::num::NonZeroUsize;

use crate::{
    Result,
    dataset::LinkPredictionDataset,
    error::DatasetError,
    sample::{DEFAULT_WALK_LENGTH, SamplerKind},
};

/// Configures and constructs [`LinkPredictionDataset`] instances.
///
/// Misconfiguration surfaces as an error from [`build`](Self::build) rather
/// than from the first fit or transform call.
///
/// # Examples
/// ```
/// use linkprep_core::{LinkPredictionDatasetBuilder, SamplerKind};
///
/// let dataset = LinkPredictionDatasetBuilder::new()
///     .with_test_edge_fraction(0.2)
///     .with_sampler_kind(SamplerKind::DegreeBiased)
///     .with_negatives_per_positive(3)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(dataset.negatives_per_positive().get(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LinkPredictionDatasetBuilder {
    test_edge_fraction: f64,
    sampler_name: Option<String>,
    sampler_kind: SamplerKind,
    negatives_per_positive: usize,
    all_negatives: bool,
    duplicated_negative_edges: bool,
    walk_length: usize,
    conditioned_on_source: Option<bool>,
}

impl Default for LinkPredictionDatasetBuilder {
    fn default() -> Self {
        Self {
            test_edge_fraction: 0.25,
            sampler_name: None,
            sampler_kind: SamplerKind::Uniform,
            negatives_per_positive: 1,
            all_negatives: false,
            duplicated_negative_edges: false,
            walk_length: DEFAULT_WALK_LENGTH,
            conditioned_on_source: None,
        }
    }
}

impl LinkPredictionDatasetBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use linkprep_core::{LinkPredictionDatasetBuilder, SamplerKind};
    ///
    /// let builder = LinkPredictionDatasetBuilder::new();
    /// assert_eq!(builder.test_edge_fraction(), 0.25);
    /// assert_eq!(builder.sampler_kind(), SamplerKind::Uniform);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the fraction of edges held out as test positives.
    #[must_use]
    pub fn with_test_edge_fraction(mut self, fraction: f64) -> Self {
        self.test_edge_fraction = fraction;
        self
    }

    /// Returns the configured test-edge fraction.
    #[rustfmt::skip]
    #[must_use]
    pub fn test_edge_fraction(&self) -> f64 { self.test_edge_fraction }

    /// Sets the negative-sampling strategy directly.
    #[must_use]
    pub fn with_sampler_kind(mut self, kind: SamplerKind) -> Self {
        self.sampler_kind = kind;
        self.sampler_name = None;
        self
    }

    /// Sets the negative-sampling strategy by configuration name.
    ///
    /// Unknown names are reported by [`build`](Self::build), not by the
    /// first sampling call.
    #[must_use]
    pub fn with_sampler_name(mut self, name: impl Into<String>) -> Self {
        self.sampler_name = Some(name.into());
        self
    }

    /// Returns the configured sampler kind.
    ///
    /// When a name was supplied it is only resolved at build time; until
    /// then this reports the kind set directly.
    #[rustfmt::skip]
    #[must_use]
    pub fn sampler_kind(&self) -> SamplerKind { self.sampler_kind }

    /// Overrides the number of negatives sampled per test positive.
    #[must_use]
    pub fn with_negatives_per_positive(mut self, count: usize) -> Self {
        self.negatives_per_positive = count;
        self
    }

    /// Returns the configured negatives-per-positive count.
    #[rustfmt::skip]
    #[must_use]
    pub fn negatives_per_positive(&self) -> usize { self.negatives_per_positive }

    /// Switches transform to exhaustive mode, emitting every non-edge of the
    /// original graph instead of sampling.
    #[must_use]
    pub fn with_all_negatives(mut self, all: bool) -> Self {
        self.all_negatives = all;
        self
    }

    /// Returns whether exhaustive negative enumeration is enabled.
    #[rustfmt::skip]
    #[must_use]
    pub fn all_negatives(&self) -> bool { self.all_negatives }

    /// Permits repeated negative edges in sampled output.
    #[must_use]
    pub fn with_duplicated_negative_edges(mut self, allow: bool) -> Self {
        self.duplicated_negative_edges = allow;
        self
    }

    /// Returns whether repeated negative edges are permitted.
    #[rustfmt::skip]
    #[must_use]
    pub fn duplicated_negative_edges(&self) -> bool { self.duplicated_negative_edges }

    /// Overrides the step count of the random-walk sampler.
    #[must_use]
    pub fn with_walk_length(mut self, steps: usize) -> Self {
        self.walk_length = steps;
        self
    }

    /// Returns the configured walk length.
    #[rustfmt::skip]
    #[must_use]
    pub fn walk_length(&self) -> usize { self.walk_length }

    /// Forces the sampler's conditioning mode instead of the kind's default.
    #[must_use]
    pub fn with_conditioned_on_source(mut self, conditioned: bool) -> Self {
        self.conditioned_on_source = Some(conditioned);
        self
    }

    /// Validates the configuration and constructs a
    /// [`LinkPredictionDataset`].
    ///
    /// # Errors
    /// Returns [`DatasetError::InvalidTestEdgeFraction`] unless the fraction
    /// lies strictly between zero and one,
    /// [`DatasetError::InvalidNegativesPerPositive`] for a zero count,
    /// [`DatasetError::InvalidWalkLength`] for a zero-step walk, and a
    /// wrapped [`crate::SamplerError::UnsupportedKind`] for an unknown
    /// sampler name.
    pub fn build(self) -> Result<LinkPredictionDataset> {
        if !(self.test_edge_fraction > 0.0 && self.test_edge_fraction < 1.0) {
            return Err(DatasetError::InvalidTestEdgeFraction {
                got: self.test_edge_fraction,
            });
        }
        let negatives_per_positive = NonZeroUsize::new(self.negatives_per_positive)
            .ok_or(DatasetError::InvalidNegativesPerPositive)?;
        if self.walk_length == 0 {
            return Err(DatasetError::InvalidWalkLength {
                got: self.walk_length,
            });
        }
        let kind = match &self.sampler_name {
            Some(name) => name.parse().map_err(DatasetError::Sampler)?,
            None => self.sampler_kind,
        };

        Ok(LinkPredictionDataset::new(
            self.test_edge_fraction,
            kind,
            negatives_per_positive,
            self.all_negatives,
            self.duplicated_negative_edges,
            self.walk_length,
            self.conditioned_on_source,
        ))
    }
}
