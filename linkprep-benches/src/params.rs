//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so benchmark ids stay
//! readable in Criterion reports.

use std::fmt;

/// Parameters for an edge-split benchmark run.
#[derive(Clone, Debug)]
pub struct SplitBenchParams {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Fraction of edges held out for testing.
    pub fraction: f64,
}

impl fmt::Display for SplitBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},f={}", self.node_count, self.fraction)
    }
}

/// Parameters for a negative-sampling benchmark run.
#[derive(Clone, Debug)]
pub struct SamplingBenchParams {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Number of negatives requested per call.
    pub sample_size: usize,
    /// Configuration name of the sampler kind.
    pub kind: &'static str,
}

impl fmt::Display for SamplingBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},size={},kind={}",
            self.node_count, self.sample_size, self.kind
        )
    }
}
