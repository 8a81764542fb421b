//! Benchmark support crate for linkprep.
//!
//! Provides synthetic graph generation and parameter types used by the
//! Criterion benchmarks for the two pipeline stages: train/test edge
//! splitting and negative-edge sampling.

pub mod params;
pub mod source;
