//! Train/test edge split benchmarks.
//!
//! Measures the spanning-forest construction and removable-edge draw in
//! isolation from graph generation.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use linkprep_benches::{
    params::SplitBenchParams,
    source::{SyntheticConfig, SyntheticError, generate},
};
use linkprep_core::TrainTestEdgeSplitter;

/// Seed used for all synthetic graph generation in this benchmark.
const SEED: u64 = 42;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

/// Fraction of edges held out for testing.
const FRACTION: f64 = 0.25;

fn split_fit_impl(c: &mut Criterion) -> Result<(), SyntheticError> {
    let mut group = c.benchmark_group("split_fit");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        let graph = generate(&SyntheticConfig {
            node_count,
            extra_edges: node_count * 4,
            seed: SEED,
        })?;

        let bench_params = SplitBenchParams {
            node_count,
            fraction: FRACTION,
        };
        let splitter = TrainTestEdgeSplitter::new(FRACTION);

        group.bench_with_input(
            BenchmarkId::from_parameter(&bench_params),
            &graph,
            |b, graph| {
                b.iter(|| {
                    let mut rng = SmallRng::seed_from_u64(SEED);
                    splitter.fit(graph, &mut rng)
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn split_fit(c: &mut Criterion) {
    if let Err(err) = split_fit_impl(c) {
        panic!("split_fit benchmark setup failed: {err}");
    }
}

criterion_group!(benches, split_fit);
criterion_main!(benches);
