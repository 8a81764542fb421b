//! Tests for the dataset orchestration API, exercised through the public
//! surface only.

use std::collections::HashSet;

use linkprep_core::{
    DatasetError, EdgeKey, LinkPredictionDatasetBuilder, SamplerKind, SparseGraph, SplitErrorCode,
};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};

/// A circulant graph on `n` nodes with chords to the next two neighbours.
///
/// The ring alone is a spanning structure, so roughly half the edges are
/// removable and moderate split fractions stay feasible.
fn circulant_graph(n: usize) -> SparseGraph {
    let mut edges = Vec::with_capacity(2 * n);
    for i in 0..n {
        edges.push((i, (i + 1) % n));
        edges.push((i, (i + 2) % n));
    }
    SparseGraph::from_edges(n, &edges).expect("edges are in range")
}

#[fixture]
fn graph() -> SparseGraph {
    circulant_graph(30)
}

#[rstest]
fn builder_defaults(graph: SparseGraph) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let builder = LinkPredictionDatasetBuilder::new();
    assert_eq!(builder.test_edge_fraction(), 0.25);
    assert_eq!(builder.sampler_kind(), SamplerKind::Uniform);

    let mut dataset = builder.build().expect("defaults are valid");
    let mut rng = SmallRng::seed_from_u64(1);
    dataset.fit(&graph, &mut rng).expect("graph splits cleanly");
    assert!(dataset.is_fitted());
}

#[rstest]
#[case::uniform(SamplerKind::Uniform)]
#[case::degree_biased(SamplerKind::DegreeBiased)]
#[case::random_walk(SamplerKind::RandomWalk)]
fn fit_transform_round_trip(#[case] kind: SamplerKind, graph: SparseGraph) {
    let mut dataset = LinkPredictionDatasetBuilder::new()
        .with_test_edge_fraction(0.2)
        .with_sampler_kind(kind)
        .with_negatives_per_positive(2)
        .build()
        .expect("configuration is valid");

    let mut rng = SmallRng::seed_from_u64(5);
    dataset.fit(&graph, &mut rng).expect("graph splits cleanly");
    let (train_graph, table) = dataset.transform(&mut rng).expect("sampling succeeds");

    let expected_positives = (0.2 * graph.edge_count() as f64).floor() as usize;
    assert_eq!(table.positive_count(), expected_positives);
    assert_eq!(table.negative_count(), 2 * expected_positives);
    assert_eq!(
        train_graph.edge_count() + expected_positives,
        graph.edge_count()
    );

    for record in table.records() {
        if record.is_positive {
            assert!(graph.has_edge(record.src, record.trg));
        } else {
            assert_ne!(record.src, record.trg);
            assert!(!graph.has_edge(record.src, record.trg));
        }
    }
}

#[rstest]
fn sampled_negatives_never_repeat_by_default(graph: SparseGraph) {
    let mut dataset = LinkPredictionDatasetBuilder::new()
        .with_test_edge_fraction(0.2)
        .build()
        .expect("configuration is valid");

    let mut rng = SmallRng::seed_from_u64(9);
    dataset.fit(&graph, &mut rng).expect("graph splits cleanly");
    let (_, table) = dataset.transform(&mut rng).expect("sampling succeeds");

    let negatives: Vec<EdgeKey> = table
        .records()
        .iter()
        .filter(|record| !record.is_positive)
        .map(|record| EdgeKey::encode(record.src, record.trg))
        .collect();
    let distinct: HashSet<EdgeKey> = negatives.iter().copied().collect();
    assert_eq!(distinct.len(), negatives.len());
}

#[rstest]
fn exhaustive_mode_covers_the_whole_complement(graph: SparseGraph) {
    let mut dataset = LinkPredictionDatasetBuilder::new()
        .with_test_edge_fraction(0.2)
        .with_all_negatives(true)
        .build()
        .expect("configuration is valid");

    let mut rng = SmallRng::seed_from_u64(13);
    dataset.fit(&graph, &mut rng).expect("graph splits cleanly");
    let (_, table) = dataset.transform(&mut rng).expect("enumeration succeeds");

    let n = graph.node_count();
    let expected = n * (n - 1) / 2 - graph.edge_count();
    assert_eq!(table.negative_count(), expected);
}

#[test]
fn infeasible_fractions_surface_the_split_code() {
    // A path graph is its own spanning tree; no edge is removable.
    let path: Vec<(usize, usize)> = (1..10).map(|v| (v - 1, v)).collect();
    let graph = SparseGraph::from_edges(10, &path).expect("edges are in range");

    let mut dataset = LinkPredictionDatasetBuilder::new()
        .with_test_edge_fraction(0.5)
        .build()
        .expect("configuration is valid");

    let mut rng = SmallRng::seed_from_u64(17);
    let err = dataset
        .fit(&graph, &mut rng)
        .expect_err("a tree admits no split");
    assert!(matches!(err, DatasetError::Split(_)));
    assert_eq!(err.split_code(), Some(SplitErrorCode::Infeasible));
}

#[test]
fn misconfiguration_is_reported_at_build_time() {
    let err = LinkPredictionDatasetBuilder::new()
        .with_test_edge_fraction(1.0)
        .build()
        .expect_err("the fraction bound is exclusive");
    assert!(matches!(
        err,
        DatasetError::InvalidTestEdgeFraction { got } if got == 1.0
    ));

    let err = LinkPredictionDatasetBuilder::new()
        .with_sampler_name("resourceAllocation")
        .build()
        .expect_err("unknown sampler names fail fast");
    assert_eq!(
        err.sampler_code().map(|code| code.as_str()),
        Some("SAMPLER_UNSUPPORTED_KIND")
    );
}
